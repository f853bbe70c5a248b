use std::path::{Component, Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::models::{NewProject, Project};
use crate::store::Storage;
use crate::utils::AppError;

pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Campos já extraídos do formulário de upload
#[derive(Debug, Default)]
pub struct ProjectSubmission {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    /// URL do arquivo enviado, se houver. Tem prioridade sobre `image_url`.
    pub uploaded_url: Option<String>,
}

/// Cria o projeto do usuário e registra a atividade "Project uploaded"
pub fn create_project(
    store: &dyn Storage,
    user_id: u64,
    submission: ProjectSubmission,
) -> Result<Project, AppError> {
    // Título em branco é recusado, mesmo que o formulário aceite string vazia
    let title = submission
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("Failed to create project"))?;

    let project = store.create_project(NewProject {
        user_id,
        title,
        description: submission.description,
        image_url: submission.uploaded_url.or(submission.image_url),
        category: submission.category,
    });

    store.create_activity(
        user_id,
        "Project uploaded",
        Some(&format!("Created \"{}\"", project.title)),
    );

    log::info!("🎨 Project {} created for user {}", project.id, user_id);
    Ok(project)
}

/// Mantém só caracteres seguros do nome original
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Um campo de arquivo vazio (sem nome e sem bytes) conta como "nenhum arquivo"
pub fn is_empty_upload(file: &TempFile) -> bool {
    file.size == 0 && file.file_name.as_deref().map_or(true, str::is_empty)
}

/// Move o arquivo temporário para `upload_dir` e retorna a URL pública
pub fn store_upload(file: TempFile, upload_dir: &Path) -> Result<String, AppError> {
    persist_upload(file.file, file.file_name.as_deref(), upload_dir)
}

/// Falha aqui é do servidor (disco, permissão), não do cliente: vira 500
pub fn persist_upload(
    file: NamedTempFile,
    original_name: Option<&str>,
    upload_dir: &Path,
) -> Result<String, AppError> {
    let stored_name = format!(
        "{}-{}",
        Uuid::new_v4(),
        sanitize_file_name(original_name.unwrap_or("upload"))
    );
    let destination = upload_dir.join(&stored_name);

    file.persist(&destination).map_err(|e| {
        log::error!("❌ Failed to persist upload {}: {}", destination.display(), e);
        AppError::internal("Failed to create project")
    })?;

    log::debug!("📁 Upload stored at {}", destination.display());
    Ok(format!("{}/{}", UPLOADS_URL_PREFIX, stored_name))
}

/// Resolve o caminho de um upload, recusando nomes que saiam de `upload_dir`
pub fn resolve_upload(upload_dir: &Path, name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    let mut components = candidate.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(upload_dir.join(candidate)),
        _ => None,
    }
}
