use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{web, HttpResponse};

use crate::{
    config::Config,
    middleware::CurrentUser,
    models::{MessageResponse, Project},
    services::project_service::{self, ProjectSubmission},
    store::Storage,
    utils::AppError,
};

/// Formulário multipart do upload de projeto
#[derive(MultipartForm)]
pub struct ProjectUploadForm {
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub category: Option<Text<String>>,
    #[multipart(rename = "imageUrl")]
    pub image_url: Option<Text<String>>,
    pub file: Option<TempFile>,
}

/// GET /api/projects - Todos os projetos
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projects",
    responses((status = 200, description = "All projects", body = [Project]))
)]
pub async fn list_projects(store: web::Data<dyn Storage>) -> HttpResponse {
    HttpResponse::Ok().json(store.get_projects(None))
}

/// GET /api/projects/my - Projetos do usuário atual
#[utoipa::path(
    get,
    path = "/api/projects/my",
    tag = "Projects",
    responses((status = 200, description = "Current user's projects", body = [Project]))
)]
pub async fn list_my_projects(
    user: web::ReqData<CurrentUser>,
    store: web::Data<dyn Storage>,
) -> HttpResponse {
    HttpResponse::Ok().json(store.get_projects(Some(user.id)))
}

/// POST /api/projects - Upload de projeto (multipart)
///
/// Campos: title (obrigatório), description, category, imageUrl, file.
/// Se houver arquivo, a URL dele substitui imageUrl.
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Missing title or malformed form", body = crate::utils::ErrorBody)
    )
)]
pub async fn create_project(
    user: web::ReqData<CurrentUser>,
    store: web::Data<dyn Storage>,
    config: web::Data<Config>,
    MultipartForm(form): MultipartForm<ProjectUploadForm>,
) -> Result<HttpResponse, AppError> {
    log::info!("📤 POST /projects - Upload for user {}", user.id);

    let title = form.title.map(Text::into_inner);
    if title.as_deref().map_or(true, |t| t.trim().is_empty()) {
        return Err(AppError::validation("Failed to create project"));
    }

    let uploaded_url = match form.file {
        Some(file) if !project_service::is_empty_upload(&file) => {
            Some(project_service::store_upload(file, &config.upload_dir)?)
        }
        _ => None,
    };

    let project = project_service::create_project(
        store.get_ref(),
        user.id,
        ProjectSubmission {
            title,
            description: form.description.map(Text::into_inner),
            category: form.category.map(Text::into_inner),
            image_url: form.image_url.map(Text::into_inner),
            uploaded_url,
        },
    )?;

    Ok(HttpResponse::Created().json(project))
}

/// POST /api/projects/{id}/like - Curte um projeto
///
/// Sempre 200: id inexistente ou inválido não faz nada.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/like",
    tag = "Projects",
    params(("id" = String, Path, description = "Project id")),
    responses((status = 200, description = "Like registered (no-op for unknown ids)", body = MessageResponse))
)]
pub async fn like_project(path: web::Path<String>, store: web::Data<dyn Storage>) -> HttpResponse {
    let raw_id = path.into_inner();

    let liked = raw_id
        .parse::<u64>()
        .map(|id| store.like_project(id))
        .unwrap_or(false);

    if liked {
        log::debug!("❤️ Project {} liked", raw_id);
    } else {
        log::debug!("Like ignored for unknown project '{}'", raw_id);
    }

    HttpResponse::Ok().json(MessageResponse {
        message: "Project liked".to_string(),
    })
}
