use actix_web::{
    http::header::{self, ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse,
};

use crate::{config::Config, services::project_service, utils::AppError};

/// Só imagens raster são servidas inline. SVG pode carregar script e sai como download.
fn inline_image_type(name: &str) -> Option<&'static str> {
    let extension = name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// GET /uploads/{file} - Devolve um arquivo enviado em POST /api/projects
pub async fn serve_upload(
    path: web::Path<String>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();
    let file_path = project_service::resolve_upload(&config.upload_dir, &name)
        .ok_or_else(|| AppError::not_found("File not found"))?;

    let bytes = tokio::fs::read(&file_path).await.map_err(|e| {
        log::debug!("Upload {} not readable: {}", file_path.display(), e);
        AppError::not_found("File not found")
    })?;

    let mut response = HttpResponse::Ok();
    response.insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"));

    match inline_image_type(&name) {
        Some(content_type) => {
            response.insert_header((header::CONTENT_TYPE, content_type));
        }
        None => {
            response
                .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(name)],
                });
        }
    }

    Ok(response.body(bytes))
}
