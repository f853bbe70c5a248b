use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::{config::Config, store::Storage};

/// Estado do serviço e da loja em memória
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// "healthy" ou "degraded" quando o usuário corrente não existe
    pub status: String,
    pub service: String,
    pub version: String,
    pub current_user: bool,
    pub projects: usize,
    pub checked_at: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service status and store summary", body = HealthStatus)
    )
)]
pub async fn health_check(
    store: web::Data<dyn Storage>,
    config: web::Data<Config>,
) -> impl Responder {
    let current_user = store.get_user(config.current_user_id).is_some();
    if !current_user {
        log::warn!("⚠️  Current user {} missing from store", config.current_user_id);
    }

    HttpResponse::Ok().json(HealthStatus {
        status: if current_user { "healthy" } else { "degraded" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        current_user,
        projects: store.get_projects(None).len(),
        checked_at: chrono::Utc::now().to_rfc3339(),
    })
}
