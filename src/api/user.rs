use actix_web::{web, HttpResponse};

use crate::{middleware::CurrentUser, models::User, store::Storage, utils::AppError};

/// GET /api/user - Perfil do usuário atual
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "User",
    responses(
        (status = 200, description = "Current user profile", body = User),
        (status = 404, description = "User not found", body = crate::utils::ErrorBody)
    )
)]
pub async fn get_current_user(
    user: web::ReqData<CurrentUser>,
    store: web::Data<dyn Storage>,
) -> Result<HttpResponse, AppError> {
    let profile = store
        .get_user(user.id)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(HttpResponse::Ok().json(profile))
}

/// GET /api/learning-progress - Habilidades do usuário atual
#[utoipa::path(
    get,
    path = "/api/learning-progress",
    tag = "User",
    responses(
        (status = 200, description = "Learning progress per skill", body = [crate::models::LearningProgress])
    )
)]
pub async fn get_learning_progress(
    user: web::ReqData<CurrentUser>,
    store: web::Data<dyn Storage>,
) -> HttpResponse {
    HttpResponse::Ok().json(store.get_learning_progress(user.id))
}

/// GET /api/activities - 10 atividades mais recentes
#[utoipa::path(
    get,
    path = "/api/activities",
    tag = "User",
    responses(
        (status = 200, description = "Most recent activities, newest first", body = [crate::models::Activity])
    )
)]
pub async fn get_activities(
    user: web::ReqData<CurrentUser>,
    store: web::Data<dyn Storage>,
) -> HttpResponse {
    HttpResponse::Ok().json(store.get_activities(user.id))
}
