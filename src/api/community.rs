use actix_web::{web, HttpResponse};

use crate::{
    models::{CommunityUpdate, User},
    store::Storage,
};

/// GET /api/community/creators - Top 10 por seguidores
#[utoipa::path(
    get,
    path = "/api/community/creators",
    tag = "Community",
    responses((status = 200, description = "Top creators by followers", body = [User]))
)]
pub async fn top_creators(store: web::Data<dyn Storage>) -> HttpResponse {
    HttpResponse::Ok().json(store.get_top_creators())
}

/// GET /api/community/updates - 20 atualizações mais recentes
#[utoipa::path(
    get,
    path = "/api/community/updates",
    tag = "Community",
    responses((status = 200, description = "Most recent community updates", body = [CommunityUpdate]))
)]
pub async fn community_updates(store: web::Data<dyn Storage>) -> HttpResponse {
    HttpResponse::Ok().json(store.get_community_updates())
}
