use actix_web::{web, HttpResponse};

use crate::{models::TrendingTopic, services::TrendingGenerator, store::Storage};

/// GET /api/trending - Tópicos em alta, mais recentes primeiro
#[utoipa::path(
    get,
    path = "/api/trending",
    tag = "Trending",
    responses((status = 200, description = "Trending topics", body = [TrendingTopic]))
)]
pub async fn get_trending(store: web::Data<dyn Storage>) -> HttpResponse {
    HttpResponse::Ok().json(store.get_trending_topics())
}

/// POST /api/trending/refresh - Substitui todos os tópicos por novos valores
#[utoipa::path(
    post,
    path = "/api/trending/refresh",
    tag = "Trending",
    responses((status = 200, description = "Freshly generated topic set", body = [TrendingTopic]))
)]
pub async fn refresh_trending(
    store: web::Data<dyn Storage>,
    generator: web::Data<TrendingGenerator>,
) -> HttpResponse {
    HttpResponse::Ok().json(generator.refresh(store.get_ref()))
}
