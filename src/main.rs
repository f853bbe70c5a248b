mod api;
mod config;
mod middleware;
mod models;
mod seeds;
mod services;
mod store;
mod utils;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::{Compress, Logger}, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::Config,
    services::{CannedReplies, ChatResponder, TrendingGenerator},
    store::MemStore,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    log::info!("🚀 Starting Creator Hub Service...");
    log::info!("👤 Current user id: {}", config.current_user_id);
    log::info!("📁 Upload dir: {}", config.upload_dir.display());

    std::fs::create_dir_all(&config.upload_dir)?;

    // 🌱 Store em memória, re-populado a cada start
    let store = Arc::new(MemStore::with_system_clock());
    seeds::seed_store(&store);

    let chat = ChatResponder::new(
        store.clone(),
        Arc::new(CannedReplies::new()),
        config.chat_reply_delay,
    );
    let state = api::AppState::new(config.clone(), store, chat, TrendingGenerator::new());

    let host = config.host.clone();
    let port = config.port;
    let cors_origins = config.cors_origins.clone();

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    let server_state = state.clone();
    let server = HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(|cfg| api::configure(cfg, &server_state))
    })
    .bind((host.as_str(), port))?
    .run();

    let result = server.await;

    // Respostas de chat pendentes não sobrevivem ao processo
    state.chat.shutdown().await;

    result
}
