pub mod chat;
pub mod community;
pub mod health;
pub mod metrics;
pub mod projects;
pub mod swagger;
pub mod trending;
pub mod uploads;
pub mod user;

use std::sync::Arc;

use actix_multipart::form::{tempfile::TempFileConfig, MultipartFormConfig};
use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::{
    config::Config,
    middleware::CurrentUserMiddleware,
    services::{ChatResponder, TrendingGenerator},
    store::Storage,
    utils::AppError,
};

/// Dependências compartilhadas pelos handlers (clonadas por worker)
#[derive(Clone)]
pub struct AppState {
    pub config: web::Data<Config>,
    pub store: web::Data<dyn Storage>,
    pub chat: web::Data<ChatResponder>,
    pub trending: web::Data<TrendingGenerator>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn Storage>,
        chat: ChatResponder,
        trending: TrendingGenerator,
    ) -> Self {
        Self {
            config: web::Data::new(config),
            store: web::Data::from(store),
            chat: web::Data::new(chat),
            trending: web::Data::new(trending),
        }
    }
}

fn multipart_error(err: actix_multipart::MultipartError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️  Rejected project upload: {}", err);
    AppError::Upload("Failed to create project".to_string()).into()
}

fn chat_json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️  Rejected chat message: {}", err);
    AppError::validation("Failed to send message").into()
}

/// Monta todas as rotas do serviço
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(state.config.clone())
        .app_data(state.store.clone())
        .app_data(state.chat.clone())
        .app_data(state.trending.clone())
        .app_data(
            MultipartFormConfig::default()
                .total_limit(state.config.max_upload_bytes)
                .error_handler(multipart_error),
        )
        .app_data(TempFileConfig::default().directory(&state.config.upload_dir))
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Arquivos enviados
        .route("/uploads/{file}", web::get().to(uploads::serve_upload))
        .service(
            web::scope("/api")
                .wrap(CurrentUserMiddleware::new(state.config.current_user_id))
                .route("/user", web::get().to(user::get_current_user))
                .route("/learning-progress", web::get().to(user::get_learning_progress))
                .route("/activities", web::get().to(user::get_activities))
                .service(
                    web::scope("/projects")
                        .route("", web::get().to(projects::list_projects))
                        .route("", web::post().to(projects::create_project))
                        .route("/my", web::get().to(projects::list_my_projects))
                        .route("/{id}/like", web::post().to(projects::like_project)),
                )
                .service(
                    web::scope("/chat")
                        .app_data(web::JsonConfig::default().error_handler(chat_json_error))
                        .route("/messages", web::get().to(chat::get_messages))
                        .route("/messages", web::post().to(chat::send_message)),
                )
                .service(
                    web::scope("/trending")
                        .route("", web::get().to(trending::get_trending))
                        .route("/refresh", web::post().to(trending::refresh_trending)),
                )
                .service(
                    web::scope("/community")
                        .route("/creators", web::get().to(community::top_creators))
                        .route("/updates", web::get().to(community::community_updates)),
                ),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewChatMessage;
    use crate::seeds::seed_store;
    use crate::services::{CannedReplies, CANNED_REPLIES};
    use crate::store::MemStore;
    use actix_web::{
        http::{header, StatusCode},
        test, App,
    };
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::Value;
    use std::path::PathBuf;
    use std::time::Duration;

    const BOUNDARY: &str = "----creatorhubtestboundary";

    struct TestEnv {
        state: AppState,
        store: Arc<MemStore>,
        /// Raiz temporária; uploads ficam em `base_dir/uploads`
        base_dir: PathBuf,
        upload_dir: PathBuf,
    }

    impl Drop for TestEnv {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.base_dir);
        }
    }

    fn test_env(vars: &[(&str, &str)]) -> TestEnv {
        let base_dir = std::env::temp_dir().join(format!("creator-hub-test-{}", uuid::Uuid::new_v4()));
        let upload_dir = base_dir.join("uploads");
        std::fs::create_dir_all(&upload_dir).unwrap();

        let mut config = Config::from_lookup(|key| {
            vars.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
        });
        config.upload_dir = upload_dir.clone();
        config.chat_reply_delay = Duration::from_millis(10);

        let store = Arc::new(MemStore::default());
        seed_store(&store);

        let chat = ChatResponder::new(
            store.clone(),
            Arc::new(CannedReplies::from_rng(StdRng::seed_from_u64(5))),
            config.chat_reply_delay,
        );
        let trending = TrendingGenerator::from_rng(StdRng::seed_from_u64(11));
        let state = AppState::new(config, store.clone(), chat, trending);

        TestEnv { state, store, base_dir, upload_dir }
    }

    macro_rules! app {
        ($env:expr) => {
            test::init_service(App::new().configure(|cfg| configure(cfg, &$env.state))).await
        };
    }

    fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/projects")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn test_get_current_user() {
        let env = test_env(&[]);
        let app = app!(env);

        let req = test::TestRequest::get().uri("/api/user").to_request();
        let user: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(user["username"], "john_creative");
        assert_eq!(user["badgeLevel"], "Expert");
        assert_eq!(user["followers"], 1250);
        assert!(user.get("password").is_none());
    }

    #[actix_web::test]
    async fn test_missing_current_user_is_404() {
        let env = test_env(&[("CURRENT_USER_ID", "99")]);
        let app = app!(env);

        let req = test::TestRequest::get().uri("/api/user").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "User not found");
    }

    #[actix_web::test]
    async fn test_learning_progress_for_current_user() {
        let env = test_env(&[]);
        let app = app!(env);

        let req = test::TestRequest::get().uri("/api/learning-progress").to_request();
        let progress: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(progress.len(), 3);
        assert_eq!(progress[2]["skillName"], "UI/UX Design");
        assert_eq!(progress[2]["progress"], 92);
    }

    #[actix_web::test]
    async fn test_create_project_without_file() {
        let env = test_env(&[]);
        let app = app!(env);

        let body = multipart_body(&[("title", "A"), ("description", "B")], None);
        let resp = test::call_service(&app, upload_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let project: Value = test::read_body_json(resp).await;
        assert_eq!(project["title"], "A");
        assert_eq!(project["description"], "B");
        assert_eq!(project["likes"], 0);
        assert_eq!(project["comments"], 0);
        assert_eq!(project["category"], Value::Null);
        assert_eq!(project["imageUrl"], Value::Null);
        assert_eq!(project["userId"], 1);

        let req = test::TestRequest::get().uri("/api/projects/my").to_request();
        let mine: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(mine.len(), 3);

        let req = test::TestRequest::get().uri("/api/activities").to_request();
        let activities: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(activities[0]["action"], "Project uploaded");
        assert_eq!(activities[0]["description"], "Created \"A\"");
    }

    #[actix_web::test]
    async fn test_create_project_requires_title() {
        let env = test_env(&[]);
        let app = app!(env);

        let body = multipart_body(&[("description", "no title")], None);
        let resp = test::call_service(&app, upload_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Failed to create project");

        assert_eq!(env.store.get_projects(None).len(), 2);
    }

    #[actix_web::test]
    async fn test_create_project_with_file_upload() {
        let env = test_env(&[]);
        let app = app!(env);

        let bytes: &[u8] = b"\x89PNG fake image bytes";
        let body = multipart_body(
            &[("title", "Poster"), ("imageUrl", "https://example.com/ignored.png")],
            Some(("poster.png", bytes)),
        );
        let resp = test::call_service(&app, upload_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let project: Value = test::read_body_json(resp).await;
        let image_url = project["imageUrl"].as_str().unwrap().to_string();
        assert!(image_url.starts_with("/uploads/"));
        assert!(image_url.ends_with("-poster.png"));

        let req = test::TestRequest::get().uri(&image_url).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
        assert_eq!(test::read_body(resp).await.as_ref(), bytes);
    }

    #[actix_web::test]
    async fn test_unknown_upload_is_404() {
        let env = test_env(&[]);
        let app = app!(env);

        let req = test::TestRequest::get().uri("/uploads/missing.png").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_upload_path_cannot_escape_upload_dir() {
        let env = test_env(&[]);
        let app = app!(env);
        std::fs::write(env.base_dir.join("secret.txt"), b"top secret").unwrap();

        for uri in [
            "/uploads/..%2Fsecret.txt",
            "/uploads/%2E%2E%2Fsecret.txt",
            "/uploads/..",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
            assert_ne!(test::read_body(resp).await.as_ref(), b"top secret");
        }
    }

    #[actix_web::test]
    async fn test_svg_upload_served_as_attachment() {
        let env = test_env(&[]);
        let app = app!(env);

        let svg: &[u8] = b"<svg xmlns=\"http://www.w3.org/2000/svg\"><script>alert(document.cookie)</script></svg>";
        let body = multipart_body(&[("title", "Vector")], Some(("logo.svg", svg)));
        let project: Value =
            test::call_and_read_body_json(&app, upload_request(body).to_request()).await;
        let image_url = project["imageUrl"].as_str().unwrap().to_string();

        let req = test::TestRequest::get().uri(&image_url).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let headers = resp.headers();
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/octet-stream");
        assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        let disposition = headers.get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap();
        assert!(disposition.starts_with("attachment"));
    }

    #[actix_web::test]
    async fn test_image_upload_has_nosniff() {
        let env = test_env(&[]);
        let app = app!(env);

        let body = multipart_body(&[("title", "Photo")], Some(("shot.jpg", b"jpeg bytes")));
        let project: Value =
            test::call_and_read_body_json(&app, upload_request(body).to_request()).await;

        let req = test::TestRequest::get()
            .uri(project["imageUrl"].as_str().unwrap())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/jpeg");
        assert_eq!(resp.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert!(resp.headers().get(header::CONTENT_DISPOSITION).is_none());
    }

    #[actix_web::test]
    async fn test_oversized_upload_rejected() {
        let env = test_env(&[("MAX_UPLOAD_BYTES", "200")]);
        let app = app!(env);

        let big = vec![b'x'; 5000];
        let body = multipart_body(&[("title", "Huge")], Some(("huge.png", &big)));
        let resp = test::call_service(&app, upload_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Failed to create project");
        assert_eq!(env.store.get_projects(None).len(), 2);
        assert_eq!(std::fs::read_dir(&env.upload_dir).unwrap().count(), 0);
    }

    #[actix_web::test]
    async fn test_like_project() {
        let env = test_env(&[]);
        let app = app!(env);

        let req = test::TestRequest::post().uri("/api/projects/1/like").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Project liked");

        let likes = |store: &MemStore| {
            store
                .get_projects(None)
                .into_iter()
                .map(|p| (p.id, p.likes))
                .collect::<Vec<_>>()
        };
        assert_eq!(likes(&env.store), vec![(1, 25), (2, 56)]);

        for uri in ["/api/projects/999/like", "/api/projects/abc/like"] {
            let req = test::TestRequest::post().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
        assert_eq!(likes(&env.store), vec![(1, 25), (2, 56)]);
    }

    #[actix_web::test]
    async fn test_chat_message_gets_one_automated_reply() {
        let env = test_env(&[]);
        let app = app!(env);

        let req = test::TestRequest::post()
            .uri("/api/chat/messages")
            .set_json(serde_json::json!({ "message": "hello" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let sent: Value = test::read_body_json(resp).await;
        assert_eq!(sent["message"], "hello");
        assert_eq!(sent["isAi"], false);

        let mut messages: Vec<Value> = Vec::new();
        for _ in 0..100 {
            let req = test::TestRequest::get().uri("/api/chat/messages").to_request();
            messages = test::call_and_read_body_json(&app, req).await;
            if messages.len() == 2 {
                break;
            }
            actix_web::rt::time::sleep(Duration::from_millis(20)).await;
        }

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["message"], "hello");
        assert_eq!(messages[1]["isAi"], true);
        let reply = messages[1]["message"].as_str().unwrap();
        assert!(CANNED_REPLIES.contains(&reply));
    }

    #[actix_web::test]
    async fn test_chat_rejects_malformed_body() {
        let env = test_env(&[]);
        let app = app!(env);

        let req = test::TestRequest::post()
            .uri("/api/chat/messages")
            .set_json(serde_json::json!({ "text": "wrong field" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Failed to send message");
        assert!(env.store.get_chat_messages(1).is_empty());
    }

    #[actix_web::test]
    async fn test_chat_messages_are_ordered() {
        let env = test_env(&[]);
        let app = app!(env);
        for text in ["first", "second", "third"] {
            env.store.create_chat_message(NewChatMessage {
                user_id: 1,
                message: text.to_string(),
                is_ai: false,
            });
        }

        let req = test::TestRequest::get().uri("/api/chat/messages").to_request();
        let messages: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        let texts: Vec<&str> = messages.iter().map(|m| m["message"].as_str().unwrap()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[actix_web::test]
    async fn test_activities_capped_at_ten() {
        let env = test_env(&[]);
        let app = app!(env);
        for i in 0..12 {
            env.store.create_activity(1, &format!("Action {}", i), None);
        }

        let req = test::TestRequest::get().uri("/api/activities").to_request();
        let activities: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(activities.len(), 10);
        assert_eq!(activities[0]["action"], "Action 11");
    }

    #[actix_web::test]
    async fn test_trending_refresh_replaces_topics() {
        let env = test_env(&[]);
        let app = app!(env);

        let req = test::TestRequest::get().uri("/api/trending").to_request();
        let before: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(before.len(), 4);

        let req = test::TestRequest::post().uri("/api/trending/refresh").to_request();
        let after: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(after.len(), 9);

        for old in &before {
            assert!(after.iter().all(|new| new["id"] != old["id"]));
        }
        for topic in &after {
            let engagement = topic["engagement"].as_str().unwrap();
            assert!(engagement.starts_with('+') && engagement.ends_with('%'));
        }

        let req = test::TestRequest::get().uri("/api/trending").to_request();
        let current: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(current, after);
    }

    #[actix_web::test]
    async fn test_community_endpoints() {
        let env = test_env(&[]);
        let app = app!(env);
        env.store.create_community_update(1, "Shipped a new palette");

        let req = test::TestRequest::get().uri("/api/community/creators").to_request();
        let creators: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(creators.len(), 1);
        assert_eq!(creators[0]["username"], "john_creative");

        let req = test::TestRequest::get().uri("/api/community/updates").to_request();
        let updates: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0]["message"], "Shipped a new palette");
    }

    #[actix_web::test]
    async fn test_health_and_metrics() {
        let env = test_env(&[]);
        let app = app!(env);

        let req = test::TestRequest::get().uri("/health").to_request();
        let health: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["currentUser"], true);
        assert_eq!(health["projects"], 2);

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("http_requests_total"));
        assert!(text.contains("http_errors_total"));
    }

    #[actix_web::test]
    async fn test_health_degraded_without_current_user() {
        let env = test_env(&[("CURRENT_USER_ID", "99")]);
        let app = app!(env);

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let health: Value = test::read_body_json(resp).await;
        assert_eq!(health["status"], "degraded");
        assert_eq!(health["currentUser"], false);
    }
}
