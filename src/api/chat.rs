use actix_web::{web, HttpResponse};

use crate::{
    middleware::CurrentUser,
    models::{ChatMessage, SendMessageRequest},
    services::ChatResponder,
    store::Storage,
    utils::AppError,
};

/// GET /api/chat/messages - Conversa do usuário atual, mais antigas primeiro
#[utoipa::path(
    get,
    path = "/api/chat/messages",
    tag = "Chat",
    responses((status = 200, description = "Messages in creation order", body = [ChatMessage]))
)]
pub async fn get_messages(
    user: web::ReqData<CurrentUser>,
    store: web::Data<dyn Storage>,
) -> HttpResponse {
    HttpResponse::Ok().json(store.get_chat_messages(user.id))
}

/// POST /api/chat/messages - Envia mensagem; a resposta automática chega depois
#[utoipa::path(
    post,
    path = "/api/chat/messages",
    tag = "Chat",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Stored user message", body = ChatMessage),
        (status = 400, description = "Malformed or empty message", body = crate::utils::ErrorBody)
    )
)]
pub async fn send_message(
    user: web::ReqData<CurrentUser>,
    chat: web::Data<ChatResponder>,
    body: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, AppError> {
    // A resposta segue em background; o handler não espera por ela
    let (message, _pending) = chat.send_message(user.id, &body.message)?;
    Ok(HttpResponse::Created().json(message))
}
