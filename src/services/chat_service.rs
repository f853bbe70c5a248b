// ==================== CHAT REPLIES ====================
// Resposta "AI" simulada: a mensagem do usuário é salva na hora e a resposta
// automática chega depois de um atraso, numa task própria que pode ser cancelada.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::models::{ChatMessage, NewChatMessage};
use crate::store::Storage;
use crate::utils::AppError;

pub const CANNED_REPLIES: [&str; 4] = [
    "I'd be happy to help you with that! Can you provide more details?",
    "That's a great question! Let me analyze your request and provide some suggestions.",
    "Based on your creative goals, I recommend exploring color theory and composition techniques.",
    "Here are some AI-powered tools that might help with your project.",
];

/// Gera o texto da resposta automática para uma mensagem do usuário
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> String;
}

/// Escolhe uma das `CANNED_REPLIES` ao acaso, ignorando o prompt
pub struct CannedReplies {
    rng: Mutex<StdRng>,
}

impl CannedReplies {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng: Mutex::new(rng) }
    }
}

impl Default for CannedReplies {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyGenerator for CannedReplies {
    async fn generate(&self, _prompt: &str) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        CANNED_REPLIES
            .choose(&mut *rng)
            .copied()
            .unwrap_or(CANNED_REPLIES[0])
            .to_string()
    }
}

/// Resposta agendada. Pode ser aguardada ou cancelada; se descartada, a task segue sozinha.
pub struct PendingReply {
    token: CancellationToken,
    handle: JoinHandle<Option<ChatMessage>>,
}

// Os handlers HTTP descartam a resposta agendada; só quem orquestra a task aguarda ou cancela
#[allow(dead_code)]
impl PendingReply {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Espera a task terminar. `None` se foi cancelada antes de responder.
    pub async fn wait(self) -> Option<ChatMessage> {
        match self.handle.await {
            Ok(reply) => reply,
            Err(e) => {
                log::error!("❌ Chat reply task failed: {}", e);
                None
            }
        }
    }
}

pub struct ChatResponder {
    store: Arc<dyn Storage>,
    generator: Arc<dyn ReplyGenerator>,
    delay: Duration,
    shutdown: CancellationToken,
    tracker: TaskTracker,
}

impl ChatResponder {
    pub fn new(store: Arc<dyn Storage>, generator: Arc<dyn ReplyGenerator>, delay: Duration) -> Self {
        Self {
            store,
            generator,
            delay,
            shutdown: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Salva a mensagem do usuário e agenda a resposta automática
    pub fn send_message(&self, user_id: u64, text: &str) -> Result<(ChatMessage, PendingReply), AppError> {
        // Mensagem só com espaços é recusada, embora o schema aceite string vazia
        if text.trim().is_empty() {
            return Err(AppError::validation("Failed to send message"));
        }

        let message = self.store.create_chat_message(NewChatMessage {
            user_id,
            message: text.to_string(),
            is_ai: false,
        });
        log::debug!("💬 Chat message {} stored for user {}", message.id, user_id);

        let pending = self.schedule_reply(user_id, text.to_string());
        Ok((message, pending))
    }

    pub fn schedule_reply(&self, user_id: u64, prompt: String) -> PendingReply {
        let token = self.shutdown.child_token();
        let cancelled = token.clone();
        let store = Arc::clone(&self.store);
        let generator = Arc::clone(&self.generator);
        let delay = self.delay;

        let handle = self.tracker.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    log::debug!("🛑 Chat reply for user {} cancelled", user_id);
                    None
                }
                _ = tokio::time::sleep(delay) => {
                    let text = generator.generate(&prompt).await;
                    let reply = store.create_chat_message(NewChatMessage {
                        user_id,
                        message: text,
                        is_ai: true,
                    });
                    log::debug!("🤖 Chat reply {} stored for user {}", reply.id, user_id);
                    Some(reply)
                }
            }
        });

        PendingReply { token, handle }
    }

    /// Cancela respostas pendentes e espera todas as tasks terminarem
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        self.tracker.close();
        self.tracker.wait().await;
        log::info!("✅ Chat responder stopped");
    }
}
