use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_PROGRESS: u8 = 100;

/// Progresso (0..=100) de um usuário numa habilidade
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgress {
    pub id: u64,
    pub user_id: u64,
    pub skill_name: String,
    pub progress: u8,
    pub updated_at: DateTime<Utc>,
}
