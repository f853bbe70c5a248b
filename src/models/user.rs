use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BADGE_LEVEL: &str = "Rising";

/// Perfil de criador. A senha nunca sai na resposta JSON.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub avatar: Option<String>,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    pub badge_level: String,
    pub followers: u64,
    pub created_at: DateTime<Utc>,
}

/// Dados de cadastro (badge e followers são sempre os defaults)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub avatar: Option<String>,
    pub specialty: Option<String>,
    pub bio: Option<String>,
}
