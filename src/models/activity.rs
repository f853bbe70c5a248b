use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: u64,
    pub user_id: u64,
    pub action: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
