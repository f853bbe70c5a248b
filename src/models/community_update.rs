use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommunityUpdate {
    pub id: u64,
    pub user_id: u64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
