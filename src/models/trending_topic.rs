use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    pub id: u64,
    pub platform: String,
    pub topic: String,
    pub engagement: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Tópico ainda sem id nem timestamp, usado na substituição completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicDraft {
    pub platform: String,
    pub topic: String,
    pub engagement: String,
}
