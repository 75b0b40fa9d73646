use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Title and message are enforced by the store, not here.
#[derive(Debug, Default, Deserialize)]
pub struct AnnouncementPayload {
    pub title: Option<String>,
    pub message: Option<String>,
    pub date: Option<String>,
}
