use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted admin profile. Login never reads it; credentials come from
/// configuration.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub profile_image: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub email: String,
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub role: &'static str,
}

impl AdminProfile {
    pub fn new(email: String, record: Option<Admin>) -> Self {
        let (name, profile_image) = match record {
            Some(admin) => (
                Some(admin.name),
                Some(admin.profile_image).filter(|p| !p.is_empty()),
            ),
            None => (None, None),
        };
        Self {
            email,
            name,
            profile_image,
            role: "admin",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfileUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
