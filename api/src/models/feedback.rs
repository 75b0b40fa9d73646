use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient_number;
use crate::validation::{present, ValidationError};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub rating: i64,
    pub created_at: DateTime<Utc>,
}

/// Author fields shown next to each feedback entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAuthor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub id: String,
    pub message: String,
    pub rating: i64,
    pub created_at: DateTime<Utc>,
    pub user: Option<FeedbackAuthor>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackPayload {
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<i64>,
}

impl FeedbackPayload {
    pub fn validate(&self) -> Result<(String, i64), ValidationError> {
        let (Some(message), Some(rating)) = (present(&self.message), self.rating) else {
            return Err(ValidationError::new("Missing details"));
        };
        if !(1..=5).contains(&rating) {
            return Err(ValidationError::new("Rating must be between 1 and 5"));
        }
        Ok((message.to_string(), rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(message: Option<&str>, rating: Option<i64>) -> FeedbackPayload {
        FeedbackPayload {
            message: message.map(String::from),
            rating,
        }
    }

    #[test]
    fn rating_must_be_in_range() {
        assert!(payload(Some("great"), Some(1)).validate().is_ok());
        assert!(payload(Some("great"), Some(5)).validate().is_ok());
        assert_eq!(
            payload(Some("great"), Some(6)).validate().unwrap_err().0,
            "Rating must be between 1 and 5"
        );
        assert!(payload(Some("great"), Some(0)).validate().is_err());
    }

    #[test]
    fn message_and_rating_are_required() {
        assert_eq!(
            payload(None, Some(3)).validate().unwrap_err().0,
            "Missing details"
        );
        assert_eq!(
            payload(Some("ok"), None).validate().unwrap_err().0,
            "Missing details"
        );
    }
}
