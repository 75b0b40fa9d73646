use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{parse_date, present, ValidationError};

pub const DEFAULT_VENUE: &str = "Online";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub image: String,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub venue: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub image: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub venue: Option<String>,
}

/// A create request with every required field present and dates parsed.
/// `image` is still the raw submission.
#[derive(Debug)]
pub struct NewEvent {
    pub image: String,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub venue: String,
}

/// Parsed partial update. `image` is filled in by the handler.
#[derive(Debug, Default)]
pub struct EventChanges {
    pub image: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub venue: Option<String>,
}

fn date_field(raw: &str, label: &str) -> Result<DateTime<Utc>, ValidationError> {
    parse_date(raw).ok_or_else(|| ValidationError::new(format!("Invalid {label}")))
}

impl EventPayload {
    pub fn validate_new(&self) -> Result<NewEvent, ValidationError> {
        let (Some(image), Some(title), Some(description), Some(start), Some(end)) = (
            present(&self.image),
            present(&self.title),
            present(&self.description),
            present(&self.start_date),
            present(&self.end_date),
        ) else {
            return Err(ValidationError::new(
                "Image, title, description, start date, and end date are required.",
            ));
        };

        Ok(NewEvent {
            image: image.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            start_date: date_field(start, "start date")?,
            end_date: date_field(end, "end date")?,
            venue: present(&self.venue).unwrap_or(DEFAULT_VENUE).to_string(),
        })
    }

    pub fn validate_changes(&self) -> Result<EventChanges, ValidationError> {
        Ok(EventChanges {
            image: None,
            title: present(&self.title).map(String::from),
            description: present(&self.description).map(String::from),
            start_date: present(&self.start_date)
                .map(|raw| date_field(raw, "start date"))
                .transpose()?,
            end_date: present(&self.end_date)
                .map(|raw| date_field(raw, "end date"))
                .transpose()?,
            venue: present(&self.venue).map(String::from),
        })
    }
}
