use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::{lenient_number, StringList};
use crate::validation::{normalize_email, ValidationError};

pub const DEPARTMENTS: [&str; 6] = ["CSE", "ECE", "ME", "CE", "EE", "Other"];
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Grey silhouette stored when an alumni record is created without an image.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iOTgiIGhlaWdodD0iOTgiIHZpZXdCb3g9IjAgMCA5OCA5OCIgZmlsbD0ibm9uZSIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj4KPGNpcmNsZSBjeD0iNDkiIGN5PSI0OSIgcj0iNDkiIGZpbGw9IiNGNUY1RjUiLz4KPHBhdGggZD0iTTQ5LjEwMDggNDYuMTAwMUM1Mi40NDIyIDQ2LjEwMDEgNTUuMTUwOSA0My4zOTE0IDU1LjE1MDkgNDAuMDUwMUM1NS4xNTA5IDM2LjcwODcgNTIuNDQyMiAzNCA0OS4xMDA4IDM0QzQ1Ljc1OTUgMzQgNDMuMDUwOCAzNi43MDg3IDQzLjA1MDggNDAuMDUwMUM0My4wNTA4IDQzLjM5MTQgNDUuNzU5NSA0Ni4xMDAxIDQ5LjEwMDggNDYuMTAwMVoiIGZpbGw9IiNBQUFBQUEiLz4KPHBhdGggb3BhY2l0eT0iMC41IiBkPSJNNjEuMjAwMiA1Ny40NDNDNjEuMjAwMiA2MS4yMDIxIDYxLjIwMDIgNjQuMjQ5MyA0OS4xMDAxIDY0LjI0OTNDMzcgNjQuMjQ5MyAzNyA2MS4yMDIxIDM3IDU3LjQ0M0MzNyA1My42ODQgNDIuNDE3NCA1MC42MzY3IDQ5LjEwMDEgNTAuNjM2N0M1NS43ODI4IDUwLjYzNjcgNjEuMjAwMiA1My42ODQgNjEuMjAwMiA1Ny40NDNaIiBmaWxsPSIjQUFBQUFBIi8+Cjwvc3ZnPgo=";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Alumni {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub contact: Option<String>,
    pub year_of_passing: i64,
    pub cgpa: Option<f64>,
    pub batch: Option<String>,
    pub courses: Json<Vec<String>>,
    pub degree: Option<String>,
    pub department: String,
    pub current_company: Option<String>,
    pub position: Option<String>,
    pub achievements: Json<Vec<String>>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of both create and update. Required columns are left to the store so
/// a create without them fails with the store's own message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniPayload {
    pub image: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub year_of_passing: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cgpa: Option<f64>,
    pub batch: Option<String>,
    pub courses: Option<StringList>,
    pub degree: Option<String>,
    pub department: Option<String>,
    pub current_company: Option<String>,
    pub position: Option<String>,
    pub achievements: Option<StringList>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub location: Option<String>,
}

impl AlumniPayload {
    /// Apply the column normalizations: trimmed text, lowercased email.
    pub fn normalized(mut self) -> Self {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        self.name = trim(self.name);
        self.email = self.email.map(|e| normalize_email(&e));
        self.contact = trim(self.contact);
        self.linkedin = trim(self.linkedin);
        self.github = trim(self.github);
        self
    }
}

/// Raw `?page=&limit=` values. Anything unparsable or below one falls back to
/// the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
}

impl Page {
    pub fn parse(page: Option<&str>, limit: Option<&str>, default_size: i64) -> Self {
        let positive = |raw: Option<&str>| {
            raw.and_then(|r| r.trim().parse::<i64>().ok())
                .filter(|n| *n > 0)
        };
        Self {
            number: positive(page).unwrap_or(1),
            size: positive(limit).unwrap_or(default_size),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(self.size)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AlumniListQuery {
    pub name: Option<String>,
    pub batch: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlumniSearchQuery {
    pub q: Option<String>,
    pub year: Option<String>,
    pub course: Option<String>,
    pub page: Option<String>,
}

/// Store-level filter. Text matches are case-insensitive substrings, the rest
/// exact.
#[derive(Debug, Default, Clone)]
pub struct AlumniFilter {
    pub name: Option<String>,
    pub location: Option<String>,
    pub batch: Option<String>,
    pub department: Option<String>,
    pub year_of_passing: Option<i64>,
    pub course: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(String::from)
}

impl From<&AlumniListQuery> for AlumniFilter {
    fn from(query: &AlumniListQuery) -> Self {
        Self {
            name: non_empty(&query.name),
            location: non_empty(&query.location),
            batch: non_empty(&query.batch),
            department: non_empty(&query.department),
            ..Self::default()
        }
    }
}

impl TryFrom<&AlumniSearchQuery> for AlumniFilter {
    type Error = ValidationError;

    fn try_from(query: &AlumniSearchQuery) -> Result<Self, Self::Error> {
        let year_of_passing = match non_empty(&query.year) {
            Some(raw) => Some(
                raw.trim()
                    .parse()
                    .map_err(|_| ValidationError::new("Invalid year"))?,
            ),
            None => None,
        };
        Ok(Self {
            name: non_empty(&query.q),
            year_of_passing,
            course: non_empty(&query.course),
            ..Self::default()
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniPage {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub alumni: Vec<Alumni>,
}

#[derive(Debug, Serialize)]
pub struct AlumniSearchResults {
    pub results: Vec<Alumni>,
    pub total: i64,
}
