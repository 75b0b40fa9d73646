use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::new_id;
use crate::models::feedback::{Feedback, FeedbackAuthor, FeedbackEntry};

pub async fn insert(
    pool: &SqlitePool,
    user_id: &str,
    message: &str,
    rating: i64,
) -> Result<Feedback, sqlx::Error> {
    sqlx::query_as::<_, Feedback>(
        "INSERT INTO feedback (id, user_id, message, rating, created_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(user_id)
    .bind(message)
    .bind(rating)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

#[derive(sqlx::FromRow)]
struct FeedbackRow {
    id: String,
    message: String,
    rating: i64,
    created_at: DateTime<Utc>,
    user_id: String,
    user_name: Option<String>,
    user_email: Option<String>,
    user_profile_image: Option<String>,
}

impl From<FeedbackRow> for FeedbackEntry {
    fn from(row: FeedbackRow) -> Self {
        let user = match (row.user_name, row.user_email) {
            (Some(name), Some(email)) => Some(FeedbackAuthor {
                id: row.user_id,
                name,
                email,
                profile_image: row.user_profile_image,
            }),
            _ => None,
        };
        Self {
            id: row.id,
            message: row.message,
            rating: row.rating,
            created_at: row.created_at,
            user,
        }
    }
}

/// All feedback, newest first, with the author's public fields.
pub async fn list_with_authors(pool: &SqlitePool) -> Result<Vec<FeedbackEntry>, sqlx::Error> {
    let rows = sqlx::query_as::<_, FeedbackRow>(
        "SELECT f.id, f.message, f.rating, f.created_at, f.user_id, \
                u.name AS user_name, u.email AS user_email, u.profile_image AS user_profile_image \
         FROM feedback f LEFT JOIN users u ON u.id = f.user_id \
         ORDER BY f.created_at DESC, f.rowid DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(FeedbackEntry::from).collect())
}
