use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::new_id;
use crate::models::announcement::Announcement;

pub async fn insert(
    pool: &SqlitePool,
    title: Option<&str>,
    message: Option<&str>,
    date: DateTime<Utc>,
) -> Result<Announcement, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Announcement>(
        "INSERT INTO announcements (id, title, message, date, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(title)
    .bind(message)
    .bind(date)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Newest `date` first.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Announcement>, sqlx::Error> {
    sqlx::query_as::<_, Announcement>("SELECT * FROM announcements ORDER BY date DESC, rowid DESC")
        .fetch_all(pool)
        .await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
