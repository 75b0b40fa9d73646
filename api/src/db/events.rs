use chrono::Utc;
use sqlx::SqlitePool;

use super::new_id;
use crate::models::event::{Event, EventChanges, NewEvent};

/// `image` is the hosted URL, not the submitted payload.
pub async fn insert(pool: &SqlitePool, event: &NewEvent, image: &str) -> Result<Event, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Event>(
        "INSERT INTO events (id, image, title, description, start_date, end_date, venue, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(image)
    .bind(&event.title)
    .bind(&event.description)
    .bind(event.start_date)
    .bind(event.end_date)
    .bind(&event.venue)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY created_at ASC, rowid ASC")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    changes: &EventChanges,
) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "UPDATE events SET \
            image = COALESCE(?, image), \
            title = COALESCE(?, title), \
            description = COALESCE(?, description), \
            start_date = COALESCE(?, start_date), \
            end_date = COALESCE(?, end_date), \
            venue = COALESCE(?, venue), \
            updated_at = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(changes.image.as_deref())
    .bind(changes.title.as_deref())
    .bind(changes.description.as_deref())
    .bind(changes.start_date)
    .bind(changes.end_date)
    .bind(changes.venue.as_deref())
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
