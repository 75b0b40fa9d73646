use chrono::Utc;
use sqlx::SqlitePool;

use super::new_id;
use crate::models::gallery::GalleryItem;

pub async fn insert(
    pool: &SqlitePool,
    image: &str,
    description: &str,
    public_id: &str,
    user_id: Option<&str>,
) -> Result<GalleryItem, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, GalleryItem>(
        "INSERT INTO gallery (id, image, description, public_id, user_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(image)
    .bind(description)
    .bind(public_id)
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Newest first.
pub async fn list(pool: &SqlitePool) -> Result<Vec<GalleryItem>, sqlx::Error> {
    sqlx::query_as::<_, GalleryItem>("SELECT * FROM gallery ORDER BY created_at DESC, rowid DESC")
        .fetch_all(pool)
        .await
}
