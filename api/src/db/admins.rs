use chrono::Utc;
use sqlx::SqlitePool;

use super::new_id;
use crate::models::admin::Admin;

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Create the profile on first write, then patch supplied fields.
pub async fn upsert_profile(
    pool: &SqlitePool,
    email: &str,
    name: Option<&str>,
    password_hash: Option<&str>,
    profile_image: Option<&str>,
) -> Result<Admin, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Admin>(
        "INSERT INTO admins (id, name, email, password_hash, profile_image, role, created_at, updated_at) \
         VALUES (?, COALESCE(?, 'Admin'), ?, ?, COALESCE(?, ''), 'admin', ?, ?) \
         ON CONFLICT (email) DO UPDATE SET \
            name = COALESCE(?, admins.name), \
            password_hash = COALESCE(?, admins.password_hash), \
            profile_image = COALESCE(?, admins.profile_image), \
            updated_at = excluded.updated_at \
         RETURNING *",
    )
    .bind(new_id())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(profile_image)
    .bind(now)
    .bind(now)
    .bind(name)
    .bind(password_hash)
    .bind(profile_image)
    .fetch_one(pool)
    .await
}
