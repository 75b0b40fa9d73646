use chrono::Utc;
use sqlx::{types::Json, SqlitePool};

use super::new_id;
use crate::models::user::{ProfileUpdate, User};

/// Insert a user. Fails with a unique violation if the email is taken.
pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, User>(
        "INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at) \
         VALUES (?, ?, ?, ?, 'user', ?, ?) RETURNING *",
    )
    .bind(new_id())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC, rowid ASC")
        .fetch_all(pool)
        .await
}

/// Apply the supplied fields, leaving absent ones untouched. `None` if no such
/// user.
pub async fn update_profile(
    pool: &SqlitePool,
    id: &str,
    update: &ProfileUpdate,
    profile_image: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    let achievements = update
        .achievements
        .clone()
        .map(|list| Json(list.into_vec()));

    sqlx::query_as::<_, User>(
        "UPDATE users SET \
            name = COALESCE(?, name), \
            dob = COALESCE(?, dob), \
            gender = COALESCE(?, gender), \
            phone = COALESCE(?, phone), \
            year_of_passing = COALESCE(?, year_of_passing), \
            cgpa = COALESCE(?, cgpa), \
            batch = COALESCE(?, batch), \
            course = COALESCE(?, course), \
            degree = COALESCE(?, degree), \
            department = COALESCE(?, department), \
            current_company = COALESCE(?, current_company), \
            position = COALESCE(?, position), \
            achievements = COALESCE(?, achievements), \
            linked_in = COALESCE(?, linked_in), \
            github = COALESCE(?, github), \
            profile_image = COALESCE(?, profile_image), \
            updated_at = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(update.name.as_deref())
    .bind(update.dob.as_deref())
    .bind(update.gender.as_deref())
    .bind(update.phone.as_deref())
    .bind(update.year_of_passing)
    .bind(update.cgpa)
    .bind(update.batch.as_deref())
    .bind(update.course.as_deref())
    .bind(update.degree.as_deref())
    .bind(update.department.as_deref())
    .bind(update.current_company.as_deref())
    .bind(update.position.as_deref())
    .bind(achievements)
    .bind(update.linked_in.as_deref())
    .bind(update.github.as_deref())
    .bind(profile_image)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}
