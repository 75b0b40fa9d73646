use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

use super::{persisted, upload_image};
use crate::{
    auth::{password::hash_password, AdminAuth},
    db,
    error::AppError,
    models::admin::{AdminProfile, AdminProfileUpdate},
    upload::ALUMNI_PROFILES_FOLDER,
    validation::{normalize_email, present},
    AppState,
};

pub async fn get_profile(
    State(state): State<AppState>,
    AdminAuth(identity): AdminAuth,
) -> Result<Json<AdminProfile>, AppError> {
    let record = db::admins::find_by_email(&state.db, &normalize_email(&identity.email)).await?;
    Ok(Json(AdminProfile::new(identity.email, record)))
}

/// The stored record is keyed by the configured admin email, so the email
/// itself is not editable here. A new password is stored hashed; login keeps
/// using the configured password.
pub async fn update_profile(
    State(state): State<AppState>,
    AdminAuth(identity): AdminAuth,
    payload: Result<Json<AdminProfileUpdate>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(update) = payload?;

    let password_hash = match present(&update.password) {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };
    let uploaded = upload_image(&state, update.profile_image.as_deref(), ALUMNI_PROFILES_FOLDER).await?;

    let result = db::admins::upsert_profile(
        &state.db,
        &normalize_email(&identity.email),
        present(&update.name),
        password_hash.as_deref(),
        uploaded.as_ref().map(|u| u.secure_url.as_str()),
    )
    .await;
    let admin = persisted(result, uploaded.as_ref())?;

    Ok(Json(json!({
        "success": true,
        "message": "Profile updated successfully",
        "admin": admin,
    })))
}
