use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

use super::{persisted, upload_image};
use crate::{
    auth::UserAuth,
    db,
    error::AppError,
    models::user::ProfileUpdate,
    upload::ALUMNI_PROFILES_FOLDER,
    AppState,
};

pub async fn get_profile(
    State(state): State<AppState>,
    UserAuth(identity): UserAuth,
) -> Result<Json<Value>, AppError> {
    let user = db::users::find_by_id(&state.db, &identity.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found."))?;

    Ok(Json(json!({
        "success": true,
        "message": "User profile fetched successfully.",
        "user": user,
    })))
}

/// Only a `data:image/...` profile image is uploaded. Anything else in that
/// field leaves the stored image alone.
pub async fn update_profile(
    State(state): State<AppState>,
    UserAuth(identity): UserAuth,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(update) = payload?;

    let new_image = update
        .profile_image
        .as_deref()
        .filter(|img| img.starts_with("data:image"));
    let uploaded = upload_image(&state, new_image, ALUMNI_PROFILES_FOLDER).await?;

    let result = db::users::update_profile(
        &state.db,
        &identity.id,
        &update,
        uploaded.as_ref().map(|u| u.secure_url.as_str()),
    )
    .await;
    let user = persisted(result, uploaded.as_ref())?
        .ok_or_else(|| AppError::not_found("User not found."))?;

    Ok(Json(json!({
        "success": true,
        "message": "Profile updated successfully",
        "user": user,
    })))
}

/// Directory listing. Password hashes never serialize.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let users = db::users::list(&state.db).await?;
    Ok(Json(json!({ "success": true, "users": users })))
}
