use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    auth::AdminAuth,
    db,
    error::AppError,
    models::announcement::{Announcement, AnnouncementPayload},
    validation::{parse_date, present},
    AppState,
};

/// Missing title or message is rejected by the store.
pub async fn create(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    payload: Result<Json<AnnouncementPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Announcement>), AppError> {
    let Json(payload) = payload?;

    let date = match present(&payload.date) {
        Some(raw) => parse_date(raw).ok_or_else(|| AppError::validation("Invalid date"))?,
        None => chrono::Utc::now(),
    };

    let announcement = db::announcements::insert(
        &state.db,
        payload.title.as_deref(),
        payload.message.as_deref(),
        date,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(announcement)))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Announcement>>, AppError> {
    Ok(Json(db::announcements::list(&state.db).await?))
}

/// Reports success even when nothing matched the id.
// TODO: return 404 when nothing was removed.
pub async fn delete(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let removed = db::announcements::delete(&state.db, &id).await?;
    tracing::debug!(announcement_id = %id, removed, "announcement delete");

    Ok(Json(json!({
        "success": true,
        "message": "Announcement deleted successfully",
    })))
}
