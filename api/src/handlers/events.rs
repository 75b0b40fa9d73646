use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::{persisted, upload_image};
use crate::{
    auth::AdminAuth,
    db,
    error::AppError,
    models::event::{Event, EventPayload},
    upload::EVENTS_FOLDER,
    validation::is_data_uri,
    AppState,
};

pub async fn create(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(payload) = payload?;
    let event = payload.validate_new()?;

    let uploaded = state.uploader.upload(&event.image, EVENTS_FOLDER).await?;
    let result = db::events::insert(&state.db, &event, &uploaded.secure_url).await;
    let event = persisted(result, Some(&uploaded))?;
    tracing::info!(event_id = %event.id, "event created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Event created successfully",
            "event": event,
        })),
    ))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(db::events::list(&state.db).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    db::events::find_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Event not found"))
}

/// Partial update. A new image given as a data URI is uploaded; a plain URL is
/// stored as is.
pub async fn update(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    Path(id): Path<String>,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> Result<Json<Event>, AppError> {
    let Json(payload) = payload?;
    let mut changes = payload.validate_changes()?;

    let new_image = payload.image.as_deref().filter(|img| !img.trim().is_empty());
    let uploaded = match new_image {
        Some(data) if is_data_uri(data) => upload_image(&state, Some(data), EVENTS_FOLDER).await?,
        _ => None,
    };
    changes.image = match &uploaded {
        Some(image) => Some(image.secure_url.clone()),
        None => new_image.map(String::from),
    };

    let result = db::events::update(&state.db, &id, &changes).await;
    persisted(result, uploaded.as_ref())?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Event not found"))
}

pub async fn delete(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    if db::events::delete(&state.db, &id).await? == 0 {
        return Err(AppError::not_found("Event not found"));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Event deleted successfully",
    })))
}
