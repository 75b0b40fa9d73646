use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::persisted;
use crate::{
    auth::AdminAuth,
    db,
    error::AppError,
    models::gallery::GalleryPayload,
    upload::GALLERY_FOLDER,
    validation::present,
    AppState,
};

pub async fn add_item(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    payload: Result<Json<GalleryPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(payload) = payload?;
    let image = present(&payload.image).ok_or_else(|| AppError::validation("Image is required."))?;

    let uploaded = state.uploader.upload(image, GALLERY_FOLDER).await?;
    let result = db::gallery::insert(
        &state.db,
        &uploaded.secure_url,
        payload.description.as_deref().unwrap_or_default(),
        &uploaded.public_id,
        None,
    )
    .await;
    let item = persisted(result, Some(&uploaded))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Image uploaded successfully.",
            "galleryItem": item,
        })),
    ))
}

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let items = db::gallery::list(&state.db).await?;
    tracing::debug!(count = items.len(), "gallery items fetched");

    Ok(Json(json!({
        "message": "Gallery items fetched successfully.",
        "galleryItems": items,
    })))
}
