use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::{persisted, upload_image};
use crate::{
    auth::{AdminAuth, UserAuth},
    db,
    error::AppError,
    models::alumni::{
        Alumni, AlumniFilter, AlumniListQuery, AlumniPage, AlumniPayload, AlumniSearchQuery,
        AlumniSearchResults, Page, DEFAULT_PAGE_SIZE,
    },
    upload::ALUMNI_PROFILES_FOLDER,
    AppState,
};

const SEARCH_PAGE_SIZE: i64 = 10;

pub async fn create(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    payload: Result<Json<AlumniPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(payload) = payload?;
    let payload = payload.normalized();

    let uploaded = upload_image(&state, payload.image.as_deref(), ALUMNI_PROFILES_FOLDER).await?;
    let result = db::alumni::insert(
        &state.db,
        &payload,
        uploaded.as_ref().map(|u| u.secure_url.as_str()),
    )
    .await;
    let alumni = persisted(result, uploaded.as_ref())?;
    tracing::info!(alumni_id = %alumni.id, "alumni created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Alumni created successfully",
            "alumni": alumni,
        })),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AlumniListQuery>,
) -> Result<Json<AlumniPage>, AppError> {
    let filter = AlumniFilter::from(&query);
    let page = Page::parse(query.page.as_deref(), query.limit.as_deref(), DEFAULT_PAGE_SIZE);

    let (alumni, total) = db::alumni::list(&state.db, &filter, page).await?;

    Ok(Json(AlumniPage {
        total,
        page: page.number,
        page_size: page.size,
        alumni,
    }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Alumni>, AppError> {
    db::alumni::find_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Alumni not found"))
}

pub async fn update(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    Path(id): Path<String>,
    payload: Result<Json<AlumniPayload>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;
    let payload = payload.normalized();

    let uploaded = upload_image(&state, payload.image.as_deref(), ALUMNI_PROFILES_FOLDER).await?;
    let result = db::alumni::update(
        &state.db,
        &id,
        &payload,
        uploaded.as_ref().map(|u| u.secure_url.as_str()),
    )
    .await;
    let alumni = persisted(result, uploaded.as_ref())?
        .ok_or_else(|| AppError::not_found("Alumni not found"))?;

    Ok(Json(json!({
        "success": true,
        "message": "Alumni updated successfully",
        "alumni": alumni,
    })))
}

/// Succeeds whether or not the record existed.
pub async fn delete(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let removed = db::alumni::delete(&state.db, &id).await?;
    tracing::debug!(alumni_id = %id, removed, "alumni delete");
    Ok(Json(json!({
        "success": true,
        "message": "Alumni deleted successfully",
    })))
}

/// Name / year / course search with a fixed page size.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<AlumniSearchQuery>,
) -> Result<Json<AlumniSearchResults>, AppError> {
    let filter = AlumniFilter::try_from(&query)?;
    let page = Page::parse(query.page.as_deref(), None, SEARCH_PAGE_SIZE);

    let (results, total) = db::alumni::list(&state.db, &filter, page).await?;
    Ok(Json(AlumniSearchResults { results, total }))
}

/// The same search for signed-in users.
pub async fn search_for_user(
    state: State<AppState>,
    _user: UserAuth,
    query: Query<AlumniSearchQuery>,
) -> Result<Json<AlumniSearchResults>, AppError> {
    search(state, query).await
}
