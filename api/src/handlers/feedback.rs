use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

use crate::{
    auth::UserAuth, db, error::AppError, models::feedback::FeedbackPayload, AppState,
};

pub async fn add_feedback(
    State(state): State<AppState>,
    UserAuth(identity): UserAuth,
    payload: Result<Json<FeedbackPayload>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;
    let (message, rating) = payload.validate()?;

    db::feedback::insert(&state.db, &identity.id, &message, rating).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Feedback submitted successfully",
    })))
}

pub async fn list_feedback(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let feedback = db::feedback::list_with_authors(&state.db).await?;
    Ok(Json(json!({
        "success": true,
        "count": feedback.len(),
        "feedback": feedback,
    })))
}
