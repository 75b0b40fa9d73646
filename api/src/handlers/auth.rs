use axum::{extract::rejection::JsonRejection, extract::State, Json};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{
    auth::password::{hash_password, verify_password},
    db,
    error::AppError,
    models::{
        admin::AdminLoginPayload,
        user::{LoginPayload, RegisterPayload, UserSummary},
    },
    AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub auth_header: String,
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterPayload>, JsonRejection>,
) -> Result<Json<RegisterResponse>, AppError> {
    let Json(payload) = payload?;
    let new_user = payload.validate()?;

    let password_hash = hash_password(&new_user.password)?;
    let user = db::users::insert(&state.db, &new_user.name, &new_user.email, &password_hash).await?;

    let token = state.tokens.issue_user_token(&user.id)?;
    tracing::info!(user_id = %user.id, "user registered");

    Ok(Json(RegisterResponse {
        success: true,
        token,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) = payload?;
    let (email, password) = payload.validate()?;

    let user = db::users::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = state.tokens.issue_user_token(&user.id)?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        user: UserSummary::from(&user),
    }))
}

fn invalid_admin_credentials() -> AppError {
    AppError::Unauthorized("Invalid Credentials".into())
}

/// Compares against the configured pair. Both comparisons always run and
/// every failure, an unreadable body included, yields the same response.
pub async fn admin_login(
    State(state): State<AppState>,
    payload: Result<Json<AdminLoginPayload>, JsonRejection>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::warn!("admin login failed: {}", rejection.body_text());
            return Err(invalid_admin_credentials());
        }
    };
    let admin = &state.config.admin;

    let email_matches = payload.email == admin.email;
    let password_matches = payload.password == admin.password.expose_secret();
    if !(email_matches & password_matches) {
        tracing::warn!("admin login failed");
        return Err(invalid_admin_credentials());
    }

    let token = state.tokens.issue_admin_token(&payload.email)?;

    Ok(Json(AdminLoginResponse {
        success: true,
        message: "Login successful".to_string(),
        auth_header: format!("Bearer {token}"),
        token,
    }))
}
