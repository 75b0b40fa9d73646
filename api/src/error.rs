use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{upload::UploadError, validation::ValidationError};

/// Every failure a handler or guard can surface. Rendered as
/// `{"success": false, "message": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{0}")]
    Upload(#[from] UploadError),

    #[error("Password hashing error")]
    PasswordHash(argon2::password_hash::Error),

    #[error("Token error")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl From<ValidationError> for AppError {
    fn from(inner: ValidationError) -> Self {
        AppError::Validation(inner.0)
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(inner: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(inner)
    }
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Sqlx(e) => e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation()),
            _ => false,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Sqlx(_) if self.is_unique_violation() => StatusCode::CONFLICT,
            AppError::Sqlx(_)
            | AppError::Upload(_)
            | AppError::PasswordHash(_)
            | AppError::Jwt(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Sqlx(_) if self.is_unique_violation() => "Email already exists".to_string(),
            AppError::Sqlx(sqlx::Error::Database(db_err)) => db_err.message().to_string(),
            AppError::InvalidBody(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let body = Json(json!({
            "success": false,
            "message": self.message(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            AppError::validation("Missing details").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("Not authorized".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("Invalid or expired token.".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::not_found("Event not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Sqlx(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Upload(UploadError::Rejected("bad image".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_messages_pass_through() {
        let err = AppError::Upload(UploadError::Rejected("Invalid image file".into()));
        assert_eq!(err.message(), "Invalid image file");
    }

    #[tokio::test]
    async fn body_is_a_failure_envelope() {
        let response = AppError::not_found("Alumni not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"success": false, "message": "Alumni not found"}));
    }
}
