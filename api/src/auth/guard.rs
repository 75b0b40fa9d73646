//! Request guards for admin- and user-scoped routes.
//!
//! Both read `Authorization: Bearer <token>`. Neither touches the store: the
//! admin guard compares the token's email with the configured admin email, the
//! user guard only checks that the token is a validly signed user token.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use serde::Serialize;

use super::token::TokenClaims;
use crate::{error::AppError, AppState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminIdentity {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    pub id: String,
}

/// Extractor for admin-only handlers.
pub struct AdminAuth(pub AdminIdentity);

/// Extractor for handlers scoped to a signed-in user.
pub struct UserAuth(pub UserIdentity);

/// The token from a well-formed bearer header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.split(' ').next()?;
    (!token.is_empty()).then_some(token)
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".into()))?;

        let claims = state.tokens.decode(token).map_err(|e| {
            tracing::debug!("admin token rejected: {}", e);
            AppError::Unauthorized("Not authorized, token failed".into())
        })?;

        match claims {
            TokenClaims::Admin(claims) if claims.email == state.config.admin.email => {
                Ok(AdminAuth(AdminIdentity {
                    email: claims.email,
                }))
            }
            _ => Err(AppError::Unauthorized("Not authorized".into())),
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Access denied. No token provided.".into()))?;

        match state.tokens.decode(token) {
            Ok(TokenClaims::User(claims)) => Ok(UserAuth(UserIdentity { id: claims.id })),
            Ok(TokenClaims::Admin(_)) => {
                Err(AppError::Forbidden("Invalid or expired token.".into()))
            }
            Err(e) => {
                tracing::debug!("user token rejected: {}", e);
                Err(AppError::Forbidden("Invalid or expired token.".into()))
            }
        }
    }
}
