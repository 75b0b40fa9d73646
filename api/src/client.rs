//! HTTP client for the API that keeps the local login session.
//!
//! Paths under `/admin` carry the admin token, everything else the user token.
//! When the server answers with an expired or invalid token the matching half
//! of the session is dropped and the caller is told where to log in again.

use std::sync::{Mutex, MutexGuard};

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    handlers::auth::{AdminLoginResponse, LoginResponse, RegisterResponse},
    models::user::UserSummary,
};

/// Where the front end sends someone whose admin session ended.
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
/// Where the front end sends someone whose user session ended.
pub const USER_LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Tokens and identity held between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub admin_token: Option<String>,
    pub user_token: Option<String>,
    pub user: Option<UserSummary>,
    pub role: Option<Role>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Server not reachable: {0}")]
    Unreachable(reqwest::Error),

    #[error("session expired, log in again at {login_path}")]
    SessionExpired { login_path: &'static str },

    #[error("request failed with {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("unexpected response body: {0}")]
    Decode(reqwest::Error),
}

/// True for `/admin...` and anything with an `/admin/` segment.
pub fn is_admin_path(path: &str) -> bool {
    path.starts_with("/admin") || path.contains("/admin/")
}

fn is_session_failure(status: StatusCode, message: &str) -> bool {
    let message = message.to_lowercase();
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        && (message.contains("token")
            || message.contains("expired")
            || message.contains("unauthorized"))
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Mutex<Session>,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `https://host/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_session(base_url, Session::default())
    }

    pub fn with_session(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: Mutex::new(session),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn session(&self) -> Session {
        self.lock().clone()
    }

    /// The token a request to `path` would carry.
    pub fn token_for(&self, path: &str) -> Option<String> {
        let session = self.lock();
        if is_admin_path(path) {
            session.admin_token.clone()
        } else {
            session.user_token.clone()
        }
    }

    fn clear_for(&self, path: &str) -> &'static str {
        let mut session = self.lock();
        session.role = None;
        if is_admin_path(path) {
            session.admin_token = None;
            ADMIN_LOGIN_PATH
        } else {
            session.user_token = None;
            session.user = None;
            USER_LOGIN_PATH
        }
    }

    /// Send a request and decode a successful JSON response.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.token_for(path) {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ClientError::Unreachable)?;
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(ClientError::Decode);
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("message").and_then(Value::as_str).map(String::from))
            .unwrap_or_default();

        if is_session_failure(status, &message) {
            let login_path = self.clear_for(path);
            tracing::info!(%status, login_path, "session ended by server");
            return Err(ClientError::SessionExpired { login_path });
        }

        Err(ClientError::Api { status, message })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request::<T, Value>(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request::<T, Value>(Method::DELETE, path, None).await
    }

    pub async fn admin_login(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let response: AdminLoginResponse = self
            .post("/admin/login", &json!({ "email": email, "password": password }))
            .await?;
        let mut session = self.lock();
        session.admin_token = Some(response.token);
        session.role = Some(Role::Admin);
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserSummary, ClientError> {
        let response: LoginResponse = self
            .post("/user/login", &json!({ "email": email, "password": password }))
            .await?;
        let mut session = self.lock();
        session.user_token = Some(response.token);
        session.user = Some(response.user.clone());
        session.role = Some(Role::User);
        Ok(response.user)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), ClientError> {
        let response: RegisterResponse = self
            .post(
                "/user/register",
                &json!({ "name": name, "email": email, "password": password }),
            )
            .await?;
        let mut session = self.lock();
        session.user_token = Some(response.token);
        session.role = Some(Role::User);
        Ok(())
    }
}
