//! AlumEase: alumni records, events, announcements and gallery behind a
//! JSON API with separate admin and user bearer tokens.

pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod rest;
pub mod upload;
pub mod validation;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{auth::TokenIssuer, config::Config, upload::ImageUploader};

/// Shared by every request. Nothing in here changes after startup.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub tokens: Arc<TokenIssuer>,
    pub uploader: Arc<dyn ImageUploader>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config, uploader: Arc<dyn ImageUploader>) -> Self {
        let tokens = TokenIssuer::new(&config.jwt_secret);
        Self {
            db,
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            uploader,
        }
    }
}
