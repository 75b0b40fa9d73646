//! Process configuration loaded once from the environment.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JWT_SECRET` - Shared HS256 signing secret for every bearer token
//! - `ADMIN_EMAIL` - Email the admin logs in with
//! - `ADMIN_PASSWORD` - Password the admin logs in with
//!
//! ## Optional
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://alumease.db?mode=rwc`)
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 8000)
//! - `CORS_ORIGINS` - Comma separated allowed origins
//! - `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET` -
//!   Image hosting credentials. All three or none.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://alumease.db?mode=rwc";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "https://alumease.onrender.com";
const RECOMMENDED_SECRET_LENGTH: usize = 32;

/// Largest accepted request body. Base64 images travel inline in JSON.
pub const BODY_LIMIT_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Immutable application configuration, shared by reference after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub jwt_secret: SecretString,
    pub admin: AdminCredentials,
    pub cors_origins: Vec<String>,
    pub cloudinary: Option<CloudinaryConfig>,
}

/// The single admin login pair.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: SecretString,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require =
            |key: &str| get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let jwt_secret = require("JWT_SECRET")?;
        if jwt_secret.len() < RECOMMENDED_SECRET_LENGTH {
            tracing::warn!(
                "JWT_SECRET is shorter than {} characters",
                RECOMMENDED_SECRET_LENGTH
            );
        }

        let host = match get("HOST") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("HOST".into(), format!("{e}")))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("PORT".into(), format!("{e}")))?,
            None => DEFAULT_PORT,
        };

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let cloudinary = match (
            get("CLOUDINARY_CLOUD_NAME"),
            get("CLOUDINARY_API_KEY"),
            get("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryConfig {
                cloud_name,
                api_key,
                api_secret: SecretString::from(api_secret),
            }),
            (None, None, None) => None,
            _ => {
                return Err(ConfigError::InvalidEnvVar(
                    "CLOUDINARY_*".into(),
                    "cloud name, api key and api secret must be set together".into(),
                ))
            }
        };

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            host,
            port,
            jwt_secret: SecretString::from(jwt_secret),
            admin: AdminCredentials {
                email: require("ADMIN_EMAIL")?,
                password: SecretString::from(require("ADMIN_PASSWORD")?),
            },
            cors_origins,
            cloudinary,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
