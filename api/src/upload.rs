//! Image hosting collaborator.
//!
//! Handlers only see [`ImageUploader`]. Production talks to Cloudinary's signed
//! upload API; without credentials the data URI itself is stored as the URL.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::CloudinaryConfig;

pub const ALUMNI_PROFILES_FOLDER: &str = "alumni-profiles";
pub const EVENTS_FOLDER: &str = "alumni-events";
pub const GALLERY_FOLDER: &str = "alumni-gallery";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub secure_url: String,
    pub public_id: String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Rejected(String),
}

#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Store `data` (a base64 data URI or remote URL) under `folder`.
    async fn upload(&self, data: &str, folder: &str) -> Result<UploadedImage, UploadError>;
}

pub struct CloudinaryUploader {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_secret: SecretString,
}

#[derive(Deserialize)]
struct CloudinaryResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct CloudinaryErrorBody {
    error: CloudinaryErrorMessage,
}

#[derive(Deserialize)]
struct CloudinaryErrorMessage {
    message: String,
}

impl CloudinaryUploader {
    pub fn new(config: &CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                config.cloud_name
            ),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        }
    }
}

/// SHA-256 request signature: signed params sorted by name, joined as a query
/// string, with the API secret appended.
fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl ImageUploader for CloudinaryUploader {
    async fn upload(&self, data: &str, folder: &str) -> Result<UploadedImage, UploadError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[("folder", folder), ("timestamp", &timestamp)],
            self.api_secret.expose_secret(),
        );

        let form = [
            ("file", data),
            ("folder", folder),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.api_key.as_str()),
            ("signature", signature.as_str()),
            ("signature_algorithm", "sha256"),
        ];

        let response = self.client.post(&self.endpoint).form(&form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<CloudinaryErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => format!("upload failed with status {status}"),
            };
            tracing::warn!(%status, folder, "image upload rejected: {}", message);
            return Err(UploadError::Rejected(message));
        }

        let uploaded: CloudinaryResponse = response.json().await?;
        tracing::debug!(public_id = %uploaded.public_id, folder, "image uploaded");
        Ok(UploadedImage {
            secure_url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }
}

/// Keeps the submitted data as the stored URL.
#[derive(Debug, Default)]
pub struct PassthroughUploader;

#[async_trait]
impl ImageUploader for PassthroughUploader {
    async fn upload(&self, data: &str, _folder: &str) -> Result<UploadedImage, UploadError> {
        Ok(UploadedImage {
            secure_url: data.to_string(),
            public_id: uuid::Uuid::new_v4().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_sorts_params_and_appends_secret() {
        let a = sign(&[("timestamp", "1700000000"), ("folder", "alumni-events")], "s3cr3t");
        let b = sign(&[("folder", "alumni-events"), ("timestamp", "1700000000")], "s3cr3t");
        assert_eq!(a, b);

        let mut hasher = Sha256::new();
        hasher.update(b"folder=alumni-events&timestamp=1700000000s3cr3t");
        assert_eq!(a, hex::encode(hasher.finalize()));
    }

    #[test]
    fn signature_depends_on_secret() {
        let params = [("folder", "alumni-gallery"), ("timestamp", "1")];
        assert_ne!(sign(&params, "one"), sign(&params, "two"));
    }

    #[tokio::test]
    async fn passthrough_keeps_data() {
        let uploaded = PassthroughUploader
            .upload("data:image/png;base64,AAAA", GALLERY_FOLDER)
            .await
            .unwrap();
        assert_eq!(uploaded.secure_url, "data:image/png;base64,AAAA");
        assert!(!uploaded.public_id.is_empty());
    }
}
