pub mod admin;
pub mod alumni;
pub mod announcements;
pub mod auth;
pub mod events;
pub mod feedback;
pub mod gallery;
pub mod users;

use crate::{
    error::AppError,
    upload::UploadedImage,
    AppState,
};

/// Hand `data` to the upload collaborator when there is any.
pub(crate) async fn upload_image(
    state: &AppState,
    data: Option<&str>,
    folder: &str,
) -> Result<Option<UploadedImage>, AppError> {
    match data.map(str::trim).filter(|d| !d.is_empty()) {
        Some(data) => Ok(Some(state.uploader.upload(data, folder).await?)),
        None => Ok(None),
    }
}

/// Upload and persist are not transactional. When the write fails after an
/// upload the hosted asset is left behind; record which one.
pub(crate) fn persisted<T>(
    result: Result<T, sqlx::Error>,
    uploaded: Option<&UploadedImage>,
) -> Result<T, AppError> {
    result.map_err(|e| {
        if let Some(image) = uploaded {
            tracing::warn!(
                public_id = %image.public_id,
                "write failed after upload, hosted image orphaned: {}",
                e
            );
        }
        AppError::from(e)
    })
}
