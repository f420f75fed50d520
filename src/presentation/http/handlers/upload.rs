//! Upload Handlers

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Extension, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::application::dto::response::UploadResponse;
use crate::domain::is_image;
use crate::infrastructure::metrics;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Name of the multipart part carrying the file
pub const FILE_FIELD: &str = "file";

/// Upload an image
///
/// Expects `multipart/form-data` with the image in the `file` part.
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let max_bytes = state.settings.storage.max_upload_bytes;

    let (content_type, bytes) = read_file_field(&mut multipart).await?;

    if !is_image(&content_type) {
        return Err(AppError::UnsupportedMediaType(format!(
            "Only images can be uploaded, got {}",
            content_type
        )));
    }
    if bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    if bytes.len() > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File exceeds {} bytes",
            max_bytes
        )));
    }

    let size = bytes.len();
    let reference = match state.storage.store(bytes, &content_type).await {
        Ok(reference) => reference,
        Err(e) => {
            metrics::record_upload(false);
            warn!(subject = %auth.subject(), error = %e, "Upload failed");
            return Err(AppError::Storage(e));
        }
    };
    metrics::record_upload(true);

    info!(
        file_id = %reference.id,
        content_type = %content_type,
        size,
        subject = %auth.subject(),
        "File uploaded"
    );

    Ok((StatusCode::CREATED, Json(UploadResponse::from(reference))))
}

/// Find the `file` part and read it whole.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".into());
        let bytes = field.bytes().await?;

        return Ok((content_type, bytes));
    }

    Err(AppError::BadRequest(format!(
        "Missing multipart field \"{}\"",
        FILE_FIELD
    )))
}
