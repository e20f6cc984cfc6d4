//! # Document Upload Handler
//!
//! Accepts a multipart batch of documents and hands it to the ingestion pipeline.
//! Every request is saved into its own session directory under `UPLOAD_DIR`, so
//! concurrent batches never share a destination.

use std::io::Cursor;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::AppState,
    services::ingest::UploadHandle,
};

/// Response structure for a processed upload batch.
#[derive(Serialize)]
pub struct UploadDocumentsResponse {
    pub session_id: Uuid,
    pub files: Vec<String>,
}

/// Uploads a batch of documents.
///
/// POST /api/documents MultipartForm
///
/// Every part carrying a file name is treated as a document; other parts are
/// ignored. Documents with an unsupported extension are skipped and do not appear
/// in the response.
///
/// # File Storage
///
/// Files are stored in `UPLOAD_DIR/{session_id}/{stem}_{suffix}.{ext}`.
///
/// # Returns
///
/// - `200 OK` with `UploadDocumentsResponse` - Batch processed
/// - `400 Bad Request` - Malformed multipart data or no file parts
/// - `413 Payload Too Large` - Body exceeds `MAX_UPLOAD_BYTES`
/// - `500 Internal Server Error` - The batch could not be saved
#[instrument(skip_all, fields(session_id = tracing::field::Empty))]
pub async fn upload_documents(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    debug!("Processing document upload request");

    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!(error = %e, "Error reading multipart form");
        AppError::from(e)
    })? {
        let Some(filename) = field.file_name().map(str::to_owned) else {
            warn!(field_name = ?field.name(), "Ignoring multipart field without a file name");
            continue;
        };
        let content_type = field.content_type().map(str::to_owned);

        let data = field.bytes().await.map_err(|e| {
            error!(error = %e, filename = %filename, "Error reading file data");
            AppError::from(e)
        })?;

        debug!(filename = %filename, size = data.len(), "Received document part");
        uploads.push(UploadHandle::framework(
            Some(filename),
            content_type,
            Cursor::new(data),
        ));
    }

    if uploads.is_empty() {
        warn!("No file provided in multipart form");
        return Err(AppError::BadRequest("No file provided"));
    }

    let session_id = Uuid::new_v4();
    tracing::Span::current().record("session_id", tracing::field::display(session_id));
    let target_dir = state.settings.upload_dir.join(session_id.to_string());

    let received = uploads.len();
    let saved = state
        .pipeline
        .save_uploaded_files(uploads, &target_dir)
        .await?;

    info!(received, saved = saved.len(), "Document batch saved");

    Ok((
        StatusCode::OK,
        Json(UploadDocumentsResponse {
            session_id,
            files: saved
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
        }),
    ))
}
