//! # Centralized Error Handling
//!
//! This module provides the error types shared by the ingestion pipeline and the
//! HTTP layer. Pipeline failures are described by [`IngestError`] and surfaced to
//! callers wrapped in a [`DocumentPortalError`]; the HTTP handlers convert those
//! into responses through [`AppError`].

use std::path::PathBuf;

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Fatal conditions that abort an ingestion batch.
///
/// An unsupported file extension is not in this list: it is a local skip and is
/// reported through [`crate::services::ingest::SkipReason`] instead.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("unsupported uploaded file object: {kind}")]
    UnsupportedHandle { kind: String },

    #[error("failed to create directory {}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read upload `{name}`")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Domain error returned by the pipeline entry point.
///
/// Carries a human-readable message together with the original cause, which stays
/// reachable through [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error("{message}: {source}")]
pub struct DocumentPortalError {
    message: String,
    #[source]
    source: IngestError,
}

impl DocumentPortalError {
    pub fn new(message: impl Into<String>, source: IngestError) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying pipeline failure.
    pub fn cause(&self) -> &IngestError {
        &self.source
    }
}

/// Central HTTP error type.
///
/// Ingestion errors are logged here, other variants should be logged at the point
/// of creation if needed.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(&'static str),

    /// A multipart read failure, keeping the status chosen by axum
    /// (for example `413` when the body limit is exceeded).
    #[error("multipart error ({status}): {message}")]
    Multipart {
        status: StatusCode,
        message: &'static str,
    },

    #[error(transparent)]
    Ingest(#[from] DocumentPortalError),
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        let status = e.status();
        let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
            "Payload too large"
        } else {
            "Invalid multipart data"
        };
        AppError::Multipart { status, message }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Ingest(e) = &self {
            error!(error = %e, "Document ingestion failed");
        }

        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, *msg),
            AppError::Multipart { status, message } => (*status, *message),
            AppError::Ingest(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.message()),
        };

        let body = Json(ErrorBody { message });
        (status, body).into_response()
    }
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;
