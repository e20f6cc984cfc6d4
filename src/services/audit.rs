//! # Audit Trail
//!
//! Structured per-item and per-batch events emitted by the ingestion pipeline.
//! The pipeline writes to an [`AuditSink`] handed to it by the caller and never
//! reads back from it.
//!
//! ## Implementations
//!
//! - [`TracingAuditSink`] - Forwards events to `tracing` at the matching level
//! - [`NoopAuditSink`] - Discards events

use std::fmt;
use std::path::PathBuf;

use tracing::{error, info, warn};

/// Severity attached to an [`AuditEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuditLevel::Info => "info",
            AuditLevel::Warning => "warning",
            AuditLevel::Error => "error",
        };
        f.write_str(s)
    }
}

/// An observable outcome of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEvent {
    /// An upload was skipped because its extension is not accepted.
    UnsupportedFileSkipped { filename: String },
    /// An upload was written to disk.
    FileSaved {
        original_filename: String,
        saved_as: PathBuf,
    },
    /// The batch was aborted.
    BatchFailed { error: String, target_dir: PathBuf },
}

impl AuditEvent {
    pub fn level(&self) -> AuditLevel {
        match self {
            AuditEvent::UnsupportedFileSkipped { .. } => AuditLevel::Warning,
            AuditEvent::FileSaved { .. } => AuditLevel::Info,
            AuditEvent::BatchFailed { .. } => AuditLevel::Error,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuditEvent::UnsupportedFileSkipped { .. } => "Unsupported file skipped",
            AuditEvent::FileSaved { .. } => "File saved successfully",
            AuditEvent::BatchFailed { .. } => "Failed to save uploaded files",
        }
    }
}

/// Write-only destination for audit events.
///
/// Recording is infallible from the pipeline's point of view: an implementation
/// that cannot deliver an event must swallow the failure itself.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &AuditEvent);
}

/// Audit sink that emits events as structured `tracing` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: &AuditEvent) {
        let message = event.message();
        match event {
            AuditEvent::UnsupportedFileSkipped { filename } => {
                warn!(filename = %filename, "{message}");
            }
            AuditEvent::FileSaved {
                original_filename,
                saved_as,
            } => {
                info!(
                    original_filename = %original_filename,
                    saved_as = %saved_as.display(),
                    "{message}"
                );
            }
            AuditEvent::BatchFailed { error, target_dir } => {
                error!(
                    error = %error,
                    target_dir = %target_dir.display(),
                    "{message}"
                );
            }
        }
    }
}

/// Audit sink for callers that have no logger attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}
