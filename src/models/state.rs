use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Settings;
use crate::services::audit::{AuditSink, TracingAuditSink};
use crate::services::ingest::IngestPipeline;

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// Runtime settings loaded at startup.
    pub settings: Settings,
    /// Pipeline used to persist uploaded documents.
    pub pipeline: IngestPipeline,
}

impl AppState {
    /// Creates application state that audits through `tracing`.
    pub fn new(settings: Settings) -> Self {
        Self::with_audit_sink(settings, Arc::new(TracingAuditSink))
    }

    /// Creates application state with a custom audit sink.
    ///
    /// # Arguments
    ///
    /// * `settings` - Runtime settings
    /// * `sink` - Destination of the per-upload audit events
    pub fn with_audit_sink(settings: Settings, sink: Arc<dyn AuditSink>) -> Self {
        info!("Initializing application state");
        debug!(
            upload_dir = %settings.upload_dir.display(),
            max_upload_bytes = settings.max_upload_bytes,
            "Using upload settings"
        );

        Self {
            settings,
            pipeline: IngestPipeline::new(sink),
        }
    }
}
