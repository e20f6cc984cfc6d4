//! # Upload Ingestion Pipeline
//!
//! Saves a batch of uploaded documents into a destination directory.
//!
//! Each upload goes through three stages:
//!
//! 1. **Source adaptation** ([`source`]) - resolve the handle into a name and bytes
//! 2. **Validation & naming** ([`naming`]) - check the extension and mint a unique name
//! 3. **Persistence** ([`crate::utils::file`]) - write the bytes to a new file
//!
//! Uploads with an unsupported extension are skipped and reported to the audit
//! sink. Any other failure aborts the batch; files saved earlier in the same batch
//! are left in place.

pub mod naming;
pub mod source;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::{DocumentPortalError, IngestError};
use crate::services::audit::{AuditEvent, AuditSink, TracingAuditSink};
use crate::utils::file::FileManager;

pub use naming::{AllowedExtensions, SkipReason, ValidatedName};
pub use source::{
    BufferUpload, FrameworkUpload, ResolvedUpload, StreamUpload, UnrecognizedUpload,
    UploadHandle, UploadReader,
};

/// A file written by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub original_name: String,
    pub output_path: PathBuf,
}

/// Non-fatal result of processing one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Saved(SavedFile),
    Skipped(SkipReason),
}

/// The ingestion pipeline, configured with its accepted extensions and audit sink.
#[derive(Clone)]
pub struct IngestPipeline {
    allowed: AllowedExtensions,
    sink: Arc<dyn AuditSink>,
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self::new(Arc::new(TracingAuditSink))
    }
}

impl IngestPipeline {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self {
            allowed: AllowedExtensions::default(),
            sink,
        }
    }

    /// Saves every accepted upload into `target_dir` and returns the saved paths.
    ///
    /// `target_dir` and its missing parents are created first. The returned paths are
    /// absolute and follow input order; skipped uploads have no entry.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentPortalError`] wrapping the first fatal [`IngestError`].
    /// Uploads after the failing one are not processed.
    #[instrument(skip_all, fields(target_dir = %target_dir.display()))]
    pub async fn save_uploaded_files<I>(
        &self,
        uploads: I,
        target_dir: &Path,
    ) -> Result<Vec<PathBuf>, DocumentPortalError>
    where
        I: IntoIterator<Item = UploadHandle>,
    {
        match self.run_batch(uploads, target_dir).await {
            Ok(saved) => Ok(saved),
            Err(e) => {
                self.sink.record(&AuditEvent::BatchFailed {
                    error: e.to_string(),
                    target_dir: target_dir.to_path_buf(),
                });
                Err(DocumentPortalError::new("Failed to save uploaded files", e))
            }
        }
    }

    async fn run_batch<I>(&self, uploads: I, target_dir: &Path) -> Result<Vec<PathBuf>, IngestError>
    where
        I: IntoIterator<Item = UploadHandle>,
    {
        let target_dir = Self::prepare_directory(target_dir).await?;
        let mut saved_files = Vec::new();

        for upload in uploads {
            match self.process_upload(upload, &target_dir).await? {
                ItemOutcome::Saved(file) => saved_files.push(file.output_path),
                ItemOutcome::Skipped(reason) => debug!(%reason, "Upload skipped"),
            }
        }

        debug!(saved = saved_files.len(), "Batch completed");
        Ok(saved_files)
    }

    async fn prepare_directory(target_dir: &Path) -> Result<PathBuf, IngestError> {
        // An empty destination is the current directory.
        let target_dir = if target_dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            target_dir
        };
        let creation_error = |source: std::io::Error| IngestError::DirectoryCreation {
            path: target_dir.to_path_buf(),
            source,
        };

        FileManager::ensure_directory_exists(target_dir)
            .await
            .map_err(creation_error)?;
        std::path::absolute(target_dir).map_err(creation_error)
    }

    /// Adapts, validates and persists a single upload into an existing `target_dir`.
    ///
    /// # Errors
    ///
    /// Every [`IngestError`] variant except `DirectoryCreation` can be returned here.
    pub async fn process_upload(
        &self,
        upload: UploadHandle,
        target_dir: &Path,
    ) -> Result<ItemOutcome, IngestError> {
        let ResolvedUpload { name, data } = upload.resolve().await?;

        let validated = match ValidatedName::validate(&name, &self.allowed) {
            Ok(validated) => validated,
            Err(reason) => {
                self.sink
                    .record(&AuditEvent::UnsupportedFileSkipped { filename: name });
                return Ok(ItemOutcome::Skipped(reason));
            }
        };

        let output_path = validated.output_path(target_dir);
        FileManager::save_new_file(&output_path, &data)
            .await
            .map_err(|source| IngestError::Write {
                path: output_path.clone(),
                source,
            })?;

        self.sink.record(&AuditEvent::FileSaved {
            original_filename: name.clone(),
            saved_as: output_path.clone(),
        });

        Ok(ItemOutcome::Saved(SavedFile {
            original_name: name,
            output_path,
        }))
    }
}

/// Saves `uploads` into `target_dir`, reporting per-item outcomes to `sink`.
///
/// See [`IngestPipeline::save_uploaded_files`].
pub async fn save_uploaded_files<I>(
    uploads: I,
    target_dir: &Path,
    sink: Arc<dyn AuditSink>,
) -> Result<Vec<PathBuf>, DocumentPortalError>
where
    I: IntoIterator<Item = UploadHandle>,
{
    IngestPipeline::new(sink)
        .save_uploaded_files(uploads, target_dir)
        .await
}
