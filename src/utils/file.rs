//! # File Utilities
//!
//! Filesystem helpers used by the ingestion pipeline to persist uploaded documents.

use std::path::Path;

use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, error, trace};

/// Provides file system utilities for upload persistence.
pub struct FileManager;

impl FileManager {
    /// Ensures the specified directory exists, creating it and any missing parents.
    ///
    /// # Arguments
    ///
    /// * `path` - The directory path to ensure exists
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Directory exists or was created successfully
    /// * `Err(std::io::Error)` - Failed to create directory
    pub async fn ensure_directory_exists(path: &Path) -> Result<(), std::io::Error> {
        trace!(path = %path.display(), "Ensuring directory exists");
        fs::create_dir_all(path).await
    }

    /// Writes file data to a path that must not exist yet.
    ///
    /// # Arguments
    ///
    /// * `file_path` - The complete path where the file should be saved
    /// * `data` - The file data to save
    ///
    /// # Returns
    ///
    /// * `Ok(())` - File saved successfully
    /// * `Err(std::io::Error)` - The file already exists or could not be written
    pub async fn save_new_file(file_path: &Path, data: &[u8]) -> Result<(), std::io::Error> {
        debug!(file_path = %file_path.display(), size = data.len(), "Saving file");

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(file_path)
            .await?;

        if let Err(e) = Self::write_all(&mut file, data).await {
            drop(file);
            Self::cleanup_file(file_path).await;
            return Err(e);
        }

        debug!(file_path = %file_path.display(), "File saved successfully");
        Ok(())
    }

    async fn write_all(file: &mut fs::File, data: &[u8]) -> Result<(), std::io::Error> {
        file.write_all(data).await?;
        file.flush().await
    }

    /// Attempts to clean up a partially written file.
    ///
    /// This function logs errors but doesn't return them, as it's used for cleanup
    /// in error scenarios where the original error should be preserved.
    pub async fn cleanup_file(file_path: &Path) {
        if let Err(e) = fs::remove_file(file_path).await {
            error!(
                file_path = %file_path.display(),
                error = %e,
                "Failed to clean up file during error recovery"
            );
        } else {
            debug!(file_path = %file_path.display(), "File cleaned up successfully");
        }
    }
}
