//! # Application Constants
//!
//! This module defines constants used throughout the document portal: the
//! accepted document types, naming parameters and configuration fallbacks.

/// Document extensions accepted for ingestion, lower-cased with the leading dot.
pub const SUPPORTED_EXTENSIONS: [&str; 11] = [
    ".pdf", ".docx", ".txt", ".pptx", ".md", ".csv", ".xlsx", ".xls", ".db", ".sqlite", ".sqlite3",
];

/// Name used when an upload does not report one.
pub const FALLBACK_FILENAME: &str = "file";

/// Number of hex characters of the random identifier appended to saved file stems.
pub const UNIQUE_SUFFIX_LEN: usize = 8;

/// Fallback root directory for uploaded batches.
pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";

/// Fallback directory for log files.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Fallback listen address for the HTTP server.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8090";

/// Fallback request body limit for multipart uploads.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
