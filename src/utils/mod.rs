//! # Utility Modules
//!
//! This module contains constants and filesystem helpers used throughout the
//! document portal.
//!
//! ## Available Utilities
//!
//! - **Constants** (`constant`) - Accepted document types and configuration fallbacks
//! - **File** (`file`) - Directory creation and file persistence

pub mod constant;
pub mod file;
