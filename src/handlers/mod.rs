//! # HTTP Request Handlers
//!
//! This module contains the HTTP request handlers of the document portal.
//!
//! ## Available Handlers
//!
//! - **Health Check** (`health_check`) - Application health monitoring
//! - **Upload Documents** (`upload_documents`) - Multipart document upload

mod health_check;
mod upload_documents;

pub use health_check::*;
pub use upload_documents::*;
