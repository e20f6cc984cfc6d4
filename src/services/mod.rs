//! # Business Logic Services
//!
//! This module contains the core services of the document portal.
//!
//! ## Available Services
//!
//! - **Ingest** (`ingest`) - Validates uploaded documents and saves them to disk
//! - **Audit** (`audit`) - Structured trail of accepted, skipped and failed uploads

pub mod audit;
pub mod ingest;
