//! # Docportal - Document Upload Ingestion
//!
//! ## Modules
//!
//! - [`handlers`] - HTTP request handlers
//! - [`services`] - Upload ingestion pipeline and audit trail
//! - [`config`] - Environment-driven settings
//! - [`telemetry`] - Logging setup for the binary
//! - [`utils`] - Constants and filesystem helpers

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{health_check, upload_documents};
use crate::models::AppState;

/// Creates an Axum router with application routes and state.
///
/// # Arguments
///
/// * `state` - Shared application state holding settings and the ingestion pipeline
///
/// # Returns
///
/// A configured Axum router with all application routes and middleware
pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state.settings.max_upload_bytes;

    Router::new()
        .route("/health-check", get(health_check))
        .route("/api/documents", post(upload_documents))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
