use std::sync::Arc;

use docportal::{app, config::Settings, models::AppState, telemetry};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    // Install logging first so configuration fallbacks are recorded.
    let log_dir = Settings::log_dir_from_env();
    let log_file = telemetry::init_subscriber("docportal", "info", &log_dir)?;
    info!(log_file = %log_file.display(), "Logging initialized");

    let settings = Settings::from_env();

    let listener = TcpListener::bind(settings.bind_address.as_str()).await?;
    info!("Server starting at http://{}", settings.bind_address);

    let state = Arc::new(AppState::new(settings));
    axum::serve(listener, app(state).into_make_service()).await
}
