#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex, Once};

use docportal::{
    config::Settings,
    models::AppState,
    services::audit::{AuditEvent, AuditLevel, AuditSink},
};
use tokio::net::TcpListener;

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("docportal=debug")
            .with_test_writer()
            .init();
    });
}

/// An audit sink that stores every recorded event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded events
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Count recorded events of the given level
    pub fn count_level(&self, level: AuditLevel) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.level() == level)
            .count()
    }
}

impl AuditSink for RecordingSink {
    fn record(&self, event: &AuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Settings pointing every directory at `root`.
pub fn test_settings(root: &Path) -> Settings {
    Settings {
        upload_dir: root.join("uploads"),
        log_dir: root.join("logs"),
        bind_address: "127.0.0.1:0".to_string(),
        ..Settings::default()
    }
}

/// Spawns the application and returns its address and recording sink.
pub async fn spawn_app(settings: Settings) -> (String, Arc<RecordingSink>) {
    init_tracing_once();

    let sink = Arc::new(RecordingSink::new());
    let state = Arc::new(AppState::with_audit_sink(settings, sink.clone()));

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");

    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let app = docportal::app(state);
        axum::serve(listener, app).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{}", port);
    (address, sink)
}
