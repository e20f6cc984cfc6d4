//! # Telemetry Setup
//!
//! Installs the global `tracing` subscriber used by the binary. Records are
//! rendered as bunyan-style JSON to stdout and to a timestamped file in the
//! configured log directory.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use time::{OffsetDateTime, macros::format_description};
use tracing::Subscriber;
use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

/// Creates the log directory and a new log file named after the current UTC time.
///
/// Returns the open file together with its path.
pub fn create_log_file(log_dir: &Path) -> io::Result<(File, PathBuf)> {
    fs::create_dir_all(log_dir)?;

    let stamp = OffsetDateTime::now_utc()
        .format(format_description!(
            "[month]_[day]_[year]_[hour]_[minute]_[second]"
        ))
        .map_err(io::Error::other)?;

    let path = log_dir.join(format!("{stamp}.log"));
    let file = File::options().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Composes the subscriber: env filter, JSON storage and bunyan formatting.
///
/// `env_filter` is used when `RUST_LOG` is not set.
pub fn get_subscriber<W>(name: String, env_filter: String, sink: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs the global subscriber writing to stdout and a file under `log_dir`.
///
/// Must be called at most once per process.
pub fn init_subscriber(name: &str, env_filter: &str, log_dir: &Path) -> io::Result<PathBuf> {
    let (file, path) = create_log_file(log_dir)?;
    let writer = io::stdout.and(Arc::new(file));

    let subscriber = get_subscriber(name.to_string(), env_filter.to_string(), writer);
    set_global_default(subscriber).map_err(io::Error::other)?;
    Ok(path)
}
