//! # Runtime Configuration
//!
//! Settings are read once from the environment at startup and passed explicitly to
//! the components that need them. Missing or malformed values fall back to the
//! defaults in [`crate::utils::constant`] with a logged error.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{error, warn};

use crate::utils::constant::*;

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root directory; every upload batch gets its own subdirectory.
    pub upload_dir: PathBuf,
    /// Directory receiving the JSON log files.
    pub log_dir: PathBuf,
    /// Socket address the HTTP server binds to.
    pub bind_address: String,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Settings {
    /// Builds settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `UPLOAD_DIR` - Root directory for saved uploads (default `./uploads`)
    /// - `LOG_DIR` - Directory for log files (default `logs`)
    /// - `BIND_ADDRESS` - Listen address (default `0.0.0.0:8090`)
    /// - `MAX_UPLOAD_BYTES` - Request body limit (default 50 MiB)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads only `LOG_DIR`.
    ///
    /// Logging has to be set up before [`Settings::from_env`] runs, otherwise its
    /// fallback messages are lost.
    pub fn log_dir_from_env() -> PathBuf {
        Self::log_dir_from_lookup(&|key: &str| env::var(key).ok())
    }

    fn log_dir_from_lookup<F>(lookup: &F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        PathBuf::from(lookup("LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()))
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let upload_dir = lookup("UPLOAD_DIR").unwrap_or_else(|| {
            error!("Missing UPLOAD_DIR env var, using fallback '{DEFAULT_UPLOAD_DIR}'");
            DEFAULT_UPLOAD_DIR.to_string()
        });

        let log_dir = Self::log_dir_from_lookup(&lookup);

        let bind_address = lookup("BIND_ADDRESS").unwrap_or_else(|| {
            warn!("Missing BIND_ADDRESS env var, using fallback '{DEFAULT_BIND_ADDRESS}'");
            DEFAULT_BIND_ADDRESS.to_string()
        });

        let max_upload_bytes =
            parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            upload_dir: PathBuf::from(upload_dir),
            log_dir,
            bind_address,
            max_upload_bytes,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, fallback: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => fallback,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            error!(value = %raw, "Invalid {key} env var, using fallback {fallback}");
            fallback
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(Settings::from_lookup(|_| None), Settings::default());
    }

    #[test]
    fn reads_every_variable() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("UPLOAD_DIR", "/srv/docs"),
            ("LOG_DIR", "/var/log/docportal"),
            ("BIND_ADDRESS", "127.0.0.1:9000"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ]));

        assert_eq!(settings.upload_dir, PathBuf::from("/srv/docs"));
        assert_eq!(settings.log_dir, PathBuf::from("/var/log/docportal"));
        assert_eq!(settings.bind_address, "127.0.0.1:9000");
        assert_eq!(settings.max_upload_bytes, 1024);
    }

    #[test]
    fn log_dir_is_readable_on_its_own() {
        let lookup = lookup_from(&[("LOG_DIR", "/var/log/docportal")]);
        assert_eq!(
            Settings::log_dir_from_lookup(&lookup),
            PathBuf::from("/var/log/docportal")
        );
        assert_eq!(
            Settings::log_dir_from_lookup(&|_: &str| None),
            PathBuf::from(DEFAULT_LOG_DIR)
        );
    }

    #[test]
    fn malformed_limit_falls_back() {
        let settings = Settings::from_lookup(lookup_from(&[("MAX_UPLOAD_BYTES", "lots")]));
        assert_eq!(settings.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }
}
