//! # Observability
//!
//! Centralized logging for the Flashmemo workspace.
//!
//! Crates are **log producers** only. They use the standard `tracing` macros
//! and never decide where output goes. The binary calls
//! [`init_with_config`] once at startup; every event is then written as one
//! JSON line to `~/.flashmemo/logs/dev.jsonl` (or a configured path), and
//! optionally mirrored to stderr in a compact human format.
//!
//! Fields whose names look like credentials (`password`, `access_token`,
//! `authorization`, ...) and values that look like bearer tokens are replaced
//! with `[REDACTED]` before they reach the file.
//!
//! ## Usage
//!
//! ```rust,ignore
//! fn main() {
//!     observability::init_with_config(observability::LogConfig {
//!         service_name: "cli".into(),
//!         default_level: "debug".into(),
//!         also_stderr: true,
//!         ..Default::default()
//!     });
//!
//!     tracing::info!("ready");
//! }
//! ```

mod json_layer;
mod redact;
mod writer;

use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use json_layer::{JsonLayer, LogEntry};
pub use redact::{redact_fields, REDACTED};
pub use writer::{CentralLogWriter, WriterFactory};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service (e.g., "cli", "session").
    /// Included in every log line for filtering.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG` environment variable.
    pub default_level: String,

    /// Optional custom log file path.
    /// Defaults to `~/.flashmemo/logs/dev.jsonl`.
    pub log_path: Option<PathBuf>,

    /// Also emit logs to stderr for immediate feedback.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

/// Central log file location.
fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".flashmemo").join("logs").join("dev.jsonl"))
}

/// Initialize logging with default settings for the given service.
pub fn init(service_name: &str) {
    init_with_config(LogConfig {
        service_name: service_name.into(),
        ..Default::default()
    });
}

/// Initialize logging with custom configuration.
///
/// Installing a second global subscriber is a no-op, so calling this from
/// several entry points (or tests) is harmless. If the log file cannot be
/// opened the JSONL layer is skipped and only stderr output (if enabled)
/// remains.
pub fn init_with_config(config: LogConfig) {
    let log_path = config.log_path.clone().or_else(default_log_path);

    let json_layer = log_path
        .as_ref()
        .and_then(|path| match CentralLogWriter::new(path) {
            Ok(writer) => Some(writer),
            Err(e) => {
                eprintln!("observability: cannot open log file {}: {}", path.display(), e);
                None
            }
        })
        .map(|writer| {
            JsonLayer::new(config.service_name.clone(), WriterFactory::new(writer))
                .with_filter(env_filter(&config.default_level))
        });

    let stderr_layer = if config.also_stderr {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .compact()
                .with_writer(io::stderr)
                .with_ansi(true)
                .with_filter(env_filter(&config.default_level)),
        )
    } else {
        None
    };

    let installed = tracing_subscriber::registry()
        .with(json_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            service = %config.service_name,
            log_path = ?log_path,
            "observability initialized"
        );
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, instrument, trace, warn};

/// Re-export Level for advanced filtering.
pub use tracing::Level;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.service_name, "unknown");
        assert_eq!(config.default_level, "info");
        assert!(config.log_path.is_none());
        assert!(!config.also_stderr);
    }

    #[test]
    fn test_default_log_path_under_flashmemo_dir() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with(".flashmemo/logs/dev.jsonl"));
        }
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            service_name: "test".into(),
            log_path: Some(dir.path().join("test.jsonl")),
            ..Default::default()
        };
        init_with_config(config.clone());
        init_with_config(config);
    }
}
