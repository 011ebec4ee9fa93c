//! Logging initialization.
//!
//! Thin wrapper over the observability crate so every binary sets up
//! tracing the same way: structured JSONL to `~/.flashmemo/logs/dev.jsonl`,
//! level from `RUST_LOG` or the configured default, and stderr mirroring when
//! `FLASHMEMO_LOG_STDERR` is truthy.

use observability::LogConfig;

const ENV_LOG_STDERR: &str = "FLASHMEMO_LOG_STDERR";

/// Initialize logging for the CLI.
pub fn init_logging(level: &str) {
    init_logging_for_service("cli", level);
}

/// Initialize logging with a custom service name.
pub fn init_logging_for_service(service_name: &str, level: &str) {
    let also_stderr = std::env::var(ENV_LOG_STDERR)
        .ok()
        .map(|raw| is_truthy(&raw))
        .unwrap_or(false);

    observability::init_with_config(LogConfig {
        service_name: service_name.into(),
        default_level: parse_level(level).as_str().to_ascii_lowercase(),
        also_stderr,
        ..Default::default()
    });
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
