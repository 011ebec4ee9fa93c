//! Errors raised while loading client configuration and locating its files.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// The config file exists but is not a valid config document.
    #[error("Invalid config file {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode config: {0}")]
    ConfigEncode(#[source] serde_json::Error),

    /// `api_url` does not parse, or is not http(s).
    #[error("Invalid api_url {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("Could not determine home directory")]
    HomeDirNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
