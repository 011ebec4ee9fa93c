//! File system paths for the client.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Name of the per-user data directory under the home directory.
const BASE_DIR_NAME: &str = ".flashmemo";

/// Manages file system paths for the client.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for client files (~/.flashmemo)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.flashmemo`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir().ok_or(CoreError::HomeDirNotFound)?;

        Ok(Self {
            base_dir: home.join(BASE_DIR_NAME),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.flashmemo).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.flashmemo/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the key-value storage directory (~/.flashmemo/storage).
    ///
    /// Holds the persisted session records.
    pub fn storage_dir(&self) -> PathBuf {
        self.base_dir.join("storage")
    }

    /// Get the logs directory (~/.flashmemo/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the central JSONL log file (~/.flashmemo/logs/dev.jsonl).
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("dev.jsonl")
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.storage_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}
