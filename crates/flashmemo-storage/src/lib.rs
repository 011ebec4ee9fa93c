//! Durable key-value storage for the Flashmemo client.
//!
//! This crate provides:
//! - **`KeyValueStorage`**: the get/set/delete trait every backend implements
//! - **`FileStorage`**: one file per key under a directory, atomic per key
//! - **`MemoryStorage`**: process-local map, for tests and ephemeral sessions
//! - **`StorageKeys`**: the fixed keys the session records live under

mod file;
mod keys;
mod memory;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use traits::KeyValueStorage;

use std::path::Path;
use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend could not perform the operation
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Key cannot be mapped onto the backend
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Create the default durable storage rooted at `dir`.
pub fn create_storage(dir: &Path) -> StorageResult<Box<dyn KeyValueStorage>> {
    let storage = FileStorage::new(dir)?;
    Ok(Box::new(storage))
}
