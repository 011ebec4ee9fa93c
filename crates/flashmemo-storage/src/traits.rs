//! Storage trait definitions.

use crate::StorageResult;

/// Trait for durable key-value backends.
///
/// Each call touches exactly one key and is atomic with respect to it.
/// Nothing is atomic across keys.
pub trait KeyValueStorage: Send + Sync {
    /// Store a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Retrieve a value.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Delete a value. Returns whether the key existed.
    fn delete(&self, key: &str) -> StorageResult<bool>;

    /// Check if a key exists
    fn has(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
