//! File-backed storage: one file per key.
//!
//! Writes go to a sibling temp file that is synced and then renamed over the
//! target, so a crash leaves either the old value or the new one.

use crate::{KeyValueStorage, StorageError, StorageResult};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Durable storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) storage under `dir`.
    pub fn new(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&dir, fs::Permissions::from_mode(0o700))?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        Ok(self.dir.join(encode_key(key)?))
    }
}

/// Map a key onto a file name. Unsafe bytes become `%XX`.
fn encode_key(key: &str) -> StorageResult<String> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("empty key".to_string()));
    }

    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => out.push(byte as char),
            b'.' if !out.is_empty() => out.push('.'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    Ok(out)
}

fn temp_path_for(path: &Path) -> StorageResult<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| StorageError::InvalidKey(path.display().to_string()))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    Ok(path.with_file_name(format!(".{file_name}.tmp.{nanos}")))
}

fn write_atomic(path: &Path, contents: &str) -> StorageResult<()> {
    let tmp_path = temp_path_for(path)?;

    let result = (|| -> StorageResult<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&tmp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, path)?;

        #[cfg(unix)]
        if let Some(parent) = path.parent() {
            File::open(parent)?.sync_all()?;
        }
        Ok(())
    })();

    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp_path) {
            if e.kind() != ErrorKind::NotFound {
                warn!(path = %tmp_path.display(), error = %e, "Failed to remove temp file");
            }
        }
    }
    result
}

impl KeyValueStorage for FileStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        write_atomic(&path, value)?;
        debug!(key = %key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| StorageError::Encoding(e.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key = %key, "Deleted value");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageKeys;

    #[test]
    fn test_file_storage_set_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        assert_eq!(storage.get(StorageKeys::ACCESS_TOKEN).unwrap(), None);

        storage
            .set(StorageKeys::ACCESS_TOKEN, r#"{"accessToken":"abc"}"#)
            .unwrap();
        assert_eq!(
            storage.get(StorageKeys::ACCESS_TOKEN).unwrap(),
            Some(r#"{"accessToken":"abc"}"#.to_string())
        );
        assert!(storage.has(StorageKeys::ACCESS_TOKEN).unwrap());

        assert!(storage.delete(StorageKeys::ACCESS_TOKEN).unwrap());
        assert!(!storage.delete(StorageKeys::ACCESS_TOKEN).unwrap());
        assert_eq!(storage.get(StorageKeys::ACCESS_TOKEN).unwrap(), None);
    }

    #[test]
    fn test_file_storage_overwrite_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();
        assert_eq!(storage.get("k").unwrap(), Some("two".to_string()));

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["k".to_string()]);
    }

    #[test]
    fn test_keys_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.set(StorageKeys::USER, "user").unwrap();
        storage.set(StorageKeys::ACCESS_TOKEN, "token").unwrap();
        storage.delete(StorageKeys::USER).unwrap();

        assert_eq!(storage.get(StorageKeys::USER).unwrap(), None);
        assert_eq!(
            storage.get(StorageKeys::ACCESS_TOKEN).unwrap(),
            Some("token".to_string())
        );
    }

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("plain_key-1").unwrap(), "plain_key-1");
        assert_eq!(encode_key("@flashmemo:user").unwrap(), "%40flashmemo%3Auser");
        assert_eq!(encode_key("../escape").unwrap(), "%2E.%2Fescape");
        assert_eq!(encode_key("a.b").unwrap(), "a.b");
        assert!(matches!(encode_key(""), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_empty_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        assert!(storage.set("", "v").is_err());
        assert!(storage.get("").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions_are_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        storage.set("secret", "value").unwrap();

        let mode = fs::metadata(dir.path().join("secret"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
