//! Credential persistence on top of a key-value store.
//!
//! Two records under two fixed keys:
//! - `StorageKeys::ACCESS_TOKEN` holds `{"accessToken": "<token>"}`
//! - `StorageKeys::USER` holds the user object as the backend returned it
//!
//! Every method is one storage call. Writing or removing the pair is not
//! atomic; `SessionManager::restore` repairs a half-written pair.

use flashmemo_api::User;
use flashmemo_storage::{KeyValueStorage, StorageError, StorageKeys, StorageResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialRecord {
    access_token: String,
}

/// Reads and writes the persisted session records.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn save_credential(&self, access_token: &str) -> StorageResult<()> {
        let record = serde_json::to_string(&CredentialRecord {
            access_token: access_token.to_string(),
        })
        .map_err(|e| StorageError::Encoding(e.to_string()))?;
        self.storage.set(StorageKeys::ACCESS_TOKEN, &record)
    }

    /// The stored access token. `None` if absent or unreadable.
    pub fn get_credential(&self) -> StorageResult<Option<String>> {
        let Some(raw) = self.read_record(StorageKeys::ACCESS_TOKEN)? else {
            return Ok(None);
        };
        match serde_json::from_str::<CredentialRecord>(&raw) {
            Ok(record) => Ok(Some(record.access_token)),
            Err(e) => {
                warn!(error = %e, "Stored credential is malformed");
                Ok(None)
            }
        }
    }

    pub fn remove_credential(&self) -> StorageResult<()> {
        self.storage.delete(StorageKeys::ACCESS_TOKEN).map(|_| ())
    }

    pub fn save_user(&self, user: &User) -> StorageResult<()> {
        let record =
            serde_json::to_string(user).map_err(|e| StorageError::Encoding(e.to_string()))?;
        self.storage.set(StorageKeys::USER, &record)
    }

    /// The stored user. `None` if absent or unreadable.
    pub fn get_user(&self) -> StorageResult<Option<User>> {
        let Some(raw) = self.read_record(StorageKeys::USER)? else {
            return Ok(None);
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Stored user record is malformed");
                Ok(None)
            }
        }
    }

    pub fn remove_user(&self) -> StorageResult<()> {
        self.storage.delete(StorageKeys::USER).map(|_| ())
    }

    /// Raw record text. An undecodable value reads as absent; I/O errors
    /// still propagate.
    fn read_record(&self, key: &str) -> StorageResult<Option<String>> {
        match self.storage.get(key) {
            Err(StorageError::Encoding(e)) => {
                warn!(key, error = %e, "Stored record is not valid text");
                Ok(None)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashmemo_storage::{FileStorage, MemoryStorage};

    fn store() -> (Arc<MemoryStorage>, CredentialStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = CredentialStore::new(storage.clone());
        (storage, store)
    }

    #[test]
    fn test_credential_record_shape() {
        let (storage, store) = store();
        store.save_credential("tok1").unwrap();

        let raw = storage.get(StorageKeys::ACCESS_TOKEN).unwrap().unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&raw).unwrap(),
            serde_json::json!({"accessToken": "tok1"})
        );
        assert_eq!(store.get_credential().unwrap().as_deref(), Some("tok1"));
    }

    #[test]
    fn test_user_round_trip_keeps_extra_fields() {
        let (storage, store) = store();
        storage
            .set(
                StorageKeys::USER,
                r#"{"id":"u1","name":"Ann","streak":4}"#,
            )
            .unwrap();

        let user = store.get_user().unwrap().unwrap();
        assert_eq!(user.id, "u1");
        store.save_user(&user).unwrap();

        let raw = storage.get(StorageKeys::USER).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["streak"], 4);
    }

    #[test]
    fn test_absent_records() {
        let (_, store) = store();
        assert_eq!(store.get_credential().unwrap(), None);
        assert_eq!(store.get_user().unwrap(), None);
        store.remove_credential().unwrap();
        store.remove_user().unwrap();
    }

    #[test]
    fn test_malformed_records_read_as_absent() {
        let (storage, store) = store();
        storage.set(StorageKeys::ACCESS_TOKEN, "not json").unwrap();
        storage.set(StorageKeys::USER, r#"{"name":"no id"}"#).unwrap();

        assert_eq!(store.get_credential().unwrap(), None);
        assert_eq!(store.get_user().unwrap(), None);
    }

    #[test]
    fn test_remove() {
        let (storage, store) = store();
        store.save_credential("tok1").unwrap();
        store.save_user(&User::new("u1", "Ann")).unwrap();

        store.remove_credential().unwrap();
        assert!(!storage.has(StorageKeys::ACCESS_TOKEN).unwrap());
        assert!(storage.has(StorageKeys::USER).unwrap());

        store.remove_user().unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_undecodable_file_records_read_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(Arc::new(FileStorage::new(dir.path()).unwrap()));
        std::fs::write(dir.path().join("%40flashmemo%3Atoken"), [0xff, 0xfe, 0x00]).unwrap();
        std::fs::write(dir.path().join("%40flashmemo%3Auser"), [0xc3, 0x28]).unwrap();

        assert_eq!(store.get_credential().unwrap(), None);
        assert_eq!(store.get_user().unwrap(), None);
    }
}
