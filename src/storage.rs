/// Persistence of memos and folders in a synchronous key-value blob store
use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::constants::{FOLDERS_KEY, MEMOS_KEY};
use crate::memo_data::{FolderItem, MemoItem};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous get/set over whole string values
pub trait BlobStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`
pub struct LocalStorageBlob {
    storage: web_sys::Storage,
}

impl LocalStorageBlob {
    pub fn new() -> Result<Self, StorageError> {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .map(|storage| LocalStorageBlob { storage })
            .ok_or(StorageError::Unavailable)
    }
}

impl BlobStore for LocalStorageBlob {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}

/// Process-local store; used in tests and when localStorage is unavailable
#[derive(Debug, Default)]
pub struct MemoryBlob {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryBlob {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlob {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load a collection stored under `key`
///
/// Missing keys and corrupt blobs both yield an empty collection; corruption
/// is logged and otherwise ignored.
fn load_collection<T: DeserializeOwned>(blob: &dyn BlobStore, key: &str) -> Vec<T> {
    match blob.get(key) {
        None => Vec::new(),
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::error!("Failed to parse {} from storage: {}", key, e);
            Vec::new()
        }),
    }
}

fn save_collection<T: Serialize>(
    blob: &dyn BlobStore,
    key: &str,
    items: &[T],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(items).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    blob.set(key, &json)
}

pub fn load_memos(blob: &dyn BlobStore) -> Vec<MemoItem> {
    load_collection(blob, MEMOS_KEY)
}

pub fn load_folders(blob: &dyn BlobStore) -> Vec<FolderItem> {
    load_collection(blob, FOLDERS_KEY)
}

pub fn save_memos(blob: &dyn BlobStore, memos: &[MemoItem]) -> Result<(), StorageError> {
    save_collection(blob, MEMOS_KEY, memos)
}

pub fn save_folders(blob: &dyn BlobStore, folders: &[FolderItem]) -> Result<(), StorageError> {
    save_collection(blob, FOLDERS_KEY, folders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memo_data::MemoType;

    #[test]
    fn test_missing_keys_load_empty() {
        let blob = MemoryBlob::new();

        assert!(load_memos(&blob).is_empty());
        assert!(load_folders(&blob).is_empty());
    }

    #[test]
    fn test_corrupt_blob_loads_empty() {
        let blob = MemoryBlob::new();
        blob.set(MEMOS_KEY, "{not json").unwrap();
        blob.set(FOLDERS_KEY, r#"[{"id": 1}]"#).unwrap();

        assert!(load_memos(&blob).is_empty());
        assert!(load_folders(&blob).is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let blob = MemoryBlob::new();
        let memos = vec![
            MemoItem::new("https://youtu.be/abc".to_string(), Some("f1".to_string())),
            MemoItem::new("https://example.com".to_string(), None),
        ];
        let folders = vec![FolderItem::new("Work".to_string())];

        save_memos(&blob, &memos).unwrap();
        save_folders(&blob, &folders).unwrap();

        assert_eq!(load_memos(&blob), memos);
        assert_eq!(load_folders(&blob), folders);
    }

    #[test]
    fn test_timestamps_stored_as_iso_strings() {
        let blob = MemoryBlob::new();
        let folders = vec![FolderItem::new("Work".to_string())];
        save_folders(&blob, &folders).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&blob.get(FOLDERS_KEY).unwrap()).unwrap();
        let created = raw[0]["createdAt"].as_str().unwrap();

        assert!(chrono::DateTime::parse_from_rfc3339(created).is_ok());
    }

    #[test]
    fn test_loads_records_written_by_browser_dates() {
        let blob = MemoryBlob::new();
        blob.set(
            MEMOS_KEY,
            r#"[{"id":"m1","url":"https://x.com/a/status/1","type":"twitter","folderId":"f1","createdAt":"2024-01-02T03:04:05.678Z","imageUrl":"https://img"}]"#,
        )
        .unwrap();

        let memos = load_memos(&blob);

        assert_eq!(memos.len(), 1);
        assert_eq!(memos[0].memo_type, MemoType::Twitter);
        assert_eq!(memos[0].folder_id.as_deref(), Some("f1"));
        assert_eq!(memos[0].image_url.as_deref(), Some("https://img"));
    }
}
