//! In-memory storage provider for testing.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::provider::StorageProvider;
use filedock_common::{normalize_listing, sanitize_key, Error, FileItem, Result, UploadFile};

/// In-memory stored object.
#[derive(Debug, Clone)]
struct Entry {
    data: Vec<u8>,
    modified: String,
}

/// In-memory storage provider.
///
/// Useful for testing and offline runs. Uploads never overwrite an
/// existing key, matching the Supabase binding. All data is lost on drop.
pub struct MemoryProvider {
    storage: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryProvider {
    /// Create a new empty memory provider.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Read back the stored contents of a key.
    pub fn contents(&self, key: &str) -> Option<Vec<u8>> {
        self.read().get(key).map(|entry| entry.data.clone())
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.storage.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.storage.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn upload_file(&self, file: UploadFile) -> Result<String> {
        let key = sanitize_key(&file.name)?;
        let mut storage = self.write();

        if storage.contains_key(&key) {
            return Err(Error::Upload(format!("The resource already exists: {}", key)));
        }

        storage.insert(
            key.clone(),
            Entry {
                data: file.data,
                modified: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            },
        );
        Ok(key)
    }

    async fn list_files(&self) -> Result<Vec<FileItem>> {
        let items = self
            .read()
            .iter()
            .map(|(key, entry)| FileItem {
                key: key.clone(),
                size: entry.data.len() as u64,
                last_modified: entry.modified.clone(),
                url: format!("memory://{}", key),
            })
            .collect();

        Ok(normalize_listing(items))
    }

    async fn delete_file(&self, key: &str) -> Result<()> {
        match self.write().remove(key) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound(format!("Object not found: {}", key))),
        }
    }
}
