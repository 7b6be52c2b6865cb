//! Locally persisted user preferences.
//!
//! Two values survive between sessions: the selected provider and the set
//! of pinned keys. Both are best-effort. A store that cannot be read or
//! written is logged and otherwise ignored, and a corrupt pinned value
//! reads as empty.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use filedock_common::{Error, FileItem, ProviderName, Result};

use crate::view::ListView;

/// Key holding the selected provider name.
pub const PROVIDER_KEY: &str = "storageProvider";
/// Key holding the JSON array of pinned object keys.
pub const PINNED_KEY: &str = "pinnedFiles";

/// String key/value storage for preferences.
pub trait PreferenceStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store, used in tests and when no config directory exists.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/filedock/preferences.json`, if the platform has a
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("filedock").join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Discarding unreadable preferences");
            HashMap::new()
        });
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(&values)?)?;
        Ok(())
    }
}

/// Typed, best-effort access to the persisted preferences.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Preferences that live only as long as this value.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPreferenceStore::new()))
    }

    fn read(&self, key: &str) -> Option<String> {
        self.store.get(key).unwrap_or_else(|e| {
            warn!(key, error = %e, "Failed to read preference");
            None
        })
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, error = %e, "Failed to persist preference");
        }
    }

    /// Saved provider, if one was saved and is still valid.
    pub fn provider_name(&self) -> Option<ProviderName> {
        let saved = self.read(PROVIDER_KEY)?;
        match saved.parse() {
            Ok(name) => Some(name),
            Err(_) => {
                debug!(value = %saved, "Ignoring unknown saved provider");
                None
            }
        }
    }

    pub fn set_provider_name(&self, name: ProviderName) {
        self.write(PROVIDER_KEY, name.as_str());
    }

    /// Pinned keys in the order they were pinned.
    pub fn pinned(&self) -> Vec<String> {
        let Some(raw) = self.read(PINNED_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Pinned set is corrupt, treating as empty");
            Vec::new()
        })
    }

    pub fn is_pinned(&self, key: &str) -> bool {
        self.pinned().iter().any(|k| k == key)
    }

    /// Pin or unpin `key`. Returns whether it is pinned afterwards.
    pub fn toggle_pin(&self, key: &str) -> bool {
        let mut pinned = self.pinned();
        let now_pinned = match pinned.iter().position(|k| k == key) {
            Some(index) => {
                pinned.remove(index);
                false
            }
            None => {
                pinned.push(key.to_string());
                true
            }
        };

        match serde_json::to_string(&pinned) {
            Ok(json) => self.write(PINNED_KEY, &json),
            Err(e) => warn!(error = %e, "Failed to encode pinned set"),
        }
        now_pinned
    }

    /// Apply `view` to `files` with the saved pins placed first.
    pub fn arrange(&self, files: &[FileItem], view: &ListView) -> Vec<FileItem> {
        view.apply(files, &self.pinned())
    }
}
