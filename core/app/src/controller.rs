//! Storage controller: the state front ends read and the operations they call.

use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use filedock_common::{Error, FileItem, ProviderName, Result, UploadFile};
use filedock_storage::{ProviderRegistry, StorageProvider};

use crate::preferences::Preferences;

/// Lifecycle of the file listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControllerStatus {
    /// Nothing loaded yet.
    Idle,
    /// A listing is in flight.
    Loading,
    /// The last listing succeeded.
    Loaded,
    /// The last listing or mutation failed.
    Error,
}

/// Point-in-time copy of the controller state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerSnapshot {
    pub provider_name: ProviderName,
    pub files: Vec<FileItem>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub status: ControllerStatus,
    pub refresh_trigger: u64,
}

#[derive(Debug)]
struct ControllerState {
    provider_name: ProviderName,
    files: Vec<FileItem>,
    is_loading: bool,
    error: Option<String>,
    status: ControllerStatus,
    refresh_trigger: u64,
    /// Tag of the newest listing request. Older results are dropped.
    generation: u64,
}

/// Holds the active provider and its file listing.
///
/// One controller is created per session with the bindings and
/// preferences it should use. Listings are tagged with a generation and
/// only the newest one is applied, so overlapping refreshes and provider
/// switches settle on the most recent request.
pub struct StorageController {
    registry: ProviderRegistry,
    preferences: Preferences,
    state: RwLock<ControllerState>,
}

impl StorageController {
    /// Create a controller, restoring the saved provider selection.
    ///
    /// No listing is issued until [`mount`](Self::mount).
    pub fn new(registry: ProviderRegistry, preferences: Preferences) -> Self {
        let provider_name = preferences.provider_name().unwrap_or_default();
        debug!(provider = %provider_name, "Creating storage controller");

        Self {
            registry,
            preferences,
            state: RwLock::new(ControllerState {
                provider_name,
                files: Vec::new(),
                is_loading: false,
                error: None,
                status: ControllerStatus::Idle,
                refresh_trigger: 0,
                generation: 0,
            }),
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Issue the initial listing.
    pub async fn mount(&self) {
        let _ = self.load().await;
    }

    /// Switch to another provider.
    ///
    /// The previous listing and error are dropped before the new provider
    /// is queried, so nothing from the old provider is ever shown under the
    /// new name. Selecting the active provider does nothing once a listing
    /// was requested; before that it issues the initial listing.
    pub async fn set_provider_name(&self, name: ProviderName) {
        {
            let mut state = self.state.write().await;
            if state.provider_name == name {
                if state.status != ControllerStatus::Idle {
                    return;
                }
            } else {
                info!(from = %state.provider_name, to = %name, "Switching storage provider");
                state.provider_name = name;
                state.files.clear();
                state.error = None;
            }
        }

        self.persist_provider_name(name).await;
        let _ = self.load().await;
    }

    /// Bump the refresh counter and reload the listing.
    pub async fn refresh_files(&self) {
        self.state.write().await.refresh_trigger += 1;
        let _ = self.load().await;
    }

    /// Reload the listing and return what the provider answered.
    ///
    /// The result reaches the shared state only if no newer listing was
    /// issued in the meantime.
    pub async fn list_files(&self) -> Result<Vec<FileItem>> {
        self.load().await
    }

    /// Upload one file and refresh the listing.
    ///
    /// # Errors
    /// - Whatever the provider returned; also stored as the current error
    pub async fn upload_file(&self, file: UploadFile) -> Result<String> {
        let provider = self.begin_mutation().await?;
        let name = file.name.clone();

        match provider.upload_file(file).await {
            Ok(key) => {
                info!(name = %name, key = %key, "Uploaded file");
                self.refresh_files().await;
                Ok(key)
            }
            Err(e) => {
                self.record_failure(&e).await;
                Err(e)
            }
        }
    }

    /// Upload several files concurrently.
    ///
    /// Every upload runs to completion; successes are kept even when
    /// others fail. Nothing is retried.
    ///
    /// # Errors
    /// - `Error::Upload` listing every failed file, if any failed
    pub async fn upload_files(&self, files: Vec<UploadFile>) -> Result<Vec<String>> {
        let total = files.len();
        let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
        let results = join_all(files.into_iter().map(|file| self.upload_file(file))).await;

        let mut keys = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (name, result) in names.into_iter().zip(results) {
            match result {
                Ok(key) => keys.push(key),
                Err(e) => failures.push(format!("{}: {}", name, e)),
            }
        }

        if failures.is_empty() {
            return Ok(keys);
        }

        let error = Error::Upload(format!(
            "{} of {} uploads failed ({})",
            failures.len(),
            total,
            failures.join("; ")
        ));
        self.record_failure(&error).await;
        Err(error)
    }

    /// Delete one object and refresh the listing.
    ///
    /// # Errors
    /// - Whatever the provider returned; also stored as the current error
    pub async fn delete_file(&self, key: &str) -> Result<()> {
        let provider = self.begin_mutation().await?;

        match provider.delete_file(key).await {
            Ok(()) => {
                info!(key = %key, "Deleted file");
                self.refresh_files().await;
                Ok(())
            }
            Err(e) => {
                self.record_failure(&e).await;
                Err(e)
            }
        }
    }

    pub async fn snapshot(&self) -> ControllerSnapshot {
        let state = self.state.read().await;
        ControllerSnapshot {
            provider_name: state.provider_name,
            files: state.files.clone(),
            is_loading: state.is_loading,
            error: state.error.clone(),
            status: state.status,
            refresh_trigger: state.refresh_trigger,
        }
    }

    pub async fn provider_name(&self) -> ProviderName {
        self.state.read().await.provider_name
    }

    pub async fn files(&self) -> Vec<FileItem> {
        self.state.read().await.files.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn status(&self) -> ControllerStatus {
        self.state.read().await.status
    }

    /// Run one listing round against the active provider.
    async fn load(&self) -> Result<Vec<FileItem>> {
        let (generation, provider_name) = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.status = ControllerStatus::Loading;
            state.is_loading = true;
            state.error = None;
            (state.generation, state.provider_name)
        };

        debug!(provider = %provider_name, generation, "Listing files");
        let result = match self.registry.resolve(provider_name) {
            Ok(provider) => provider.list_files().await,
            Err(e) => Err(e),
        };

        let mut state = self.state.write().await;
        if state.generation != generation {
            debug!(generation, latest = state.generation, "Discarding stale listing");
            return result;
        }

        state.is_loading = false;
        match &result {
            Ok(files) => {
                debug!(count = files.len(), "Listing applied");
                state.files = files.clone();
                // A mutation may have failed while this listing was in flight.
                state.status = if state.error.is_some() {
                    ControllerStatus::Error
                } else {
                    ControllerStatus::Loaded
                };
            }
            Err(e) => {
                warn!(provider = %provider_name, error = %e, "Failed to list files");
                state.files.clear();
                state.error = Some(e.to_string());
                state.status = ControllerStatus::Error;
            }
        }
        result
    }

    /// Save the provider choice off the async workers; the store may block.
    async fn persist_provider_name(&self, name: ProviderName) {
        let preferences = self.preferences.clone();
        if let Err(e) =
            tokio::task::spawn_blocking(move || preferences.set_provider_name(name)).await
        {
            warn!(error = %e, "Failed to persist provider selection");
        }
    }

    /// Clear the current error and resolve the active binding.
    async fn begin_mutation(&self) -> Result<Arc<dyn StorageProvider>> {
        let provider_name = {
            let mut state = self.state.write().await;
            state.error = None;
            if state.status == ControllerStatus::Error {
                state.status = ControllerStatus::Idle;
            }
            state.provider_name
        };

        match self.registry.resolve(provider_name) {
            Ok(provider) => Ok(provider),
            Err(e) => {
                self.record_failure(&e).await;
                Err(e)
            }
        }
    }

    /// Store a mutation failure. The listing is left as it was.
    async fn record_failure(&self, error: &Error) {
        warn!(error = %error, "Storage operation failed");
        let mut state = self.state.write().await;
        state.error = Some(error.to_string());
        state.status = ControllerStatus::Error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use filedock_storage::{MemoryProvider, SupabaseProvider};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::{mpsc, oneshot};

    fn item(key: &str) -> FileItem {
        FileItem {
            key: key.to_string(),
            size: 1,
            last_modified: "2024-01-01T00:00:00Z".to_string(),
            url: format!("test://{}", key),
        }
    }

    fn keys(files: &[FileItem]) -> Vec<&str> {
        files.iter().map(|f| f.key.as_str()).collect()
    }

    /// Listing that blocks until the test releases it.
    struct Scripted {
        release: oneshot::Receiver<()>,
        files: Vec<FileItem>,
    }

    /// Provider whose listings are answered in an order the test controls.
    struct ScriptedProvider {
        script: Mutex<VecDeque<Scripted>>,
        entered: mpsc::UnboundedSender<usize>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(
            responses: Vec<Vec<FileItem>>,
        ) -> (Arc<Self>, Vec<oneshot::Sender<()>>, mpsc::UnboundedReceiver<usize>) {
            let (entered, entered_rx) = mpsc::unbounded_channel();
            let mut releases = Vec::new();
            let mut script = VecDeque::new();
            for files in responses {
                let (tx, rx) = oneshot::channel();
                releases.push(tx);
                script.push_back(Scripted { release: rx, files });
            }

            let provider = Arc::new(Self {
                script: Mutex::new(script),
                entered,
                calls: AtomicUsize::new(0),
            });
            (provider, releases, entered_rx)
        }
    }

    #[async_trait]
    impl StorageProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn upload_file(&self, _file: UploadFile) -> Result<String> {
            Err(Error::Upload("read-only".to_string()))
        }

        async fn list_files(&self) -> Result<Vec<FileItem>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            let Some(Scripted { release, files }) = next else {
                return Ok(Vec::new());
            };
            self.entered.send(call).unwrap();
            let _ = release.await;
            Ok(files)
        }

        async fn delete_file(&self, key: &str) -> Result<()> {
            Err(Error::NotFound(key.to_string()))
        }
    }

    /// Memory provider that rejects uploads whose name contains "bad".
    struct FlakyProvider {
        inner: MemoryProvider,
    }

    #[async_trait]
    impl StorageProvider for FlakyProvider {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn upload_file(&self, file: UploadFile) -> Result<String> {
            if file.name.contains("bad") {
                return Err(Error::Upload("quota exceeded".to_string()));
            }
            self.inner.upload_file(file).await
        }

        async fn list_files(&self) -> Result<Vec<FileItem>> {
            self.inner.list_files().await
        }

        async fn delete_file(&self, key: &str) -> Result<()> {
            self.inner.delete_file(key).await
        }
    }

    /// Provider whose listing always fails.
    struct BrokenProvider;

    #[async_trait]
    impl StorageProvider for BrokenProvider {
        fn name(&self) -> &str {
            "broken"
        }

        async fn upload_file(&self, _file: UploadFile) -> Result<String> {
            Err(Error::Upload("unavailable".to_string()))
        }

        async fn list_files(&self) -> Result<Vec<FileItem>> {
            Err(Error::List("service unavailable".to_string()))
        }

        async fn delete_file(&self, _key: &str) -> Result<()> {
            Err(Error::Delete("unavailable".to_string()))
        }
    }

    fn memory_controller() -> (StorageController, Arc<MemoryProvider>) {
        let memory = Arc::new(MemoryProvider::new());
        let registry = ProviderRegistry::new()
            .with(ProviderName::Supabase, memory.clone())
            .unwrap()
            .with(ProviderName::Firebase, Arc::new(MemoryProvider::new()))
            .unwrap();
        (StorageController::new(registry, Preferences::in_memory()), memory)
    }

    #[tokio::test]
    async fn test_starts_idle_with_default_provider() {
        let (controller, _) = memory_controller();
        let snapshot = controller.snapshot().await;

        assert_eq!(snapshot.status, ControllerStatus::Idle);
        assert_eq!(snapshot.provider_name, ProviderName::Supabase);
        assert!(!snapshot.is_loading);
        assert!(snapshot.files.is_empty());
    }

    #[tokio::test]
    async fn test_mount_with_empty_provider() {
        let (controller, _) = memory_controller();
        controller.mount().await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.status, ControllerStatus::Loaded);
        assert!(snapshot.files.is_empty());
        assert!(snapshot.error.is_none());
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn test_upload_then_list_round_trip() {
        let (controller, _) = memory_controller();
        controller.mount().await;

        let key = controller
            .upload_file(UploadFile::new("café résumé.pdf", vec![7u8; 13]))
            .await
            .unwrap();
        assert_eq!(key, "cafe_resume.pdf");

        let snapshot = controller.snapshot().await;
        let matching: Vec<_> = snapshot.files.iter().filter(|f| f.key == key).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].size, 13);
        assert_eq!(snapshot.refresh_trigger, 1);
        assert_eq!(snapshot.status, ControllerStatus::Loaded);
    }

    #[tokio::test]
    async fn test_delete_missing_key_keeps_files() {
        let (controller, memory) = memory_controller();
        memory
            .upload_file(UploadFile::new("keep.txt", vec![1]))
            .await
            .unwrap();
        controller.mount().await;
        let before = controller.files().await;

        let result = controller.delete_file("ghost.txt").await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        let snapshot = controller.snapshot().await;
        assert!(snapshot.error.is_some());
        assert_eq!(snapshot.status, ControllerStatus::Error);
        assert_eq!(snapshot.files, before);
        assert_eq!(snapshot.refresh_trigger, 0);
    }

    #[tokio::test]
    async fn test_delete_refreshes_listing() {
        let (controller, _) = memory_controller();
        let key = controller
            .upload_file(UploadFile::new("a.txt", vec![1]))
            .await
            .unwrap();

        controller.delete_file(&key).await.unwrap();
        assert!(controller.files().await.is_empty());
        assert!(controller.error().await.is_none());
    }

    #[tokio::test]
    async fn test_list_failure_is_stored() {
        let registry = ProviderRegistry::new()
            .with(ProviderName::Supabase, Arc::new(BrokenProvider))
            .unwrap();
        let controller = StorageController::new(registry, Preferences::in_memory());

        let result = controller.list_files().await;
        assert!(matches!(result, Err(Error::List(_))));

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.status, ControllerStatus::Error);
        assert!(snapshot.files.is_empty());
        assert!(snapshot.error.unwrap().contains("service unavailable"));
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn test_unconfigured_binding_reports_configuration_error() {
        let registry = ProviderRegistry::new()
            .with(ProviderName::Supabase, Arc::new(SupabaseProvider::new(None)))
            .unwrap();
        let controller = StorageController::new(registry, Preferences::in_memory());
        controller.mount().await;

        let error = controller.error().await.unwrap();
        assert!(error.contains("not configured"));
    }

    #[tokio::test]
    async fn test_switch_clears_state_before_load_resolves() {
        let (scripted, mut releases, mut entered) = ScriptedProvider::new(vec![vec![item("b.txt")]]);
        let memory = Arc::new(MemoryProvider::new());
        memory
            .upload_file(UploadFile::new("a.txt", vec![1]))
            .await
            .unwrap();

        let registry = ProviderRegistry::new()
            .with(ProviderName::Supabase, memory)
            .unwrap()
            .with(ProviderName::Firebase, scripted)
            .unwrap();
        let controller = Arc::new(StorageController::new(registry, Preferences::in_memory()));
        controller.mount().await;

        // Leave an error in place next to a non-empty listing.
        assert!(controller.delete_file("ghost.txt").await.is_err());
        let before = controller.snapshot().await;
        assert_eq!(keys(&before.files), vec!["a.txt"]);
        assert!(before.error.is_some());

        let task = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.set_provider_name(ProviderName::Firebase).await })
        };
        entered.recv().await.unwrap();

        let during = controller.snapshot().await;
        assert_eq!(during.provider_name, ProviderName::Firebase);
        assert!(during.files.is_empty());
        assert!(during.error.is_none());
        assert!(during.is_loading);
        assert_eq!(during.status, ControllerStatus::Loading);

        releases.remove(0).send(()).unwrap();
        task.await.unwrap();

        let after = controller.snapshot().await;
        assert_eq!(keys(&after.files), vec!["b.txt"]);
        assert!(!after.is_loading);
    }

    #[tokio::test]
    async fn test_stale_listing_is_discarded() {
        let (scripted, mut releases, mut entered) =
            ScriptedProvider::new(vec![vec![item("old.txt")], vec![item("new.txt")]]);
        let registry = ProviderRegistry::new()
            .with(ProviderName::Supabase, scripted)
            .unwrap();
        let controller = Arc::new(StorageController::new(registry, Preferences::in_memory()));

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.refresh_files().await })
        };
        assert_eq!(entered.recv().await.unwrap(), 0);

        let second = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.refresh_files().await })
        };
        assert_eq!(entered.recv().await.unwrap(), 1);

        let release_first = releases.remove(0);
        let release_second = releases.remove(0);

        release_second.send(()).unwrap();
        second.await.unwrap();
        assert_eq!(keys(&controller.files().await), vec!["new.txt"]);

        release_first.send(()).unwrap();
        first.await.unwrap();

        let snapshot = controller.snapshot().await;
        assert_eq!(keys(&snapshot.files), vec!["new.txt"]);
        assert_eq!(snapshot.refresh_trigger, 2);
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.status, ControllerStatus::Loaded);
    }

    #[tokio::test]
    async fn test_batch_upload_keeps_partial_success() {
        let flaky = Arc::new(FlakyProvider {
            inner: MemoryProvider::new(),
        });
        let registry = ProviderRegistry::new()
            .with(ProviderName::Supabase, flaky)
            .unwrap();
        let controller = StorageController::new(registry, Preferences::in_memory());
        controller.mount().await;

        let result = controller
            .upload_files(vec![
                UploadFile::new("one.txt", vec![1]),
                UploadFile::new("bad.txt", vec![2]),
                UploadFile::new("three.txt", vec![3]),
            ])
            .await;

        match result {
            Err(Error::Upload(message)) => {
                assert!(message.starts_with("1 of 3 uploads failed"));
                assert!(message.contains("bad.txt"));
            }
            other => panic!("expected upload error, got {:?}", other),
        }
        assert!(controller.error().await.is_some());

        let listed = controller.list_files().await.unwrap();
        let mut listed_keys = keys(&listed);
        listed_keys.sort();
        assert_eq!(listed_keys, vec!["one.txt", "three.txt"]);
    }

    #[tokio::test]
    async fn test_batch_upload_success() {
        let (controller, _) = memory_controller();
        let keys = controller
            .upload_files(vec![
                UploadFile::new("a.txt", vec![1]),
                UploadFile::new("b.txt", vec![2]),
            ])
            .await
            .unwrap();

        assert_eq!(keys, vec!["a.txt", "b.txt"]);
        assert_eq!(controller.files().await.len(), 2);
        assert!(controller.error().await.is_none());
    }

    #[tokio::test]
    async fn test_provider_selection_is_persisted() {
        let prefs = Preferences::in_memory();
        let registry = ProviderRegistry::new()
            .with(ProviderName::Supabase, Arc::new(MemoryProvider::new()))
            .unwrap()
            .with(ProviderName::Firebase, Arc::new(MemoryProvider::new()))
            .unwrap();
        let controller = StorageController::new(registry, prefs.clone());
        controller.set_provider_name(ProviderName::Firebase).await;

        assert_eq!(prefs.provider_name(), Some(ProviderName::Firebase));

        let restored = StorageController::new(ProviderRegistry::new(), prefs);
        assert_eq!(restored.provider_name().await, ProviderName::Firebase);
    }

    #[tokio::test]
    async fn test_selecting_active_provider_is_noop() {
        let (scripted, _releases, _entered) = ScriptedProvider::new(Vec::new());
        let registry = ProviderRegistry::new()
            .with(ProviderName::Supabase, scripted.clone())
            .unwrap();
        let controller = StorageController::new(registry, Preferences::in_memory());
        controller.mount().await;
        assert_eq!(scripted.calls.load(Ordering::SeqCst), 1);

        controller.set_provider_name(ProviderName::Supabase).await;
        assert_eq!(scripted.calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.status().await, ControllerStatus::Loaded);
    }

    #[tokio::test]
    async fn test_selecting_active_provider_before_mount_loads() {
        let (controller, memory) = memory_controller();
        memory
            .upload_file(UploadFile::new("a.txt", vec![1]))
            .await
            .unwrap();

        controller.set_provider_name(ProviderName::Supabase).await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.status, ControllerStatus::Loaded);
        assert_eq!(keys(&snapshot.files), vec!["a.txt"]);
        assert_eq!(
            controller.preferences().provider_name(),
            Some(ProviderName::Supabase)
        );
    }

    #[tokio::test]
    async fn test_mutation_failure_during_refresh_keeps_error_status() {
        let (scripted, mut releases, mut entered) = ScriptedProvider::new(vec![vec![item("a.txt")]]);
        let registry = ProviderRegistry::new()
            .with(ProviderName::Supabase, scripted)
            .unwrap();
        let controller = Arc::new(StorageController::new(registry, Preferences::in_memory()));

        let refresh = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.refresh_files().await })
        };
        entered.recv().await.unwrap();

        assert!(controller.delete_file("ghost.txt").await.is_err());

        releases.remove(0).send(()).unwrap();
        refresh.await.unwrap();

        let snapshot = controller.snapshot().await;
        assert_eq!(keys(&snapshot.files), vec!["a.txt"]);
        assert!(snapshot.error.is_some());
        assert_eq!(snapshot.status, ControllerStatus::Error);
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn test_provider_selection_is_written_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        let prefs = Preferences::new(Arc::new(crate::FilePreferenceStore::new(&path)));
        let registry = ProviderRegistry::new()
            .with(ProviderName::Firebase, Arc::new(MemoryProvider::new()))
            .unwrap();

        let controller = StorageController::new(registry, prefs);
        controller.set_provider_name(ProviderName::Firebase).await;

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("firebase"));
    }

    #[tokio::test]
    async fn test_unregistered_provider_sets_error() {
        let registry = ProviderRegistry::new()
            .with(ProviderName::Supabase, Arc::new(MemoryProvider::new()))
            .unwrap();
        let controller = StorageController::new(registry, Preferences::in_memory());
        controller.set_provider_name(ProviderName::Firebase).await;

        assert_eq!(controller.status().await, ControllerStatus::Error);
        assert!(controller
            .upload_file(UploadFile::new("a.txt", vec![1]))
            .await
            .is_err());
    }
}
