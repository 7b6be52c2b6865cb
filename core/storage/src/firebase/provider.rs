//! Firebase Storage provider implementation.

use async_trait::async_trait;
use chrono::Utc;
use futures::{StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use filedock_common::{normalize_listing, sanitize_key, Error, FileItem, Result, UploadFile};

use super::client::FirebaseClient;
use crate::provider::StorageProvider;
use crate::supabase::provider::non_empty_env;

/// Public Firebase Storage endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://firebasestorage.googleapis.com";

/// Metadata requests kept in flight while listing.
const METADATA_CONCURRENCY: usize = 16;

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// Firebase provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project.
    pub api_key: String,
    /// Storage bucket, e.g. `project.appspot.com`.
    pub storage_bucket: String,
    /// API endpoint. Overridable for emulators.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl FirebaseConfig {
    /// Read `FIREBASE_API_KEY`, `FIREBASE_STORAGE_BUCKET` and optional
    /// `FIREBASE_STORAGE_ENDPOINT`.
    ///
    /// Returns `None` when a required variable is missing or empty.
    pub fn from_env() -> Option<Self> {
        let api_key = non_empty_env("FIREBASE_API_KEY")?;
        let storage_bucket = non_empty_env("FIREBASE_STORAGE_BUCKET")?;
        let endpoint = non_empty_env("FIREBASE_STORAGE_ENDPOINT").unwrap_or_else(default_endpoint);
        Some(Self {
            api_key,
            storage_bucket,
            endpoint,
        })
    }
}

/// Firebase storage provider.
///
/// Keys are prefixed with the upload time in milliseconds, so uploads of
/// the same name never overwrite each other. Stamps handed out by one
/// provider are strictly increasing, so uploads within the same
/// millisecond still get distinct keys. Separate processes writing the
/// same name in the same millisecond can still collide.
pub struct FirebaseProvider {
    config: Option<FirebaseConfig>,
    client: OnceCell<FirebaseClient>,
    last_stamp: AtomicI64,
}

impl FirebaseProvider {
    /// Create a provider. `None` yields a binding that fails every call
    /// with `Error::Configuration`.
    pub fn new(config: Option<FirebaseConfig>) -> Self {
        Self {
            config,
            client: OnceCell::new(),
            last_stamp: AtomicI64::new(0),
        }
    }

    /// Whether credentials are present.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Get the client, building it on first use.
    async fn client(&self) -> Result<&FirebaseClient> {
        let config = self.config.as_ref().ok_or_else(|| {
            Error::Configuration(
                "Firebase is not configured. Set FIREBASE_API_KEY and FIREBASE_STORAGE_BUCKET."
                    .to_string(),
            )
        })?;

        self.client
            .get_or_try_init(|| async {
                debug!(bucket = %config.storage_bucket, "Initializing Firebase client");
                FirebaseClient::new(config)
            })
            .await
    }

    /// Current time in milliseconds, bumped past the last stamp handed out.
    fn next_stamp(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let previous = match self
            .last_stamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            }) {
            Ok(last) | Err(last) => last,
        };
        now.max(previous + 1)
    }

    /// Resolve size, timestamps and download URL of one object.
    async fn resolve_item(client: &FirebaseClient, name: String) -> Result<FileItem> {
        let object = client.metadata(&name).await.map_err(|e| match e {
            Error::NotFound(msg) => Error::List(msg),
            other => other,
        })?;

        Ok(FileItem {
            url: client.download_url(&object)?,
            size: object.size_bytes(),
            last_modified: object.modified(),
            key: name,
        })
    }

    /// List the bucket root and resolve every object, a few at a time.
    async fn collect_items(client: &FirebaseClient) -> Result<Vec<FileItem>> {
        let names = client.list_names().await?;
        futures::stream::iter(names)
            .map(|name| Self::resolve_item(client, name))
            .buffer_unordered(METADATA_CONCURRENCY)
            .try_collect()
            .await
    }
}

#[async_trait]
impl StorageProvider for FirebaseProvider {
    fn name(&self) -> &str {
        "firebase"
    }

    async fn upload_file(&self, file: UploadFile) -> Result<String> {
        let client = self.client().await?;
        let key = format!("{}-{}", self.next_stamp(), sanitize_key(&file.name)?);
        let content_type = file.content_type().to_string();

        client.upload(&key, file.data, &content_type).await?;
        debug!(key = %key, "Uploaded object to Firebase");
        Ok(key)
    }

    async fn list_files(&self) -> Result<Vec<FileItem>> {
        let client = self.client().await?;

        let items = Self::collect_items(client).await.map_err(|e| {
            warn!(error = %e, "Firebase listing failed");
            e
        })?;

        Ok(normalize_listing(items))
    }

    async fn delete_file(&self, key: &str) -> Result<()> {
        let client = self.client().await?;
        client.delete(key).await?;
        debug!(key = %key, "Deleted object from Firebase");
        Ok(())
    }
}
