//! Supabase Storage provider implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use filedock_common::{normalize_listing, sanitize_key, Error, FileItem, Result, UploadFile};

use super::client::{ObjectEntry, SupabaseClient};
use crate::provider::StorageProvider;

/// Bucket used when none is configured.
pub const DEFAULT_BUCKET: &str = "files";

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

/// Supabase provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Anon (or service role) key.
    pub anon_key: String,
    /// Storage bucket holding the files.
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl SupabaseConfig {
    /// Read `SUPABASE_URL`, `SUPABASE_ANON_KEY` and optional
    /// `SUPABASE_BUCKET`.
    ///
    /// Returns `None` when a required variable is missing or empty.
    pub fn from_env() -> Option<Self> {
        let url = non_empty_env("SUPABASE_URL")?;
        let anon_key = non_empty_env("SUPABASE_ANON_KEY")?;
        let bucket = non_empty_env("SUPABASE_BUCKET").unwrap_or_else(default_bucket);
        Some(Self {
            url,
            anon_key,
            bucket,
        })
    }
}

pub(crate) fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Supabase storage provider.
///
/// Stores objects under their sanitized name and refuses to overwrite an
/// existing key.
pub struct SupabaseProvider {
    config: Option<SupabaseConfig>,
    client: OnceCell<SupabaseClient>,
}

impl SupabaseProvider {
    /// Create a provider. `None` yields a binding that fails every call
    /// with `Error::Configuration`.
    pub fn new(config: Option<SupabaseConfig>) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// Whether credentials are present.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Get the client, building it on first use.
    async fn client(&self) -> Result<&SupabaseClient> {
        let config = self.config.as_ref().ok_or_else(|| {
            Error::Configuration(
                "Supabase is not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY.".to_string(),
            )
        })?;

        self.client
            .get_or_try_init(|| async {
                debug!(bucket = %config.bucket, "Initializing Supabase client");
                SupabaseClient::new(config)
            })
            .await
    }

    fn to_file_item(client: &SupabaseClient, entry: ObjectEntry) -> FileItem {
        FileItem {
            url: client.public_url(&entry.name),
            size: entry.size_bytes(),
            last_modified: entry.modified(),
            key: entry.name,
        }
    }
}

#[async_trait]
impl StorageProvider for SupabaseProvider {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn upload_file(&self, file: UploadFile) -> Result<String> {
        let client = self.client().await?;
        let key = sanitize_key(&file.name)?;
        let content_type = file.content_type().to_string();

        client.upload(&key, file.data, &content_type).await?;
        debug!(key = %key, "Uploaded object to Supabase");
        Ok(key)
    }

    async fn list_files(&self) -> Result<Vec<FileItem>> {
        let client = self.client().await?;

        let entries = client.list_all().await.map_err(|e| {
            warn!(error = %e, "Supabase listing failed");
            e
        })?;

        let items = entries
            .into_iter()
            .filter(ObjectEntry::is_object)
            .map(|entry| Self::to_file_item(client, entry))
            .collect();

        Ok(normalize_listing(items))
    }

    async fn delete_file(&self, key: &str) -> Result<()> {
        let client = self.client().await?;
        client.remove(key).await?;
        debug!(key = %key, "Deleted object from Supabase");
        Ok(())
    }
}
