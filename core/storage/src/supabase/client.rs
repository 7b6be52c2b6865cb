//! Supabase Storage API client.

use reqwest::{header, Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use filedock_common::{Error, Result};

use super::provider::SupabaseConfig;
use crate::provider::encode_key;

/// Page size for the list endpoint.
const LIST_PAGE_SIZE: usize = 100;

/// Objects Supabase creates to keep empty folders alive.
const FOLDER_PLACEHOLDER: &str = ".emptyFolderPlaceholder";

/// Object entry returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Object name, used as the key.
    pub name: String,
    /// Object ID. Absent for folder entries.
    #[serde(default)]
    pub id: Option<String>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Storage metadata. Absent for folder entries.
    #[serde(default)]
    pub metadata: Option<ObjectMetadata>,
}

impl ObjectEntry {
    /// Whether this entry is a stored object rather than a folder marker.
    pub fn is_object(&self) -> bool {
        self.id.is_some() && self.name != FOLDER_PLACEHOLDER
    }

    /// Size in bytes, zero when unreported.
    pub fn size_bytes(&self) -> u64 {
        self.metadata.as_ref().and_then(|m| m.size).unwrap_or(0)
    }

    /// Update time, falling back to creation time.
    pub fn modified(&self) -> String {
        self.updated_at
            .clone()
            .or_else(|| self.created_at.clone())
            .unwrap_or_default()
    }
}

/// Subset of object metadata FileDock reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectMetadata {
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub mimetype: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListRequest<'a> {
    prefix: &'a str,
    limit: usize,
    offset: usize,
    sort_by: SortBy,
}

#[derive(Debug, Serialize)]
struct SortBy {
    column: &'static str,
    order: &'static str,
}

#[derive(Debug, Serialize)]
struct RemoveRequest<'a> {
    prefixes: [&'a str; 1],
}

/// Error body returned by the Storage API.
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Supabase Storage API client bound to one bucket.
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl SupabaseClient {
    /// Create a new Storage client.
    ///
    /// # Errors
    /// - Project URL is not a valid URL
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        let parsed = Url::parse(&config.url).map_err(|e| {
            Error::Configuration(format!("Invalid Supabase URL '{}': {}", config.url, e))
        })?;

        let http = Client::builder()
            .user_agent("FileDock/0.1")
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            api_key: config.anon_key.clone(),
            bucket: config.bucket.clone(),
        })
    }

    /// Public URL of an object. Resolved locally, no request is made.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            encode_key(key)
        )
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            encode_key(key)
        )
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
    }

    /// Upload an object without overwriting.
    pub async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        let response = self
            .request(reqwest::Method::POST, &self.object_url(key))
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, "max-age=3600")
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await
            .map_err(|e| Error::Upload(format!("Failed to upload {}: {}", key, e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Upload(Self::vendor_message(response).await))
        }
    }

    /// List one page of the bucket root.
    pub async fn list_page(&self, offset: usize, limit: usize) -> Result<Vec<ObjectEntry>> {
        let url = format!("{}/storage/v1/object/list/{}", self.base_url, self.bucket);
        let body = ListRequest {
            prefix: "",
            limit,
            offset,
            sort_by: SortBy {
                column: "name",
                order: "asc",
            },
        };

        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::List(format!("Failed to list bucket: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::List(Self::vendor_message(response).await));
        }

        response
            .json()
            .await
            .map_err(|e| Error::List(format!("Failed to parse listing: {}", e)))
    }

    /// List every entry of the bucket root.
    pub async fn list_all(&self) -> Result<Vec<ObjectEntry>> {
        let mut all_entries = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.list_page(offset, LIST_PAGE_SIZE).await?;
            let count = page.len();
            all_entries.extend(page);

            if count < LIST_PAGE_SIZE {
                break;
            }
            offset += count;
        }

        Ok(all_entries)
    }

    /// Remove an object.
    ///
    /// The API answers with the objects it removed; an empty answer means
    /// the key did not exist.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let url = format!("{}/storage/v1/object/{}", self.base_url, self.bucket);

        let response = self
            .request(reqwest::Method::DELETE, &url)
            .json(&RemoveRequest { prefixes: [key] })
            .send()
            .await
            .map_err(|e| Error::Delete(format!("Failed to delete {}: {}", key, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("Object not found: {}", key)));
        }
        if !status.is_success() {
            return Err(Error::Delete(Self::vendor_message(response).await));
        }

        let removed: Vec<ObjectEntry> = response
            .json()
            .await
            .map_err(|e| Error::Delete(format!("Failed to parse delete response: {}", e)))?;

        if removed.is_empty() {
            Err(Error::NotFound(format!("Object not found: {}", key)))
        } else {
            Ok(())
        }
    }

    /// Extract the vendor's message from an error response.
    async fn vendor_message(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ApiError>(&body) {
            Ok(ApiError {
                message: Some(message),
                ..
            }) => message,
            Ok(ApiError {
                error: Some(error), ..
            }) => error,
            _ => format!("{} - {}", status, body),
        }
    }
}
