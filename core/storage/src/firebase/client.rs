//! Firebase Storage REST API client.

use reqwest::{header, Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use filedock_common::{Error, Result};

use super::provider::FirebaseConfig;
use crate::provider::encode_key;

/// Object metadata as returned by the Firebase Storage API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseObject {
    /// Full object name, used as the key.
    pub name: String,
    /// Size in bytes, sent as a decimal string.
    #[serde(default)]
    pub size: Option<String>,
    /// MIME type.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub time_created: Option<String>,
    /// Last update time.
    #[serde(default)]
    pub updated: Option<String>,
    /// Comma-separated download tokens.
    #[serde(default)]
    pub download_tokens: Option<String>,
}

impl FirebaseObject {
    /// Get size as u64, zero when absent or malformed.
    pub fn size_bytes(&self) -> u64 {
        self.size
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    /// Update time, falling back to creation time.
    pub fn modified(&self) -> String {
        self.updated
            .clone()
            .or_else(|| self.time_created.clone())
            .unwrap_or_default()
    }

    /// First download token, if the object has one.
    pub fn download_token(&self) -> Option<&str> {
        self.download_tokens
            .as_deref()
            .and_then(|tokens| tokens.split(',').map(str::trim).find(|t| !t.is_empty()))
    }
}

/// Reference to an object in a list response.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRef {
    pub name: String,
}

/// Response from listing objects.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    items: Vec<ItemRef>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Firebase Storage API client bound to one bucket.
pub struct FirebaseClient {
    http: Client,
    objects_url: String,
    api_key: String,
}

impl FirebaseClient {
    /// Create a new Storage client.
    ///
    /// # Errors
    /// - Endpoint is not a valid URL
    pub fn new(config: &FirebaseConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            Error::Configuration(format!(
                "Invalid Firebase Storage endpoint '{}': {}",
                config.endpoint, e
            ))
        })?;

        let http = Client::builder()
            .user_agent("FileDock/0.1")
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            objects_url: format!(
                "{}/v0/b/{}/o",
                endpoint.as_str().trim_end_matches('/'),
                config.storage_bucket
            ),
            api_key: config.api_key.clone(),
        })
    }

    fn object_url(&self, name: &str) -> String {
        format!("{}/{}", self.objects_url, encode_key(name))
    }

    /// Tokenized download URL for an object.
    ///
    /// # Errors
    /// - The object has no download token
    pub fn download_url(&self, object: &FirebaseObject) -> Result<String> {
        let token = object.download_token().ok_or_else(|| {
            Error::List(format!("Object '{}' has no download URL", object.name))
        })?;
        Ok(format!(
            "{}?alt=media&token={}",
            self.object_url(&object.name),
            token
        ))
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("x-goog-api-key", &self.api_key)
    }

    /// Upload an object under `name`.
    pub async fn upload(
        &self,
        name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<FirebaseObject> {
        let response = self
            .request(reqwest::Method::POST, &self.objects_url)
            .query(&[("uploadType", "media"), ("name", name)])
            .header(header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| Error::Upload(format!("Failed to upload {}: {}", name, e)))?;

        if !response.status().is_success() {
            return Err(Error::Upload(Self::vendor_message(response).await));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Upload(format!("Failed to parse upload response: {}", e)))
    }

    /// List the names of every object at the bucket root.
    ///
    /// Sub-prefixes are not descended into.
    pub async fn list_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .request(reqwest::Method::GET, &self.objects_url)
                .query(&[("delimiter", "/")]);

            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| Error::List(format!("Failed to list bucket: {}", e)))?;

            if !response.status().is_success() {
                return Err(Error::List(Self::vendor_message(response).await));
            }

            let list_response: ListResponse = response
                .json()
                .await
                .map_err(|e| Error::List(format!("Failed to parse listing: {}", e)))?;

            names.extend(list_response.items.into_iter().map(|item| item.name));

            match list_response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(names)
    }

    /// Fetch metadata for one object.
    pub async fn metadata(&self, name: &str) -> Result<FirebaseObject> {
        let response = self
            .request(reqwest::Method::GET, &self.object_url(name))
            .send()
            .await
            .map_err(|e| Error::List(format!("Failed to get metadata for {}: {}", name, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("Object not found: {}", name)));
        }
        if !status.is_success() {
            return Err(Error::List(Self::vendor_message(response).await));
        }

        response
            .json()
            .await
            .map_err(|e| Error::List(format!("Failed to parse metadata for {}: {}", name, e)))
    }

    /// Delete an object.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let response = self
            .request(reqwest::Method::DELETE, &self.object_url(name))
            .send()
            .await
            .map_err(|e| Error::Delete(format!("Failed to delete {}: {}", name, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            Err(Error::NotFound(format!("Object not found: {}", name)))
        } else if status.is_success() {
            Ok(())
        } else {
            Err(Error::Delete(Self::vendor_message(response).await))
        }
    }

    /// Extract the vendor's message from an error response.
    async fn vendor_message(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(ErrorEnvelope {
                error: ErrorBody {
                    message: Some(message),
                },
            }) => message,
            _ => format!("{} - {}", status, body),
        }
    }
}
