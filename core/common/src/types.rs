//! Common types used throughout FileDock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Content type used when an upload does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Name of a supported storage backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    #[default]
    Supabase,
    Firebase,
}

impl ProviderName {
    /// All known providers, in display order.
    pub const ALL: [ProviderName; 2] = [ProviderName::Supabase, ProviderName::Firebase];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderName::Supabase => "supabase",
            ProviderName::Firebase => "firebase",
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderName {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "supabase" => Ok(ProviderName::Supabase),
            "firebase" => Ok(ProviderName::Firebase),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown provider '{}', expected 'supabase' or 'firebase'",
                other
            ))),
        }
    }
}

/// Normalized description of a stored object.
///
/// Rebuilt from the provider on every listing; never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    /// Unique object identifier within the provider's namespace.
    pub key: String,
    /// Size in bytes.
    pub size: u64,
    /// Provider-reported modification timestamp, usually RFC 3339.
    pub last_modified: String,
    /// Download locator. May expire for some providers.
    pub url: String,
}

impl FileItem {
    /// Parse `last_modified`, if it is a valid RFC 3339 timestamp.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_modified)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// A blob submitted for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Human-readable file name, sanitized into a key by the provider.
    pub name: String,
    /// File contents.
    pub data: Vec<u8>,
    /// MIME type, if known.
    pub content_type: Option<String>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// MIME type to send to the provider.
    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// Size of the contents in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Turn a human-readable file name into a storage-safe key.
///
/// Diacritics are decomposed and dropped, then every character outside
/// `[A-Za-z0-9.-]` becomes `_`.
///
/// # Errors
/// - Returns `InvalidInput` if nothing remains after sanitizing
pub fn sanitize_key(name: &str) -> crate::Result<String> {
    let key: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if key.is_empty() {
        return Err(crate::Error::InvalidInput(format!(
            "File name '{}' does not contain any storable characters",
            name
        )));
    }
    Ok(key)
}

/// Order newest-first and drop repeated keys.
///
/// Items whose timestamp cannot be parsed sort after all others, keeping
/// their relative order.
pub fn normalize_listing(items: Vec<FileItem>) -> Vec<FileItem> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut unique: Vec<FileItem> = items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.key.clone());
            if !fresh {
                warn!(key = %item.key, "Dropping duplicate key from listing");
            }
            fresh
        })
        .collect();

    unique.sort_by(|a, b| match (a.modified_at(), b.modified_at()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    unique
}
