//! Storage provider trait definition.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use filedock_common::{FileItem, Result, UploadFile};

/// Characters left unescaped when a key is placed in a URL path segment.
const KEY_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a key for use as a single URL path segment.
pub(crate) fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_SEGMENT).to_string()
}

/// Storage provider trait for different backends.
///
/// Every backend exposes one flat namespace of objects. Implementations
/// own their client handle and must fail with `Error::Configuration`
/// before touching the network when their credentials are missing.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Get the provider name (e.g., "supabase", "firebase", "memory").
    fn name(&self) -> &str;

    /// Upload a file.
    ///
    /// # Postconditions
    /// - The name is sanitized into a storage-safe key
    /// - Returns the final key the object was stored under
    ///
    /// # Errors
    /// - Invalid (empty after sanitizing) file name
    /// - Vendor rejection, including key collisions where the binding rejects them
    async fn upload_file(&self, file: UploadFile) -> Result<String>;

    /// List every object in the namespace.
    ///
    /// # Postconditions
    /// - Keys are unique
    /// - Sorted newest-first by `last_modified`
    /// - Empty namespace yields an empty vector
    ///
    /// # Errors
    /// - `Error::List` when the vendor call fails
    async fn list_files(&self) -> Result<Vec<FileItem>>;

    /// Delete the object stored under `key`.
    ///
    /// # Errors
    /// - `Error::NotFound` if the key does not exist
    /// - `Error::Delete` with the vendor message otherwise
    async fn delete_file(&self, key: &str) -> Result<()>;
}
