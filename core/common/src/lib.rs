//! Common utilities and types shared across FileDock crates.
//!
//! This module provides the normalized object model every storage binding
//! produces, the shared error taxonomy, and key sanitization.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    normalize_listing, sanitize_key, FileItem, ProviderName, UploadFile, DEFAULT_CONTENT_TYPE,
};
