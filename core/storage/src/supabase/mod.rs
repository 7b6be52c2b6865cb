//! Supabase Storage provider for FileDock.
//!
//! This module provides a storage backend using a single Supabase Storage
//! bucket with:
//! - Public URLs derived from the key, no extra request per object
//! - Overwrite-rejecting uploads (`x-upsert: false`)
//! - Internal paging over the list endpoint

pub mod client;
pub mod provider;

pub use client::{ObjectEntry, SupabaseClient};
pub use provider::{SupabaseConfig, SupabaseProvider, DEFAULT_BUCKET};
