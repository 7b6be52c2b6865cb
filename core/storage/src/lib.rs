//! Storage provider abstraction for FileDock.
//!
//! This module provides a trait-based interface over cloud object stores
//! (Supabase Storage, Firebase Storage) and an in-memory double, plus a
//! registry that maps provider names to bindings.
//!
//! # Design Principles
//! - One flat namespace per provider, objects addressed by sanitized keys
//! - Async operations: All I/O operations are async
//! - Fail fast: unconfigured bindings error before any network I/O
//! - Unified error semantics: Consistent error types across providers

pub mod firebase;
pub mod memory;
pub mod provider;
pub mod registry;
pub mod supabase;

pub use firebase::{FirebaseConfig, FirebaseProvider};
pub use memory::MemoryProvider;
pub use provider::StorageProvider;
pub use registry::ProviderRegistry;
pub use supabase::{SupabaseConfig, SupabaseProvider};
