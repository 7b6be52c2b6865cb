//! Provider registry for resolving the active storage binding.

use std::collections::HashMap;
use std::sync::Arc;

use filedock_common::{Error, ProviderName, Result};

use crate::firebase::{FirebaseConfig, FirebaseProvider};
use crate::provider::StorageProvider;
use crate::supabase::{SupabaseConfig, SupabaseProvider};

/// Registry of storage bindings keyed by provider name.
pub struct ProviderRegistry {
    providers: HashMap<ProviderName, Arc<dyn StorageProvider>>,
}

impl ProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Build a registry with both vendor bindings configured from the
    /// environment.
    ///
    /// Bindings whose variables are missing are still registered; they
    /// fail with `Error::Configuration` on first use.
    pub fn from_env() -> Self {
        let mut registry = Self::new();
        registry.providers.insert(
            ProviderName::Supabase,
            Arc::new(SupabaseProvider::new(SupabaseConfig::from_env())),
        );
        registry.providers.insert(
            ProviderName::Firebase,
            Arc::new(FirebaseProvider::new(FirebaseConfig::from_env())),
        );
        registry
    }

    /// Register a provider.
    ///
    /// # Errors
    /// - Returns error if a provider is already registered under `name`
    pub fn register(&mut self, name: ProviderName, provider: Arc<dyn StorageProvider>) -> Result<()> {
        if self.providers.contains_key(&name) {
            return Err(Error::AlreadyExists(format!(
                "Provider '{}' is already registered",
                name
            )));
        }
        self.providers.insert(name, provider);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, name: ProviderName, provider: Arc<dyn StorageProvider>) -> Result<Self> {
        self.register(name, provider)?;
        Ok(self)
    }

    /// Resolve a provider by name.
    ///
    /// # Errors
    /// - Provider not registered
    pub fn resolve(&self, name: ProviderName) -> Result<Arc<dyn StorageProvider>> {
        self.providers
            .get(&name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Provider '{}' is not registered", name)))
    }

    /// Get list of registered provider names.
    pub fn providers(&self) -> Vec<ProviderName> {
        ProviderName::ALL
            .into_iter()
            .filter(|name| self.providers.contains_key(name))
            .collect()
    }

    /// Check if a provider is registered.
    pub fn has_provider(&self, name: ProviderName) -> bool {
        self.providers.contains_key(&name)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
