//! FileDock application core.
//!
//! Front ends talk to a [`StorageController`]: it owns the selected
//! provider, the current listing and its loading/error state, and wraps
//! the active storage binding's operations. [`Preferences`] persists the
//! provider choice and the pinned set between sessions, and [`ListView`]
//! filters and orders a listing for display.

pub mod controller;
pub mod preferences;
pub mod view;

pub use controller::{ControllerSnapshot, ControllerStatus, StorageController};
pub use preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Preferences, PINNED_KEY,
    PROVIDER_KEY,
};
pub use view::{ListView, SortKey, SortOrder};
