//! Firebase Storage provider for FileDock.
//!
//! Talks to the Firebase Storage REST API (`/v0/b/{bucket}/o`). Download
//! URLs carry a per-object token, so listing costs one metadata request
//! per object on top of the list call.

pub mod client;
pub mod provider;

pub use client::{FirebaseClient, FirebaseObject};
pub use provider::{FirebaseConfig, FirebaseProvider, DEFAULT_ENDPOINT};
