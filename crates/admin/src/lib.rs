//! Sephyx Admin - back-office core library.
//!
//! Implements the inventory mutation and cache-consistency subsystem for
//! the Sephyx storefront's administrative panel:
//!
//! - [`session`] - credential check and the persisted admin-session flag
//! - [`store`] - client for the remote product store (source of truth)
//! - [`cache`] - single-flight read cache for the product list
//! - [`pipeline`] - create/update/delete writes with deterministic cache
//!   invalidation on success
//! - [`dashboard`] - form and snapshot state the views operate on
//! - [`prefs`] - typed key-value access to the local preference store
//! - [`backup`] - full data snapshot export
//!
//! # Consistency contract
//!
//! The remote store owns product truth. Every mutation the pipeline
//! reports as successful invalidates the cached product list before the
//! caller sees the result, so the next [`cache::ProductCache::list`]
//! re-fetches the authoritative state. A failed mutation never touches
//! the cache.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backup;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod pipeline;
pub mod prefs;
pub mod session;
pub mod store;

pub use backup::BackupDocument;
pub use cache::{CacheError, ProductCache};
pub use config::{AdminConfig, ConfigError};
pub use dashboard::{Dashboard, OverviewStats};
pub use pipeline::{MutationError, MutationPipeline};
pub use prefs::{JsonFilePreferences, MemoryPreferences, PreferenceKey, PreferenceStore};
pub use session::{CredentialVerifier, SessionGate, StaticCredentials};
pub use store::{HttpProductStore, ProductStore, StoreError};
