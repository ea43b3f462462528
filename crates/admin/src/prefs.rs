//! Local session/preference store access.
//!
//! The storefront persists a handful of flags (admin session, vault
//! unlock, background music) and read-only user/order snapshots in a
//! local key-value area. This module models that area as an explicit
//! store with typed accessors and an enumerated key set - no ambient
//! globals; callers receive the store as an injected dependency.
//!
//! The store is *not* the authoritative product store and has no product
//! write path.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::error;

use sephyx_core::{OrderSnapshot, UserSnapshot};

/// Keys of the persisted boolean flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    /// Set true only after the credential check succeeds; gates all
    /// dashboard data access.
    AdminSession,
    /// Storefront vault unlock.
    VaultUnlocked,
    /// Background music toggle.
    MusicEnabled,
}

impl PreferenceKey {
    /// Stable on-disk name for the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdminSession => "admin_session",
            Self::VaultUnlocked => "vault_unlocked",
            Self::MusicEnabled => "music_enabled",
        }
    }
}

/// Local session/preference store.
///
/// Flags default to `false` when never set. User and order lists are
/// read-only snapshots captured by the storefront; this crate never
/// writes them.
pub trait PreferenceStore: Send + Sync {
    /// Read a boolean flag, defaulting to `false`.
    fn flag(&self, key: PreferenceKey) -> bool;

    /// Persist a boolean flag.
    fn set_flag(&self, key: PreferenceKey, value: bool);

    /// The cached user list.
    fn users(&self) -> Vec<UserSnapshot>;

    /// The cached order list.
    fn orders(&self) -> Vec<OrderSnapshot>;
}

/// Error type for opening the file-backed store.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("failed to read preference file: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk document layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceData {
    #[serde(default)]
    flags: BTreeMap<String, bool>,
    #[serde(default)]
    users: Vec<UserSnapshot>,
    #[serde(default)]
    orders: Vec<OrderSnapshot>,
}

/// JSON-file-backed preference store.
///
/// Loads the whole document on open and writes it through on every flag
/// change, so the admin-session flag survives a process restart.
pub struct JsonFilePreferences {
    path: PathBuf,
    data: Mutex<PreferenceData>,
}

impl JsonFilePreferences {
    /// Open the store at `path`. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            PreferenceData::default()
        };
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    fn persist(&self, data: &PreferenceData) {
        match serde_json::to_string_pretty(data) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    error!(path = %self.path.display(), error = %e, "failed to persist preferences");
                }
            }
            Err(e) => error!(error = %e, "failed to serialize preferences"),
        }
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn flag(&self, key: PreferenceKey) -> bool {
        let data = self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        data.flags.get(key.as_str()).copied().unwrap_or(false)
    }

    fn set_flag(&self, key: PreferenceKey, value: bool) {
        let mut data = self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        data.flags.insert(key.as_str().to_string(), value);
        self.persist(&data);
    }

    fn users(&self) -> Vec<UserSnapshot> {
        let data = self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        data.users.clone()
    }

    fn orders(&self) -> Vec<OrderSnapshot> {
        let data = self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        data.orders.clone()
    }
}

/// In-memory preference store for tests and embedding.
#[derive(Default)]
pub struct MemoryPreferences {
    data: Mutex<PreferenceData>,
}

impl MemoryPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with user and order snapshots.
    #[must_use]
    pub fn with_snapshots(users: Vec<UserSnapshot>, orders: Vec<OrderSnapshot>) -> Self {
        Self {
            data: Mutex::new(PreferenceData {
                flags: BTreeMap::new(),
                users,
                orders,
            }),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn flag(&self, key: PreferenceKey) -> bool {
        let data = self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        data.flags.get(key.as_str()).copied().unwrap_or(false)
    }

    fn set_flag(&self, key: PreferenceKey, value: bool) {
        let mut data = self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        data.flags.insert(key.as_str().to_string(), value);
    }

    fn users(&self) -> Vec<UserSnapshot> {
        let data = self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        data.users.clone()
    }

    fn orders(&self) -> Vec<OrderSnapshot> {
        let data = self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        data.orders.clone()
    }
}
