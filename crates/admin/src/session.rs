//! Admin session gate.
//!
//! Decides whether the dashboard - and therefore the product cache and
//! mutation pipeline - is reachable at all. Authentication is a static
//! credential comparison behind a pluggable [`CredentialVerifier`] seam
//! so a real identity provider can be substituted later without touching
//! the gate's contract.
//!
//! Known weak point, not a design feature: no lockout, no retry counter,
//! no delay, no session expiry.

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use sephyx_core::{OrderSnapshot, UserSnapshot};

use crate::prefs::{PreferenceKey, PreferenceStore};

/// Credential verification capability.
pub trait CredentialVerifier: Send + Sync {
    /// Check an operator credential pair.
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// The one static operator identity in scope.
pub struct StaticCredentials {
    username: String,
    password: SecretString,
}

impl StaticCredentials {
    #[must_use]
    pub const fn new(username: String, password: SecretString) -> Self {
        Self { username, password }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password.expose_secret()
    }
}

/// User and order snapshots loaded once per authenticated session.
#[derive(Debug, Default, Clone)]
struct SessionSnapshots {
    users: Vec<UserSnapshot>,
    orders: Vec<OrderSnapshot>,
}

/// Admin session gate.
///
/// The session flag lives in the injected [`PreferenceStore`], so an
/// authenticated session survives a reload of the process. Snapshots are
/// loaded from the same store on login and are not re-fetched afterward.
pub struct SessionGate {
    prefs: Arc<dyn PreferenceStore>,
    verifier: Arc<dyn CredentialVerifier>,
    snapshots: RwLock<Option<SessionSnapshots>>,
}

impl SessionGate {
    #[must_use]
    pub fn new(prefs: Arc<dyn PreferenceStore>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            prefs,
            verifier,
            snapshots: RwLock::new(None),
        }
    }

    /// Check the operator credential pair.
    ///
    /// On match: persists the session flag and loads the user/order
    /// snapshots. On mismatch: returns `false` and changes nothing.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        if !self.verifier.verify(username, password) {
            warn!(username, "admin authentication failed");
            return false;
        }
        self.prefs.set_flag(PreferenceKey::AdminSession, true);
        self.load_snapshots();
        info!(username, "admin session opened");
        true
    }

    /// Whether an admin session is active.
    ///
    /// Reads the persisted flag; there is no expiry policy.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.prefs.flag(PreferenceKey::AdminSession)
    }

    /// Close the session: clear the persisted flag and all in-memory
    /// dashboard state.
    pub fn logout(&self) {
        self.prefs.set_flag(PreferenceKey::AdminSession, false);
        let mut guard = self
            .snapshots
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = None;
        info!("admin session closed");
    }

    /// The user snapshot loaded at login. Empty when no session is open
    /// or the snapshots were never loaded.
    #[must_use]
    pub fn users(&self) -> Vec<UserSnapshot> {
        let guard = self
            .snapshots
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.as_ref().map(|s| s.users.clone()).unwrap_or_default()
    }

    /// The order snapshot loaded at login.
    #[must_use]
    pub fn orders(&self) -> Vec<OrderSnapshot> {
        let guard = self
            .snapshots
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.as_ref().map(|s| s.orders.clone()).unwrap_or_default()
    }

    /// Re-load the user/order snapshots from the local store.
    ///
    /// The snapshots are otherwise loaded exactly once per session; this
    /// is the explicit refresh for callers that care about staleness.
    pub fn refresh_snapshots(&self) {
        if self.is_authenticated() {
            self.load_snapshots();
        }
    }

    fn load_snapshots(&self) {
        let snapshots = SessionSnapshots {
            users: self.prefs.users(),
            orders: self.prefs.orders(),
        };
        let mut guard = self
            .snapshots
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(snapshots);
    }
}
