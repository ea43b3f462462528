//! Full data snapshot export.
//!
//! A single JSON document with top-level keys `users`, `products`,
//! `orders`, and `timestamp` (epoch milliseconds). The `products` key
//! must reflect the current cache/store state at export time, which is
//! why [`crate::dashboard::Dashboard::export`] goes through the cache.

use serde::Serialize;

use sephyx_core::{OrderSnapshot, Product, UserSnapshot};

/// The backup export document.
#[derive(Debug, Clone, Serialize)]
pub struct BackupDocument {
    pub users: Vec<UserSnapshot>,
    pub products: Vec<Product>,
    pub orders: Vec<OrderSnapshot>,
    /// Export instant, epoch milliseconds.
    pub timestamp: i64,
}

impl BackupDocument {
    /// Assemble a backup stamped with the current time.
    #[must_use]
    pub fn new(
        users: Vec<UserSnapshot>,
        products: Vec<Product>,
        orders: Vec<OrderSnapshot>,
    ) -> Self {
        Self {
            users,
            products,
            orders,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Pretty-printed JSON, the on-disk backup format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
