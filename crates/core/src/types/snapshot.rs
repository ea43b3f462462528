//! Read-only dashboard snapshots.
//!
//! Users and orders are loaded once per authenticated session from the
//! local preference store and are never mutated by the admin core.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A registered storefront user, as captured in the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub rank: String,
    /// Total time on the storefront, in seconds.
    #[serde(default)]
    pub time_spent_secs: u64,
    #[serde(default)]
    pub puzzles_solved: u32,
}

/// One line of a past order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub title: String,
    pub quantity: u32,
}

/// A past order, as captured in the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub id: String,
    pub username: String,
    pub total: Decimal,
    /// Epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_snapshot_roundtrip() {
        let order = OrderSnapshot {
            id: "ord-1f2e3d4c".to_string(),
            username: "nyx".to_string(),
            total: Decimal::new(14999, 2),
            timestamp: 1_724_371_200_000,
            items: vec![OrderLine {
                product_id: ProductId::new(1),
                title: "VOID HOODIE".to_string(),
                quantity: 1,
            }],
        };
        let json = serde_json::to_string(&order).unwrap();
        let back: OrderSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
