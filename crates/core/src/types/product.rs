//! Product catalog types.
//!
//! The remote product store owns product identity and truth; everything
//! here is either a faithful copy of a store record (`Product`), an
//! unsaved record with no identity yet (`DraftProduct`), or a partial
//! update to an existing record (`ProductPatch`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// Drop rarity tier for a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Legendary,
    Mythic,
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Hoodies,
    Masks,
    Jackets,
    Pants,
    Accessories,
}

/// A product as held by the remote store.
///
/// The `id` is store-assigned and immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Currency-agnostic unit price. Positive for any record the
    /// pipeline accepted.
    pub price: Decimal,
    pub stock: u32,
    pub rarity: Rarity,
    pub category: Category,
    /// Image URI. May be empty.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

/// An unsaved product held by the create form.
///
/// Has no identity until a create succeeds; `Default` is the create
/// form's reset state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DraftProduct {
    pub title: String,
    pub price: Decimal,
    pub stock: u32,
    pub rarity: Rarity,
    pub category: Category,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

/// A partial update to an existing product.
///
/// Only the set fields are serialized, so the store receives exactly
/// the changed subset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductPatch {
    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.rarity.is_none()
            && self.category.is_none()
            && self.image.is_none()
            && self.description.is_none()
    }

    /// A patch that changes only the stock level (inline quick-edit).
    #[must_use]
    pub fn stock_only(stock: u32) -> Self {
        Self {
            stock: Some(stock),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_default_is_form_reset_state() {
        let draft = DraftProduct::default();
        assert!(draft.title.is_empty());
        assert_eq!(draft.price, Decimal::ZERO);
        assert_eq!(draft.stock, 0);
        assert_eq!(draft.rarity, Rarity::Common);
        assert_eq!(draft.category, Category::Hoodies);
        assert!(draft.image.is_empty());
        assert!(draft.description.is_empty());
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = ProductPatch::stock_only(9);
        let json = serde_json::to_value(&patch).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("stock").unwrap(), 9);
    }

    #[test]
    fn test_empty_patch() {
        assert!(ProductPatch::default().is_empty());
        assert!(!ProductPatch::stock_only(0).is_empty());
    }

    #[test]
    fn test_rarity_wire_names() {
        assert_eq!(
            serde_json::to_string(&Rarity::Legendary).unwrap(),
            "\"legendary\""
        );
        assert_eq!(
            serde_json::to_string(&Category::Accessories).unwrap(),
            "\"accessories\""
        );
    }

    #[test]
    fn test_product_deserializes_store_record() {
        let json = r#"{
            "id": 3,
            "title": "NEON JACKET",
            "price": 249.99,
            "stock": 5,
            "rarity": "mythic",
            "category": "jackets"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_i64(), 3);
        assert_eq!(product.price, Decimal::new(24999, 2));
        assert!(product.image.is_empty());
    }
}
