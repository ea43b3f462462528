//! Shared type definitions.

pub mod id;
pub mod product;
pub mod snapshot;

pub use id::ProductId;
pub use product::{Category, DraftProduct, Product, ProductPatch, Rarity};
pub use snapshot::{OrderLine, OrderSnapshot, UserSnapshot};
