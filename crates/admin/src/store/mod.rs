//! Remote product store contract.
//!
//! The remote store holds the authoritative product list; this module
//! defines the narrow request contract the core consumes and the HTTP
//! implementation of it. Any non-success response is a failure - the
//! pipeline never retries on its own.

mod http;

pub use http::HttpProductStore;

use thiserror::Error;

use sephyx_core::{DraftProduct, Product, ProductId, ProductPatch};

/// Errors from the remote product store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Request failed to complete (network, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store responded but declined the operation.
    #[error("store rejected the operation (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The store responded with a body we could not parse.
    #[error("malformed store response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Create/read/update/delete access to the authoritative product list.
///
/// Implementations perform exactly one round-trip per call and report
/// any non-success outcome as a [`StoreError`].
#[trait_variant::make(ProductStore: Send)]
pub trait LocalProductStore {
    /// Fetch the full product list.
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Create a product; the store assigns its identifier.
    async fn create_product(&self, draft: &DraftProduct) -> Result<Product, StoreError>;

    /// Apply a partial update; only the patch's set fields change.
    async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, StoreError>;

    /// Delete a product. Irreversible; no soft-delete.
    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError>;
}
