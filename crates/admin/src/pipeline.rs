//! Mutation pipeline: optimistic writes with deterministic cache effects.
//!
//! Each operation is a single round-trip to the remote product store. On
//! success the cached product list is invalidated *before* the result is
//! returned, so a `list()` that begins afterwards is guaranteed to
//! re-fetch. On any failure the cache is untouched.
//!
//! Writes are not queued or serialized against each other: two
//! concurrent writes to the same product both reach the store, and the
//! cache reflects whichever the store applies last. Last-write-wins is
//! delegated to the store, an acceptable simplification for
//! single-operator usage.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument};

use sephyx_core::{DraftProduct, Product, ProductId, ProductPatch};

use crate::cache::ProductCache;
use crate::session::SessionGate;
use crate::store::{ProductStore, StoreError};

/// Errors from mutation operations.
#[derive(Debug, Error)]
pub enum MutationError {
    /// No admin session is active; the request never left the process.
    #[error("not authenticated")]
    Unauthenticated,

    /// A client-side precondition failed; no network call was made.
    #[error("validation failed: {field} {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// The store request failed (transport) or was declined (rejection).
    #[error("mutation failed: {0}")]
    Store(#[from] StoreError),
}

/// Wraps each write intent in a single round-trip and, on success,
/// invalidates the product cache so readers re-fetch.
pub struct MutationPipeline<S> {
    store: Arc<S>,
    cache: Arc<ProductCache<S>>,
    gate: Arc<SessionGate>,
}

impl<S: ProductStore> MutationPipeline<S> {
    #[must_use]
    pub fn new(store: Arc<S>, cache: Arc<ProductCache<S>>, gate: Arc<SessionGate>) -> Self {
        Self { store, cache, gate }
    }

    /// Create a product from a draft.
    ///
    /// Fails fast with [`MutationError::Validation`] if the title is
    /// empty or the price is not positive; the store is the final
    /// authority and may still reject for other reasons.
    ///
    /// # Errors
    ///
    /// On any failure the cache is untouched, so the caller can preserve
    /// the draft for correction and retry.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&self, draft: &DraftProduct) -> Result<Product, MutationError> {
        self.check_session()?;
        validate_draft(draft)?;

        let product = self.store.create_product(draft).await?;
        self.cache.invalidate().await;
        info!(id = %product.id, "product created");
        Ok(product)
    }

    /// Apply a partial update to a product. Only the patch's set fields
    /// change.
    ///
    /// # Errors
    ///
    /// Returns an error on session, transport, or store failure; the
    /// cache is untouched on failure.
    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn update(&self, id: ProductId, patch: &ProductPatch) -> Result<Product, MutationError> {
        self.check_session()?;

        let product = self.store.update_product(id, patch).await?;
        self.cache.invalidate().await;
        info!(id = %product.id, "product updated");
        Ok(product)
    }

    /// Inline stock quick-edit: an update restricted to the stock field,
    /// with the same success/failure/cache contract as [`Self::update`].
    ///
    /// # Errors
    ///
    /// See [`Self::update`].
    pub async fn set_stock(&self, id: ProductId, stock: u32) -> Result<Product, MutationError> {
        self.update(id, &ProductPatch::stock_only(stock)).await
    }

    /// Delete a product. Irreversible; the contract assumes the caller
    /// has already confirmed intent.
    ///
    /// # Errors
    ///
    /// Returns an error on session, transport, or store failure; on
    /// failure the cache is untouched and the item remains listed.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: ProductId) -> Result<(), MutationError> {
        self.check_session()?;

        self.store.delete_product(id).await?;
        self.cache.invalidate().await;
        info!(id = %id, "product deleted");
        Ok(())
    }

    fn check_session(&self) -> Result<(), MutationError> {
        if self.gate.is_authenticated() {
            Ok(())
        } else {
            Err(MutationError::Unauthenticated)
        }
    }
}

/// Client-side create preconditions: non-empty title, positive price.
fn validate_draft(draft: &DraftProduct) -> Result<(), MutationError> {
    if draft.title.trim().is_empty() {
        return Err(MutationError::Validation {
            field: "title",
            reason: "must not be empty",
        });
    }
    if draft.price <= Decimal::ZERO {
        return Err(MutationError::Validation {
            field: "price",
            reason: "must be positive",
        });
    }
    Ok(())
}
