//! Process-local read cache for the product list.
//!
//! There is one product-list resource, so the cache holds one logical
//! entry, populated lazily and invalidated by the mutation pipeline.
//! Concurrent readers racing an in-flight fetch coalesce into that fetch
//! via `moka`'s `try_get_with`, so the store sees exactly one request and
//! every caller observes the same snapshot.
//!
//! Serving an entry that predates a successful mutation without
//! invalidation is a correctness bug; see [`ProductCache::invalidate`]
//! and the generation counter below.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::future::Cache;
use thiserror::Error;
use tracing::debug;

use sephyx_core::Product;

use crate::session::SessionGate;
use crate::store::{ProductStore, StoreError};

/// Cache key for the product list.
///
/// A single fixed logical key: the read path caches the whole list, not
/// per-item entries.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    ProductList,
}

/// Errors surfaced by [`ProductCache::list`].
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// No admin session is active; no network access was made.
    #[error("not authenticated")]
    Unauthorized,

    /// The backing fetch failed; the cache was left invalid and the next
    /// `list()` will retry.
    #[error("product list fetch failed: {0}")]
    Fetch(#[source] Arc<StoreError>),
}

/// Keyed, invalidatable read cache over the remote product store.
///
/// Gated by the session: `list()` performs no network access before
/// authentication. No TTL - validity is driven purely by invalidation.
pub struct ProductCache<S> {
    store: Arc<S>,
    gate: Arc<SessionGate>,
    entries: Cache<CacheKey, Arc<Vec<Product>>>,
    /// Bumped on every `invalidate()`. A fetch that started under an
    /// older generation must not leave its result in the slot.
    generation: AtomicU64,
}

impl<S: ProductStore> ProductCache<S> {
    #[must_use]
    pub fn new(store: Arc<S>, gate: Arc<SessionGate>) -> Self {
        // One logical entry; the capacity just bounds the keyspace.
        let entries = Cache::builder().max_capacity(4).build();
        Self {
            store,
            gate,
            entries,
            generation: AtomicU64::new(0),
        }
    }

    /// Return the current product list, fetching from the remote store
    /// if the entry is invalid or was never populated.
    ///
    /// Concurrent callers share a single in-flight fetch and resolve to
    /// the same snapshot. A call that begins after an [`Self::invalidate`]
    /// may still join a fetch that started before it and observe that
    /// older snapshot once; the slot is dropped afterward, so the
    /// following call re-fetches.
    ///
    /// # Errors
    ///
    /// [`CacheError::Unauthorized`] before authentication (no network
    /// access occurs); [`CacheError::Fetch`] if the fetch fails, in which
    /// case no entry is stored and the next call retries.
    pub async fn list(&self) -> Result<Arc<Vec<Product>>, CacheError> {
        if !self.gate.is_authenticated() {
            return Err(CacheError::Unauthorized);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let store = Arc::clone(&self.store);
        let products = self
            .entries
            .try_get_with(CacheKey::ProductList, async move {
                debug!("product list cache miss, fetching");
                let products = store.fetch_products().await?;
                Ok::<_, StoreError>(Arc::new(products))
            })
            .await
            .map_err(CacheError::Fetch)?;

        // An invalidation raced the fetch: the snapshot we are returning
        // is still the one this round of callers coalesced on, but it
        // must not survive in the slot past the newer invalidation.
        if self.generation.load(Ordering::Acquire) != generation {
            self.entries.invalidate(&CacheKey::ProductList).await;
        }

        Ok(products)
    }

    /// Mark the entry invalid. Does not fetch; the next [`Self::list`]
    /// call performs the fetch. Idempotent.
    pub async fn invalidate(&self) {
        // Bump the generation before dropping the entry so an in-flight
        // fetch observes the change when it completes.
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.entries.invalidate(&CacheKey::ProductList).await;
        debug!("product list cache invalidated");
    }
}
