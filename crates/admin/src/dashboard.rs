//! Dashboard state the admin views operate on.
//!
//! Owns the create-form draft and the "currently editing" marker, and
//! wires the session gate, product cache, and mutation pipeline together
//! so the form-reset and edit-marker contracts are testable without a
//! rendering harness:
//!
//! - a successful create resets the draft to its defaults; any failure
//!   preserves it for correction and retry
//! - a successful edit clears the editing marker; a failure preserves it
//!
//! Delete confirmation is a view-level double-check; by the time
//! [`Dashboard::delete_product`] runs, intent is assumed confirmed.

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

use sephyx_core::{DraftProduct, OrderSnapshot, Product, ProductId, ProductPatch, UserSnapshot};

use crate::backup::BackupDocument;
use crate::cache::{CacheError, ProductCache};
use crate::pipeline::{MutationError, MutationPipeline};
use crate::prefs::{PreferenceKey, PreferenceStore};
use crate::session::SessionGate;
use crate::store::ProductStore;

/// Aggregate business metrics for the overview tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewStats {
    pub total_users: usize,
    pub total_products: usize,
    pub total_orders: usize,
    /// Sum of order totals.
    pub revenue: Decimal,
}

/// Admin dashboard state.
pub struct Dashboard<S> {
    gate: Arc<SessionGate>,
    cache: Arc<ProductCache<S>>,
    pipeline: MutationPipeline<S>,
    prefs: Arc<dyn PreferenceStore>,
    draft: Mutex<DraftProduct>,
    editing: Mutex<Option<ProductId>>,
}

impl<S: ProductStore> Dashboard<S> {
    /// Wire up a dashboard over a remote store and local preference store.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        gate: Arc<SessionGate>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Self {
        let cache = Arc::new(ProductCache::new(Arc::clone(&store), Arc::clone(&gate)));
        let pipeline = MutationPipeline::new(store, Arc::clone(&cache), Arc::clone(&gate));
        Self {
            gate,
            cache,
            pipeline,
            prefs,
            draft: Mutex::new(DraftProduct::default()),
            editing: Mutex::new(None),
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Attempt to open an admin session.
    pub fn login(&self, username: &str, password: &str) -> bool {
        self.gate.authenticate(username, password)
    }

    /// Close the session and drop all in-progress form state.
    pub fn logout(&self) {
        self.gate.logout();
        *self.lock_draft() = DraftProduct::default();
        *self.lock_editing() = None;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The product list, served from cache or fetched on demand.
    ///
    /// # Errors
    ///
    /// See [`ProductCache::list`].
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, CacheError> {
        self.cache.list().await
    }

    #[must_use]
    pub fn users(&self) -> Vec<UserSnapshot> {
        self.gate.users()
    }

    #[must_use]
    pub fn orders(&self) -> Vec<OrderSnapshot> {
        self.gate.orders()
    }

    /// Aggregate metrics for the overview tab.
    ///
    /// # Errors
    ///
    /// Fails if the product list cannot be served; see
    /// [`ProductCache::list`].
    pub async fn overview(&self) -> Result<OverviewStats, CacheError> {
        let products = self.cache.list().await?;
        let orders = self.gate.orders();
        let revenue = orders.iter().map(|o| o.total).sum();
        Ok(OverviewStats {
            total_users: self.gate.users().len(),
            total_products: products.len(),
            total_orders: orders.len(),
            revenue,
        })
    }

    // =========================================================================
    // Create form
    // =========================================================================

    /// The create form's current draft.
    #[must_use]
    pub fn draft(&self) -> DraftProduct {
        self.lock_draft().clone()
    }

    /// Replace the create form's draft (form field edits).
    pub fn set_draft(&self, draft: DraftProduct) {
        *self.lock_draft() = draft;
    }

    /// Submit the create form.
    ///
    /// On success the draft is reset to defaults.
    ///
    /// # Errors
    ///
    /// On any failure (validation, transport, rejection) the draft is
    /// preserved so the operator can correct and retry.
    pub async fn submit_create(&self) -> Result<Product, MutationError> {
        let draft = self.draft();
        let product = self.pipeline.create(&draft).await?;
        *self.lock_draft() = DraftProduct::default();
        Ok(product)
    }

    // =========================================================================
    // Edit form
    // =========================================================================

    /// The id currently being edited, if any.
    #[must_use]
    pub fn editing(&self) -> Option<ProductId> {
        *self.lock_editing()
    }

    /// Mark a product as being edited.
    pub fn begin_edit(&self, id: ProductId) {
        *self.lock_editing() = Some(id);
    }

    /// Abandon the in-progress edit.
    pub fn cancel_edit(&self) {
        *self.lock_editing() = None;
    }

    /// Submit the in-progress edit for the product marked by
    /// [`Self::begin_edit`].
    ///
    /// On success the editing marker is cleared.
    ///
    /// # Errors
    ///
    /// [`MutationError::Validation`] with field `"id"` if no edit is in
    /// progress. On store failure the editing marker is preserved.
    pub async fn submit_edit(&self, patch: &ProductPatch) -> Result<Product, MutationError> {
        let Some(id) = self.editing() else {
            return Err(MutationError::Validation {
                field: "id",
                reason: "no edit in progress",
            });
        };
        let product = self.pipeline.update(id, patch).await?;
        *self.lock_editing() = None;
        Ok(product)
    }

    /// Inline stock quick-edit from the listing row; bypasses the edit
    /// form entirely.
    ///
    /// # Errors
    ///
    /// See [`MutationPipeline::set_stock`].
    pub async fn quick_set_stock(&self, id: ProductId, stock: u32) -> Result<Product, MutationError> {
        self.pipeline.set_stock(id, stock).await
    }

    /// Delete a product. The views have already double-checked intent.
    ///
    /// # Errors
    ///
    /// See [`MutationPipeline::delete`].
    pub async fn delete_product(&self, id: ProductId) -> Result<(), MutationError> {
        self.pipeline.delete(id).await
    }

    // =========================================================================
    // Settings and export
    // =========================================================================

    pub fn set_vault_unlocked(&self, unlocked: bool) {
        self.prefs.set_flag(PreferenceKey::VaultUnlocked, unlocked);
    }

    #[must_use]
    pub fn vault_unlocked(&self) -> bool {
        self.prefs.flag(PreferenceKey::VaultUnlocked)
    }

    pub fn set_music_enabled(&self, enabled: bool) {
        self.prefs.set_flag(PreferenceKey::MusicEnabled, enabled);
    }

    #[must_use]
    pub fn music_enabled(&self) -> bool {
        self.prefs.flag(PreferenceKey::MusicEnabled)
    }

    /// Export a full data snapshot. `products` reflects the current
    /// cache/store state at export time.
    ///
    /// # Errors
    ///
    /// Fails if the product list cannot be served.
    pub async fn export(&self) -> Result<BackupDocument, CacheError> {
        let products = self.cache.list().await?;
        Ok(BackupDocument::new(
            self.gate.users(),
            products.as_ref().clone(),
            self.gate.orders(),
        ))
    }

    fn lock_draft(&self) -> std::sync::MutexGuard<'_, DraftProduct> {
        self.draft
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock_editing(&self) -> std::sync::MutexGuard<'_, Option<ProductId>> {
        self.editing
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
