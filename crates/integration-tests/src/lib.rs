//! Shared harness for the admin core integration tests.
//!
//! Provides an in-memory [`MockProductStore`] standing in for the remote
//! product store, with call counters, failure injection, and a gate for
//! holding fetches in flight, plus a helper that wires up a full
//! dashboard over it.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use secrecy::SecretString;
use tokio::sync::Semaphore;

use sephyx_admin::prefs::{MemoryPreferences, PreferenceStore};
use sephyx_admin::session::{SessionGate, StaticCredentials};
use sephyx_admin::store::{ProductStore, StoreError};
use sephyx_admin::Dashboard;
use sephyx_core::{Category, DraftProduct, Product, ProductId, ProductPatch, Rarity};

/// Operator credentials used across the tests.
pub const USERNAME: &str = "admin1";
pub const PASSWORD: &str = "mash123";

/// In-memory remote product store.
///
/// Counts fetches and mutations, can be told to reject operations, and
/// can hold fetches on a semaphore so tests can race invalidations
/// against an in-flight fetch.
#[derive(Default)]
pub struct MockProductStore {
    products: Mutex<Vec<Product>>,
    next_id: AtomicI64,
    fetch_calls: AtomicUsize,
    mutation_calls: AtomicUsize,
    fail_fetches: AtomicBool,
    fail_mutations: AtomicBool,
    fetch_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl MockProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// A store pre-populated with `products`; ids continue after the
    /// highest existing one.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        let next = products.iter().map(|p| p.id.as_i64()).max().unwrap_or(0) + 1;
        Self {
            products: Mutex::new(products),
            next_id: AtomicI64::new(next),
            ..Self::default()
        }
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    /// Make subsequent fetches fail with a rejection.
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent mutations fail with a rejection.
    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Hold every subsequent fetch until permits are released.
    ///
    /// Returns the semaphore; `add_permits(n)` lets `n` held fetches
    /// proceed.
    pub fn hold_fetches(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.lock_gate() = Some(Arc::clone(&gate));
        gate
    }

    fn rejection(what: &str) -> StoreError {
        StoreError::Rejected {
            status: 503,
            message: format!("injected {what} failure"),
        }
    }

    fn lock_products(&self) -> std::sync::MutexGuard<'_, Vec<Product>> {
        self.products
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock_gate(&self) -> std::sync::MutexGuard<'_, Option<Arc<Semaphore>>> {
        self.fetch_gate
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ProductStore for MockProductStore {
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.lock_gate().clone();
        if let Some(gate) = gate {
            let permit = gate.acquire().await.map_err(|_| Self::rejection("fetch"))?;
            permit.forget();
        }

        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(Self::rejection("fetch"));
        }
        Ok(self.lock_products().clone())
    }

    async fn create_product(&self, draft: &DraftProduct) -> Result<Product, StoreError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::rejection("create"));
        }

        let product = Product {
            id: ProductId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            title: draft.title.clone(),
            price: draft.price,
            stock: draft.stock,
            rarity: draft.rarity,
            category: draft.category,
            image: draft.image.clone(),
            description: draft.description.clone(),
        };
        self.lock_products().push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, StoreError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::rejection("update"));
        }

        let mut products = self.lock_products();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::Rejected {
                status: 404,
                message: format!("no product {id}"),
            })?;

        if let Some(title) = &patch.title {
            product.title.clone_from(title);
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(rarity) = patch.rarity {
            product.rarity = rarity;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(image) = &patch.image {
            product.image.clone_from(image);
        }
        if let Some(description) = &patch.description {
            product.description.clone_from(description);
        }
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::rejection("delete"));
        }

        let mut products = self.lock_products();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(StoreError::Rejected {
                status: 404,
                message: format!("no product {id}"),
            });
        }
        Ok(())
    }
}

/// A valid draft for the canonical catalog item.
#[must_use]
pub fn void_hoodie_draft() -> DraftProduct {
    DraftProduct {
        title: "VOID HOODIE".to_string(),
        price: Decimal::new(14999, 2),
        stock: 15,
        rarity: Rarity::Legendary,
        category: Category::Hoodies,
        image: String::new(),
        description: String::new(),
    }
}

/// A store record for seeding mocks directly.
#[must_use]
pub fn product(id: i64, title: &str, price_cents: i64, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Decimal::new(price_cents, 2),
        stock,
        rarity: Rarity::Common,
        category: Category::Hoodies,
        image: String::new(),
        description: String::new(),
    }
}

/// A session gate over fresh in-memory preferences.
#[must_use]
pub fn gate(authenticated: bool) -> Arc<SessionGate> {
    let prefs: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferences::new());
    let verifier = Arc::new(StaticCredentials::new(
        USERNAME.to_string(),
        SecretString::from(PASSWORD),
    ));
    let gate = Arc::new(SessionGate::new(prefs, verifier));
    if authenticated {
        assert!(gate.authenticate(USERNAME, PASSWORD));
    }
    gate
}

/// A dashboard wired over a mock store and in-memory preferences.
pub struct Harness {
    pub store: Arc<MockProductStore>,
    pub prefs: Arc<MemoryPreferences>,
    pub dashboard: Dashboard<MockProductStore>,
}

impl Harness {
    /// Build a harness; `login` controls whether a session is opened.
    #[must_use]
    pub fn new(store: MockProductStore, login: bool) -> Self {
        Self::with_prefs(store, MemoryPreferences::new(), login)
    }

    /// Build a harness over pre-populated preferences (user/order
    /// snapshots).
    #[must_use]
    pub fn with_prefs(store: MockProductStore, prefs: MemoryPreferences, login: bool) -> Self {
        let store = Arc::new(store);
        let prefs = Arc::new(prefs);
        let verifier = Arc::new(StaticCredentials::new(
            USERNAME.to_string(),
            SecretString::from(PASSWORD),
        ));
        let gate = Arc::new(SessionGate::new(
            Arc::clone(&prefs) as Arc<dyn PreferenceStore>,
            verifier,
        ));
        let dashboard = Dashboard::new(
            Arc::clone(&store),
            gate,
            Arc::clone(&prefs) as Arc<dyn PreferenceStore>,
        );
        if login {
            assert!(dashboard.login(USERNAME, PASSWORD));
        }
        Self {
            store,
            prefs,
            dashboard,
        }
    }
}
