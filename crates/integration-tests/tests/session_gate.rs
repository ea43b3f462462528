//! Session, snapshot, settings, and export behavior through the
//! dashboard.

use std::sync::Arc;

use rust_decimal::Decimal;

use secrecy::SecretString;

use sephyx_admin::cache::CacheError;
use sephyx_admin::prefs::{MemoryPreferences, PreferenceKey, PreferenceStore};
use sephyx_admin::session::{SessionGate, StaticCredentials};
use sephyx_admin::OverviewStats;
use sephyx_core::{OrderLine, OrderSnapshot, ProductId, UserSnapshot};
use sephyx_integration_tests::{
    Harness, MockProductStore, PASSWORD, USERNAME, product, void_hoodie_draft,
};

fn snapshot_prefs() -> MemoryPreferences {
    let users = vec![
        UserSnapshot {
            id: "u1".to_string(),
            username: "nyx".to_string(),
            xp: 1200,
            rank: "operative".to_string(),
            time_spent_secs: 5400,
            puzzles_solved: 7,
        },
        UserSnapshot {
            id: "u2".to_string(),
            username: "cipher".to_string(),
            xp: 300,
            rank: "recruit".to_string(),
            time_spent_secs: 900,
            puzzles_solved: 1,
        },
    ];
    let orders = vec![
        OrderSnapshot {
            id: "o1".to_string(),
            username: "nyx".to_string(),
            total: Decimal::new(14999, 2),
            timestamp: 1_755_000_000_000,
            items: vec![OrderLine {
                product_id: ProductId::new(1),
                title: "VOID HOODIE".to_string(),
                quantity: 1,
            }],
        },
        OrderSnapshot {
            id: "o2".to_string(),
            username: "cipher".to_string(),
            total: Decimal::new(8999, 2),
            timestamp: 1_755_100_000_000,
            items: vec![OrderLine {
                product_id: ProductId::new(2),
                title: "REBEL MASK".to_string(),
                quantity: 1,
            }],
        },
    ];
    MemoryPreferences::with_snapshots(users, orders)
}

#[test]
fn login_rejects_bad_credentials() {
    let h = Harness::new(MockProductStore::new(), false);
    assert!(!h.dashboard.login(USERNAME, "wrong"));
    assert!(!h.dashboard.login("intruder", PASSWORD));
    assert!(!h.dashboard.is_authenticated());
}

#[test]
fn login_loads_snapshots_once() {
    let h = Harness::with_prefs(MockProductStore::new(), snapshot_prefs(), true);
    assert_eq!(h.dashboard.users().len(), 2);
    assert_eq!(h.dashboard.orders().len(), 2);
    assert_eq!(h.dashboard.users()[0].username, "nyx");
}

#[test]
fn session_survives_a_process_reload() {
    let prefs: Arc<dyn PreferenceStore> = Arc::new(snapshot_prefs());
    let verifier = Arc::new(StaticCredentials::new(
        USERNAME.to_string(),
        SecretString::from(PASSWORD),
    ));

    let gate = SessionGate::new(Arc::clone(&prefs), verifier.clone());
    assert!(gate.authenticate(USERNAME, PASSWORD));
    drop(gate);

    // A fresh gate over the same persisted store sees the open session
    // without re-entering credentials.
    let reloaded = SessionGate::new(prefs, verifier);
    assert!(reloaded.is_authenticated());
}

#[test]
fn logout_drops_session_and_form_state() {
    let h = Harness::with_prefs(MockProductStore::new(), snapshot_prefs(), true);
    h.dashboard.set_draft(void_hoodie_draft());
    h.dashboard.begin_edit(ProductId::new(1));

    h.dashboard.logout();

    assert!(!h.dashboard.is_authenticated());
    assert!(!h.prefs.flag(PreferenceKey::AdminSession));
    assert_eq!(h.dashboard.draft(), Default::default());
    assert_eq!(h.dashboard.editing(), None);
    assert!(h.dashboard.users().is_empty());
}

#[test]
fn settings_flags_are_independent_of_the_session() {
    let h = Harness::new(MockProductStore::new(), true);
    assert!(!h.dashboard.vault_unlocked());
    h.dashboard.set_vault_unlocked(true);
    h.dashboard.set_music_enabled(true);

    h.dashboard.logout();
    assert!(h.dashboard.vault_unlocked());
    assert!(h.dashboard.music_enabled());
}

#[tokio::test]
async fn overview_aggregates_store_and_snapshots() {
    let store = MockProductStore::with_products(vec![
        product(1, "VOID HOODIE", 14999, 15),
        product(2, "REBEL MASK", 8999, 25),
        product(3, "NEON JACKET", 24999, 5),
    ]);
    let h = Harness::with_prefs(store, snapshot_prefs(), true);

    let stats = h.dashboard.overview().await.expect("overview failed");
    assert_eq!(
        stats,
        OverviewStats {
            total_users: 2,
            total_products: 3,
            total_orders: 2,
            revenue: Decimal::new(23998, 2),
        }
    );
}

#[tokio::test]
async fn export_reflects_current_store_state() {
    let store = MockProductStore::with_products(vec![product(1, "VOID HOODIE", 14999, 15)]);
    let h = Harness::with_prefs(store, snapshot_prefs(), true);

    h.dashboard.products().await.expect("list failed");
    h.dashboard.set_draft(void_hoodie_draft());
    h.dashboard.submit_create().await.expect("create failed");

    let document = h.dashboard.export().await.expect("export failed");
    let json: serde_json::Value =
        serde_json::from_str(&document.to_json().expect("serialize failed")).expect("bad JSON");

    let products = json["products"].as_array().expect("products missing");
    assert_eq!(products.len(), 2, "export must include the new product");
    assert_eq!(json["users"].as_array().expect("users missing").len(), 2);
    assert_eq!(json["orders"].as_array().expect("orders missing").len(), 2);
    assert!(json["timestamp"].as_i64().expect("timestamp missing") > 0);
}

#[tokio::test]
async fn unauthenticated_dashboard_serves_no_data() {
    let store = MockProductStore::with_products(vec![product(1, "VOID HOODIE", 14999, 15)]);
    let h = Harness::new(store, false);

    let err = h.dashboard.products().await.expect_err("must fail");
    assert!(matches!(err, CacheError::Unauthorized));
    let err = h.dashboard.export().await.expect_err("must fail");
    assert!(matches!(err, CacheError::Unauthorized));
    assert!(h.dashboard.users().is_empty());
    assert_eq!(h.store.fetch_calls(), 0);
}

#[tokio::test]
async fn relogin_reloads_snapshots() {
    let h = Harness::with_prefs(MockProductStore::new(), snapshot_prefs(), true);
    h.dashboard.logout();
    assert!(h.dashboard.users().is_empty());

    assert!(h.dashboard.login(USERNAME, PASSWORD));
    assert_eq!(h.dashboard.users().len(), 2);
    assert_eq!(h.dashboard.orders().len(), 2);
}
