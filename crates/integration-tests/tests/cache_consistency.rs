//! Behavioral tests for the product-list cache: single-flight
//! coalescing, invalidation idempotence, failure handling, and the
//! invalidation-during-fetch race.

use std::sync::Arc;
use std::time::Duration;

use sephyx_admin::cache::{CacheError, ProductCache};
use sephyx_admin::store::ProductStore;
use sephyx_integration_tests::{MockProductStore, gate, product};

fn seeded_store() -> MockProductStore {
    MockProductStore::with_products(vec![
        product(1, "VOID HOODIE", 14999, 15),
        product(2, "REBEL MASK", 8999, 25),
    ])
}

#[tokio::test]
async fn concurrent_lists_coalesce_into_one_fetch() {
    let store = seeded_store();
    let release = store.hold_fetches();
    let store = Arc::new(store);
    let cache = Arc::new(ProductCache::new(Arc::clone(&store), gate(true)));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move { cache.list().await }));
    }

    // Let every caller reach the cache before the fetch resolves.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.fetch_calls(), 1, "callers must share one fetch");
    release.add_permits(1);

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.expect("task panicked").expect("list failed"));
    }

    assert_eq!(store.fetch_calls(), 1);
    let first = results.first().expect("no results");
    assert_eq!(first.len(), 2);
    for other in &results {
        assert!(
            Arc::ptr_eq(first, other),
            "all callers must observe the same snapshot"
        );
    }
}

#[tokio::test]
async fn list_serves_from_cache_until_invalidated() {
    let store = Arc::new(seeded_store());
    let cache = ProductCache::new(Arc::clone(&store), gate(true));

    let first = cache.list().await.expect("list failed");
    let second = cache.list().await.expect("list failed");
    assert_eq!(store.fetch_calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));

    cache.invalidate().await;
    let third = cache.list().await.expect("list failed");
    assert_eq!(store.fetch_calls(), 2);
    assert_eq!(*third, *first);
}

#[tokio::test]
async fn invalidate_twice_equals_once() {
    let store = Arc::new(seeded_store());
    let cache = ProductCache::new(Arc::clone(&store), gate(true));

    cache.list().await.expect("list failed");
    cache.invalidate().await;
    cache.invalidate().await;
    cache.list().await.expect("list failed");

    // One populate, one re-populate; the double invalidation added nothing.
    assert_eq!(store.fetch_calls(), 2);
}

#[tokio::test]
async fn fetch_failure_leaves_cache_invalid_and_retries() {
    let store = Arc::new(seeded_store());
    let cache = ProductCache::new(Arc::clone(&store), gate(true));

    store.fail_fetches(true);
    let err = cache.list().await.expect_err("fetch should fail");
    assert!(matches!(err, CacheError::Fetch(_)));
    assert_eq!(store.fetch_calls(), 1);

    // No partial entry was stored; the next list retries and succeeds.
    store.fail_fetches(false);
    let products = cache.list().await.expect("retry failed");
    assert_eq!(store.fetch_calls(), 2);
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn unauthenticated_list_makes_no_network_access() {
    let store = Arc::new(seeded_store());
    let cache = ProductCache::new(Arc::clone(&store), gate(false));

    let err = cache.list().await.expect_err("must be rejected");
    assert!(matches!(err, CacheError::Unauthorized));
    assert_eq!(store.fetch_calls(), 0);
}

#[tokio::test]
async fn invalidation_during_fetch_forces_refetch() {
    let store = seeded_store();
    let release = store.hold_fetches();
    let store = Arc::new(store);
    let cache = Arc::new(ProductCache::new(Arc::clone(&store), gate(true)));

    let in_flight = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.list().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.fetch_calls(), 1);

    // The mutation lands while the fetch is still in flight.
    store
        .create_product(&sephyx_integration_tests::void_hoodie_draft())
        .await
        .expect("create failed");
    cache.invalidate().await;

    release.add_permits(1);
    in_flight
        .await
        .expect("task panicked")
        .expect("list failed");

    // The superseded fetch must not have kept the slot: the next read
    // re-fetches the authoritative list.
    release.add_permits(1);
    let products = cache.list().await.expect("list failed");
    assert_eq!(store.fetch_calls(), 2);
    assert_eq!(products.len(), 3);
}
