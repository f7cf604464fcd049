// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for the in-memory store's remote-service semantics.

use std::time::Duration;

use tick::{Clock, ClockControl};

use farcache_memory::InMemoryStore;
use farcache_remote::RemoteStore;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

#[test]
fn set_then_get_returns_stored_bytes() {
    block_on(async {
        let store = InMemoryStore::new(Clock::new_frozen());

        store
            .set("products", "sku-1", b"bytes".to_vec(), Duration::from_secs(60))
            .await
            .expect("error on set");

        let value = store.get("products", "sku-1").await.expect("error on get");
        assert_eq!(value.as_deref(), Some(b"bytes".as_slice()));
    });
}

#[test]
fn get_miss_returns_none() {
    block_on(async {
        let store = InMemoryStore::new(Clock::new_frozen());
        assert!(store.get("products", "absent").await.expect("error on get").is_none());
    });
}

#[test]
fn zero_ttl_expires_immediately() {
    block_on(async {
        let store = InMemoryStore::new(Clock::new_frozen());

        store
            .set("products", "sku-1", b"bytes".to_vec(), Duration::ZERO)
            .await
            .expect("error on set");

        // The remote contract treats zero literally, not as "no expiry".
        assert!(store.get("products", "sku-1").await.expect("error on get").is_none());
    });
}

#[test]
fn entry_survives_until_ttl_elapses() {
    block_on(async {
        let control = ClockControl::new();
        let store = InMemoryStore::new(control.to_clock());

        store
            .set("products", "sku-1", b"bytes".to_vec(), Duration::from_secs(60))
            .await
            .expect("error on set");

        control.advance(Duration::from_secs(59));
        assert!(store.get("products", "sku-1").await.expect("error on get").is_some());

        control.advance(Duration::from_secs(1));
        assert!(store.get("products", "sku-1").await.expect("error on get").is_none());
    });
}

#[test]
fn expired_entry_is_dropped_on_access() {
    block_on(async {
        let control = ClockControl::new();
        let store = InMemoryStore::new(control.to_clock());

        store
            .set("products", "sku-1", b"bytes".to_vec(), Duration::from_secs(1))
            .await
            .expect("error on set");
        assert_eq!(store.entry_count(), 1);

        control.advance(Duration::from_secs(2));
        let _ = store.get("products", "sku-1").await.expect("error on get");
        assert_eq!(store.entry_count(), 0);
    });
}

#[test]
fn overwrite_replaces_value_and_ttl() {
    block_on(async {
        let control = ClockControl::new();
        let store = InMemoryStore::new(control.to_clock());

        store
            .set("products", "sku-1", b"old".to_vec(), Duration::from_secs(1))
            .await
            .expect("error on set");
        store
            .set("products", "sku-1", b"new".to_vec(), Duration::from_secs(60))
            .await
            .expect("error on set");

        control.advance(Duration::from_secs(2));
        let value = store.get("products", "sku-1").await.expect("error on get");
        assert_eq!(value.as_deref(), Some(b"new".as_slice()));
    });
}

#[test]
fn namespaces_are_disjoint() {
    block_on(async {
        let store = InMemoryStore::new(Clock::new_frozen());

        store
            .set("first", "k", b"one".to_vec(), Duration::from_secs(60))
            .await
            .expect("error on set");

        assert!(store.get("second", "k").await.expect("error on get").is_none());
    });
}

#[test]
fn delete_removes_entry() {
    block_on(async {
        let store = InMemoryStore::new(Clock::new_frozen());

        store
            .set("products", "sku-1", b"bytes".to_vec(), Duration::from_secs(60))
            .await
            .expect("error on set");
        store.delete("products", "sku-1").await.expect("error on delete");

        assert!(store.get("products", "sku-1").await.expect("error on get").is_none());
    });
}

#[test]
fn operations_fail_after_close() {
    block_on(async {
        let store = InMemoryStore::new(Clock::new_frozen());
        store.close().await;

        assert!(store.is_closed());
        assert!(store.get("products", "sku-1").await.is_err());
        assert!(
            store
                .set("products", "sku-1", Vec::new(), Duration::from_secs(1))
                .await
                .is_err()
        );
        assert!(store.delete("products", "sku-1").await.is_err());
    });
}

#[test]
fn clones_share_storage() {
    block_on(async {
        let store = InMemoryStore::new(Clock::new_frozen());
        let handle = store.clone();

        store
            .set("products", "sku-1", b"bytes".to_vec(), Duration::from_secs(60))
            .await
            .expect("error on set");

        assert!(handle.get("products", "sku-1").await.expect("error on get").is_some());
    });
}

#[test]
fn builder_configures_name() {
    let store = InMemoryStore::builder(Clock::new_frozen())
        .initial_capacity(16)
        .name("local-products")
        .build();

    assert_eq!(store.name(), Some("local-products"));
    assert_eq!(store.entry_count(), 0);
}
