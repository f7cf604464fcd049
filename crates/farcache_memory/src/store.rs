// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The in-memory store implementation.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, SystemTime},
};

use parking_lot::Mutex;
use tick::Clock;

use farcache_remote::{RemoteStore, StoreError};

use crate::builder::InMemoryStoreBuilder;

#[derive(Debug)]
struct Entry {
    value: Vec<u8>,
    expires_at: SystemTime,
}

/// An in-memory [`RemoteStore`] with the remote service's literal TTL
/// semantics.
///
/// A zero TTL expires the entry immediately, exactly as the remote service
/// would treat it. Expired entries are dropped lazily when accessed. Expiry
/// is computed from the injected [`Clock`], so tests can freeze or advance
/// time deterministically.
///
/// Cloning is cheap and clones share the same underlying storage.
///
/// # Examples
///
/// ```
/// use farcache_memory::InMemoryStore;
/// use farcache_remote::RemoteStore;
/// use std::time::Duration;
/// use tick::Clock;
/// # futures::executor::block_on(async {
///
/// let store = InMemoryStore::new(Clock::new_frozen());
///
/// store.set("products", "sku-1", b"bytes".to_vec(), Duration::from_secs(60)).await?;
/// let value = store.get("products", "sku-1").await?;
/// assert_eq!(value.as_deref(), Some(b"bytes".as_slice()));
/// # Ok::<(), farcache_remote::StoreError>(())
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    name: Option<String>,
    data: Mutex<HashMap<(String, String), Entry>>,
    clock: Clock,
    closed: AtomicBool,
}

impl InMemoryStore {
    /// Creates a new empty store reading time from the given clock.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self::builder(clock).build()
    }

    /// Creates a new builder for configuring an in-memory store.
    #[must_use]
    pub fn builder(clock: Clock) -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::new(clock)
    }

    pub(crate) fn from_builder(builder: InMemoryStoreBuilder) -> Self {
        let data = builder
            .initial_capacity
            .map_or_else(HashMap::new, HashMap::with_capacity);

        Self {
            inner: Arc::new(Inner {
                name: builder.name,
                data: Mutex::new(data),
                clock: builder.clock,
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the configured name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Returns the number of entries currently held, including entries that
    /// have expired but not yet been dropped.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.inner.data.lock().len()
    }

    /// Returns `true` once [`RemoteStore::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.is_closed() {
            return Err(StoreError::from_message("store is closed"));
        }
        Ok(())
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        self.inner.clock.system_time() >= entry.expires_at
    }
}

impl RemoteStore for InMemoryStore {
    async fn get(&self, cache: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.ensure_open()?;

        let full_key = (cache.to_owned(), key.to_owned());
        let mut data = self.inner.data.lock();
        match data.get(&full_key) {
            Some(entry) if self.is_expired(entry) => {
                data.remove(&full_key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, cache: &str, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), StoreError> {
        self.ensure_open()?;

        // Literal remote semantics: a zero TTL lands already expired.
        let entry = Entry {
            value,
            expires_at: self.inner.clock.system_time() + ttl,
        };
        self.inner.data.lock().insert((cache.to_owned(), key.to_owned()), entry);
        Ok(())
    }

    async fn delete(&self, cache: &str, key: &str) -> Result<(), StoreError> {
        self.ensure_open()?;

        self.inner.data.lock().remove(&(cache.to_owned(), key.to_owned()));
        Ok(())
    }

    async fn close(&self) {
        self.inner.closed.store(true, Ordering::Release);
    }
}
