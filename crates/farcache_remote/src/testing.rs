// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mock remote store for testing.
//!
//! This module provides [`MockRemote`], a configurable in-memory store that
//! records every call and supports failure injection for exercising error
//! paths without a live remote service.

use std::{collections::HashMap, sync::Arc, time::Duration};

use parking_lot::Mutex;

use crate::{RemoteStore, StoreError};

/// Recorded store operation with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// A get was issued for the given namespace and key.
    Get {
        /// The cache namespace.
        cache: String,
        /// The key that was fetched.
        key: String,
    },
    /// A set was issued with the given bytes and time-to-live.
    Set {
        /// The cache namespace.
        cache: String,
        /// The key that was written.
        key: String,
        /// The stored bytes.
        value: Vec<u8>,
        /// The time-to-live the store received.
        ttl: Duration,
    },
    /// A delete was issued for the given namespace and key.
    Delete {
        /// The cache namespace.
        cache: String,
        /// The key that was removed.
        key: String,
    },
}

type FailPredicate = Box<dyn Fn(&StoreOp) -> bool + Send + Sync>;

/// A configurable mock remote store.
///
/// Stores values in memory (TTLs are recorded, not enforced), records all
/// operations for later verification, and can be configured to fail or hang
/// on demand.
///
/// # Examples
///
/// ```no_run
/// use farcache_remote::{testing::{MockRemote, StoreOp}, RemoteStore};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), farcache_remote::StoreError> {
/// let store = MockRemote::new();
///
/// store.set("products", "sku-1", b"bytes".to_vec(), Duration::from_secs(60)).await?;
/// let value = store.get("products", "sku-1").await?;
/// assert_eq!(value.as_deref(), Some(b"bytes".as_slice()));
/// # Ok(())
/// # }
/// ```
///
/// # Failure Injection
///
/// ```no_run
/// use farcache_remote::{testing::{MockRemote, StoreOp}, RemoteStore};
///
/// # async fn example() {
/// let store = MockRemote::new();
///
/// // Fail gets for one specific key.
/// store.fail_when(|op| matches!(op, StoreOp::Get { key, .. } if key == "poisoned"));
/// assert!(store.get("products", "poisoned").await.is_err());
/// assert!(store.get("products", "healthy").await.is_ok());
/// # }
/// ```
pub struct MockRemote {
    data: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
    operations: Arc<Mutex<Vec<StoreOp>>>,
    fail_when: Arc<Mutex<Option<FailPredicate>>>,
    hang_gets: Arc<Mutex<bool>>,
    close_count: Arc<Mutex<usize>>,
}

impl std::fmt::Debug for MockRemote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRemote")
            .field("data", &self.data)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .field("hang_gets", &*self.hang_gets.lock())
            .field("close_count", &*self.close_count.lock())
            .finish()
    }
}

impl Clone for MockRemote {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
            hang_gets: Arc::clone(&self.hang_gets),
            close_count: Arc::clone(&self.close_count),
        }
    }
}

impl Default for MockRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRemote {
    /// Creates a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
            hang_gets: Arc::new(Mutex::new(false)),
            close_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Seeds an entry without recording an operation.
    pub fn preload(&self, cache: impl Into<String>, key: impl Into<String>, value: Vec<u8>) {
        self.data.lock().insert((cache.into(), key.into()), value);
    }

    /// Returns the bytes currently stored for a key, if any.
    #[must_use]
    pub fn stored(&self, cache: &str, key: &str) -> Option<Vec<u8>> {
        self.data.lock().get(&(cache.to_owned(), key.to_owned())).cloned()
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Sets a predicate that determines which operations fail.
    ///
    /// The predicate receives the operation and returns `true` if it should
    /// fail with a [`StoreError`].
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&StoreOp) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Makes every subsequent get pend forever.
    ///
    /// Useful for exercising deadline racing: the caller's timeout fires
    /// while the mock never resolves.
    pub fn hang_gets(&self, enabled: bool) {
        *self.hang_gets.lock() = enabled;
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<StoreOp> {
        self.operations.lock().clone()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    /// Returns how many times [`RemoteStore::close`] has been called.
    #[must_use]
    pub fn close_count(&self) -> usize {
        *self.close_count.lock()
    }

    fn record(&self, op: StoreOp) {
        self.operations.lock().push(op);
    }

    fn should_fail(&self, op: &StoreOp) -> bool {
        self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(op))
    }
}

impl RemoteStore for MockRemote {
    async fn get(&self, cache: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let op = StoreOp::Get {
            cache: cache.to_owned(),
            key: key.to_owned(),
        };
        let should_fail = self.should_fail(&op);
        let hang = *self.hang_gets.lock();
        self.record(op);
        if should_fail {
            return Err(StoreError::caused_by("mock: get failed"));
        }
        if hang {
            std::future::pending::<()>().await;
        }
        Ok(self.data.lock().get(&(cache.to_owned(), key.to_owned())).cloned())
    }

    async fn set(&self, cache: &str, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), StoreError> {
        let op = StoreOp::Set {
            cache: cache.to_owned(),
            key: key.to_owned(),
            value: value.clone(),
            ttl,
        };
        let should_fail = self.should_fail(&op);
        self.record(op);
        if should_fail {
            return Err(StoreError::caused_by("mock: set failed"));
        }
        self.data.lock().insert((cache.to_owned(), key.to_owned()), value);
        Ok(())
    }

    async fn delete(&self, cache: &str, key: &str) -> Result<(), StoreError> {
        let op = StoreOp::Delete {
            cache: cache.to_owned(),
            key: key.to_owned(),
        };
        let should_fail = self.should_fail(&op);
        self.record(op);
        if should_fail {
            return Err(StoreError::caused_by("mock: delete failed"));
        }
        self.data.lock().remove(&(cache.to_owned(), key.to_owned()));
        Ok(())
    }

    async fn close(&self) {
        *self.close_count.lock() += 1;
    }
}
