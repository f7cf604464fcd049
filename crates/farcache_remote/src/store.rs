// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The core trait for remote cache store clients.
//!
//! [`RemoteStore`] defines the byte-level interface the adapter consumes.
//! Implement it for your remote service's client, then use `farcache` to
//! layer the memcached-style contract (typed values, TTL defaulting, bulk
//! reads, error translation) on top.

use std::time::Duration;

use crate::StoreError;

/// Trait for asynchronous remote key-value cache clients.
///
/// The store carries opaque bytes only; all type metadata travels inside the
/// payload (see [`Envelope`](crate::Envelope)). Implementations must be safe
/// for concurrent calls through a shared reference — connection pooling, if
/// any, is the implementation's responsibility.
///
/// TTLs are passed through literally: a zero duration means the entry
/// expires immediately. The adapter substitutes its configured default
/// before the value reaches this trait.
pub trait RemoteStore: Send + Sync {
    /// Fetches the bytes stored under `key` in the `cache` namespace.
    ///
    /// Returns `Ok(None)` when the key is absent or expired; a miss is not
    /// an error.
    fn get(&self, cache: &str, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send;

    /// Stores `value` under `key` in the `cache` namespace with the given
    /// time-to-live.
    fn set(&self, cache: &str, key: &str, value: Vec<u8>, ttl: Duration) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Removes the entry stored under `key` in the `cache` namespace.
    ///
    /// Deleting an absent key is not an error.
    fn delete(&self, cache: &str, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Releases the underlying connection or session.
    ///
    /// The owning adapter calls this exactly once, on shutdown.
    fn close(&self) -> impl Future<Output = ()> + Send;
}
