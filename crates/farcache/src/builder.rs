// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for constructing cache clients.
//!
//! Created by [`CacheClient::builder`]. The builder collects the remote
//! store, cache namespace, TTL default, bulk chunk bound, and telemetry
//! before constructing the client.

use std::time::Duration;

use tick::Clock;

use farcache_remote::RemoteStore;

use crate::{CacheClient, Telemetry, registry::TranscoderRegistry};

#[cfg(feature = "memory")]
use farcache_memory::InMemoryStore;

/// Cache namespace used when none is configured.
pub const DEFAULT_CACHE_NAME: &str = "default";

/// TTL applied when a set passes the zero sentinel and no default was
/// configured.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Upper bound on concurrently in-flight remote gets during a bulk read.
pub const DEFAULT_BULK_CHUNK_SIZE: usize = 50;

/// Builder for a [`CacheClient`].
///
/// # Examples
///
/// ```
/// use farcache::CacheClient;
/// use std::time::Duration;
/// use tick::Clock;
///
/// let client = CacheClient::builder(Clock::new_frozen())
///     .memory()
///     .cache_name("products")
///     .default_ttl(Duration::from_secs(120))
///     .bulk_chunk_size(25)
///     .build();
///
/// assert_eq!(client.name(), "products");
/// ```
#[derive(Debug)]
pub struct ClientBuilder<R = ()> {
    remote: R,
    cache_name: String,
    default_ttl: Duration,
    chunk_size: usize,
    telemetry: Telemetry,
    clock: Clock,
}

impl ClientBuilder<()> {
    pub(crate) fn new(clock: Clock) -> Self {
        Self {
            remote: (),
            cache_name: DEFAULT_CACHE_NAME.to_owned(),
            default_ttl: DEFAULT_TTL,
            chunk_size: DEFAULT_BULK_CHUNK_SIZE,
            telemetry: Telemetry::new(),
            clock,
        }
    }

    /// Sets the remote store the client will operate against.
    pub fn remote<R>(self, remote: R) -> ClientBuilder<R>
    where
        R: RemoteStore,
    {
        ClientBuilder {
            remote,
            cache_name: self.cache_name,
            default_ttl: self.default_ttl,
            chunk_size: self.chunk_size,
            telemetry: self.telemetry,
            clock: self.clock,
        }
    }

    /// Configures the client against an in-memory store.
    ///
    /// Useful for tests and local development; the store reproduces the
    /// remote service's literal TTL semantics.
    #[cfg(feature = "memory")]
    #[must_use]
    pub fn memory(self) -> ClientBuilder<InMemoryStore> {
        let store = InMemoryStore::new(self.clock.clone());
        self.remote(store)
    }
}

impl<R> ClientBuilder<R> {
    /// Sets the cache namespace all operations address.
    #[must_use]
    pub fn cache_name(mut self, name: impl Into<String>) -> Self {
        self.cache_name = name.into();
        self
    }

    /// Sets the TTL substituted when a set passes [`Duration::ZERO`].
    ///
    /// Must be non-zero; a zero default would reach the remote service
    /// literally and expire entries immediately.
    #[must_use]
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Sets the bulk-get chunk bound.
    ///
    /// Bulk reads fan out at most this many concurrent remote gets at a
    /// time; values below 1 are clamped to 1.
    #[must_use]
    pub fn bulk_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Sets the telemetry recorder for this client.
    #[must_use]
    pub fn telemetry(mut self, telemetry: Telemetry) -> Self {
        self.telemetry = telemetry;
        self
    }
}

impl<R: RemoteStore> ClientBuilder<R> {
    /// Builds the client with the configured store and settings.
    #[must_use]
    pub fn build(self) -> CacheClient<R> {
        CacheClient {
            cache_name: self.cache_name,
            remote: self.remote,
            clock: self.clock,
            default_ttl: self.default_ttl,
            chunk_size: self.chunk_size,
            registry: TranscoderRegistry::new(),
            telemetry: self.telemetry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "memory")]
    #[test]
    fn builder_defaults() {
        let client = CacheClient::builder(Clock::new_frozen()).memory().build();

        assert_eq!(client.name(), DEFAULT_CACHE_NAME);
        assert_eq!(client.default_ttl, DEFAULT_TTL);
        assert_eq!(client.chunk_size, DEFAULT_BULK_CHUNK_SIZE);
    }

    #[cfg(feature = "memory")]
    #[test]
    fn builder_overrides() {
        let client = CacheClient::builder(Clock::new_frozen())
            .memory()
            .cache_name("products")
            .default_ttl(Duration::from_secs(60))
            .bulk_chunk_size(10)
            .build();

        assert_eq!(client.name(), "products");
        assert_eq!(client.default_ttl, Duration::from_secs(60));
        assert_eq!(client.chunk_size, 10);
    }

    #[cfg(feature = "memory")]
    #[test]
    fn zero_chunk_size_is_clamped() {
        let client = CacheClient::builder(Clock::new_frozen())
            .memory()
            .bulk_chunk_size(0)
            .build();

        assert_eq!(client.chunk_size, 1);
    }
}
