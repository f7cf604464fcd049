// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The cache client adapter.
//!
//! [`CacheClient`] exposes the memcached-style contract over any
//! [`RemoteStore`]. The client is stateless apart from the memoized
//! transcoder registry and the store handle itself, so it can be shared
//! freely behind a reference; all suspension happens awaiting remote calls.

use std::{sync::Arc, time::Duration};

use tick::{Clock, FutureExt as _, Stopwatch};

use farcache_remote::{Error, RemoteStore, Result};

use crate::{
    builder::ClientBuilder,
    registry::{TranscoderRegistry, WireCodec},
    telemetry::{Activity, Operation, Telemetry},
    transcoder::Transcoder,
};

/// A memcached-style cache client over a byte-only remote store.
///
/// Values travel through a caller-supplied [`Transcoder`] and the envelope
/// framing; TTLs of [`Duration::ZERO`] are replaced with the configured
/// default before they reach the remote service (which would treat zero as
/// immediate expiry). A miss is `Ok(None)`, never an error.
///
/// # Examples
///
/// ```
/// use farcache::{CacheClient, default_transcoder};
/// use std::time::Duration;
/// use tick::Clock;
/// # futures::executor::block_on(async {
///
/// let client = CacheClient::builder(Clock::new_frozen())
///     .memory()
///     .cache_name("products")
///     .build();
///
/// let transcoder = default_transcoder::<u64>();
/// client.set("sku-1", Duration::from_secs(60), &7, &transcoder).await?;
/// assert_eq!(client.get("sku-1", &transcoder).await?, Some(7));
/// # Ok::<(), farcache::Error>(())
/// # });
/// ```
#[derive(Debug)]
pub struct CacheClient<R> {
    pub(crate) cache_name: String,
    pub(crate) remote: R,
    pub(crate) clock: Clock,
    pub(crate) default_ttl: Duration,
    pub(crate) chunk_size: usize,
    pub(crate) registry: TranscoderRegistry,
    pub(crate) telemetry: Telemetry,
}

impl CacheClient<()> {
    /// Creates a new client builder.
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
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder(clock: Clock) -> ClientBuilder<()> {
        ClientBuilder::new(clock)
    }
}

/// Accessors.
impl<R> CacheClient<R> {
    /// Returns the cache namespace this client operates on.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.cache_name
    }

    /// Returns a reference to the client's clock.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Returns the underlying remote store handle.
    ///
    /// This is an escape hatch for store-specific functionality the adapter
    /// does not expose. The handle stays owned by the client; shutdown
    /// semantics are unaffected.
    #[must_use]
    pub fn remote(&self) -> &R {
        &self.remote
    }
}

/// The memcached-style contract.
impl<R: RemoteStore> CacheClient<R> {
    /// Retrieves and decodes the value stored under `key`.
    ///
    /// Returns `Ok(None)` on a miss. The hit/miss outcome is logged.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails
    /// ([`Remote`](farcache_remote::ErrorKind::Remote)) or the stored bytes
    /// cannot be decoded
    /// ([`MalformedEnvelope`](farcache_remote::ErrorKind::MalformedEnvelope)).
    pub async fn get<V>(&self, key: &str, transcoder: &Arc<dyn Transcoder<Value = V>>) -> Result<Option<V>>
    where
        V: Send + Sync + 'static,
    {
        let codec = self.registry.resolve(transcoder);
        let stopwatch = self.clock.stopwatch();
        let fetched = self.remote.get(&self.cache_name, key).await.map_err(Error::remote);
        self.finish_get(&codec, fetched, &stopwatch)
    }

    /// Like [`get`](Self::get), racing the remote call against a deadline.
    ///
    /// On expiry the in-flight remote future is dropped and the call fails
    /// with the [`Timeout`](farcache_remote::ErrorKind::Timeout) kind.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), plus the timeout case.
    pub async fn get_with_timeout<V>(
        &self,
        key: &str,
        transcoder: &Arc<dyn Transcoder<Value = V>>,
        timeout: Duration,
    ) -> Result<Option<V>>
    where
        V: Send + Sync + 'static,
    {
        let codec = self.registry.resolve(transcoder);
        let stopwatch = self.clock.stopwatch();
        let fetched = match self.remote.get(&self.cache_name, key).timeout(&self.clock, timeout).await {
            Ok(result) => result.map_err(Error::remote),
            Err(_expired) => Err(Error::timeout()),
        };
        self.finish_get(&codec, fetched, &stopwatch)
    }

    /// Encodes `value` and stores it under `key`.
    ///
    /// A `ttl` of [`Duration::ZERO`] means "use the configured default TTL";
    /// it is substituted before the value reaches the remote service, which
    /// would otherwise expire the entry immediately.
    ///
    /// Returns whether the remote call reported success.
    ///
    /// # Errors
    ///
    /// Returns an error when encoding or the remote call fails.
    pub async fn set<V>(
        &self,
        key: &str,
        ttl: Duration,
        value: &V,
        transcoder: &Arc<dyn Transcoder<Value = V>>,
    ) -> Result<bool>
    where
        V: Send + Sync + 'static,
    {
        let codec = self.registry.resolve(transcoder);
        let bytes = codec.encode(value)?;
        let ttl = if ttl.is_zero() { self.default_ttl } else { ttl };

        let stopwatch = self.clock.stopwatch();
        let result = self
            .remote
            .set(&self.cache_name, key, bytes, ttl)
            .await
            .map_err(Error::remote);
        let activity = if result.is_ok() { Activity::Stored } else { Activity::Error };
        self.telemetry
            .record(&self.cache_name, Operation::Set, activity, stopwatch.elapsed());
        result.map(|()| true)
    }

    /// Removes the entry stored under `key`.
    ///
    /// Issues a native remote delete; deleting an absent key succeeds.
    /// Returns whether the remote call reported success.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let stopwatch = self.clock.stopwatch();
        let result = self.remote.delete(&self.cache_name, key).await.map_err(Error::remote);
        let activity = if result.is_ok() { Activity::Deleted } else { Activity::Error };
        self.telemetry
            .record(&self.cache_name, Operation::Delete, activity, stopwatch.elapsed());
        result.map(|()| true)
    }

    /// Unsupported; always fails with
    /// [`Unsupported`](farcache_remote::ErrorKind::Unsupported) and performs
    /// no remote call.
    pub fn increment(&self, _key: &str, _delta: u64) -> Result<u64> {
        self.telemetry.record_unsupported(&self.cache_name, "increment");
        Err(Error::unsupported("increment"))
    }

    /// Unsupported; always fails with
    /// [`Unsupported`](farcache_remote::ErrorKind::Unsupported) and performs
    /// no remote call.
    pub fn decrement(&self, _key: &str, _delta: u64) -> Result<u64> {
        self.telemetry.record_unsupported(&self.cache_name, "decrement");
        Err(Error::unsupported("decrement"))
    }

    /// Unsupported; always fails with
    /// [`Unsupported`](farcache_remote::ErrorKind::Unsupported) and performs
    /// no remote call.
    pub fn add<V>(
        &self,
        _key: &str,
        _ttl: Duration,
        _value: &V,
        _transcoder: &Arc<dyn Transcoder<Value = V>>,
    ) -> Result<bool> {
        self.telemetry.record_unsupported(&self.cache_name, "add");
        Err(Error::unsupported("add"))
    }

    /// Unsupported; always fails with
    /// [`Unsupported`](farcache_remote::ErrorKind::Unsupported) and performs
    /// no remote call.
    pub fn flush_all(&self) -> Result<()> {
        self.telemetry.record_unsupported(&self.cache_name, "flush_all");
        Err(Error::unsupported("flush_all"))
    }

    /// Shuts the client down, releasing the remote handle.
    ///
    /// Consuming the client guarantees the handle is closed exactly once.
    pub async fn shutdown(self) {
        self.remote.close().await;
        tracing::debug!(cache = self.cache_name.as_str(), "cache client shut down");
    }

    fn finish_get<V>(
        &self,
        codec: &WireCodec<V>,
        fetched: Result<Option<Vec<u8>>>,
        stopwatch: &Stopwatch,
    ) -> Result<Option<V>> {
        let outcome = fetched.and_then(|bytes| bytes.map(|bytes| codec.decode(&bytes)).transpose());
        let activity = match &outcome {
            Ok(Some(_)) => Activity::Hit,
            Ok(None) => Activity::Miss,
            Err(_) => Activity::Error,
        };
        self.telemetry
            .record(&self.cache_name, Operation::Get, activity, stopwatch.elapsed());
        outcome
    }
}
