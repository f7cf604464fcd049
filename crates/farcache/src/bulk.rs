// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Bulk read operations.
//!
//! Bulk gets partition the key set into fixed-size chunks and fan out one
//! remote get per key within a chunk, awaiting the whole chunk before the
//! next one starts. The per-chunk barrier bounds peak in-flight requests to
//! the chunk size rather than the key-set size.

use std::{collections::HashMap, sync::Arc};

use futures::future::join_all;

use farcache_remote::{Error, RemoteStore, Result};

use crate::{
    client::CacheClient,
    registry::WireCodec,
    telemetry::{Activity, Operation},
    transcoder::Transcoder,
};

impl<R: RemoteStore> CacheClient<R> {
    /// Retrieves and decodes the values stored under `keys`.
    ///
    /// Keys that miss are omitted, so the result may hold fewer entries than
    /// were requested. The mapping is unordered; no ordering is guaranteed
    /// among keys within or across chunks.
    ///
    /// # Errors
    ///
    /// A single failing fetch or decode fails the whole call — no partial
    /// results are exposed. The chunk that observed the failure still runs
    /// to completion before the error is returned; later chunks are never
    /// issued.
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
    /// client.set("sku-1", Duration::from_secs(60), &1, &transcoder).await?;
    /// client.set("sku-2", Duration::from_secs(60), &2, &transcoder).await?;
    ///
    /// let values = client.bulk_get(["sku-1", "sku-2", "sku-3"], &transcoder).await?;
    /// assert_eq!(values.len(), 2);
    /// assert_eq!(values["sku-1"], 1);
    /// # Ok::<(), farcache::Error>(())
    /// # });
    /// ```
    pub async fn bulk_get<V>(
        &self,
        keys: impl IntoIterator<Item = impl Into<String>>,
        transcoder: &Arc<dyn Transcoder<Value = V>>,
    ) -> Result<HashMap<String, V>>
    where
        V: Send + Sync + 'static,
    {
        let codec = self.registry.resolve(transcoder);
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();

        let stopwatch = self.clock.stopwatch();
        let outcome = self.fetch_chunks(&keys, &codec).await;
        let activity = if outcome.is_ok() { Activity::Ok } else { Activity::Error };
        self.telemetry
            .record(&self.cache_name, Operation::BulkGet, activity, stopwatch.elapsed());

        if let Ok(hits) = &outcome {
            tracing::debug!(
                cache = self.cache_name.as_str(),
                requested = keys.len(),
                hits = hits.len(),
                "bulk get complete"
            );
        }
        outcome
    }

    async fn fetch_chunks<V>(&self, keys: &[String], codec: &WireCodec<V>) -> Result<HashMap<String, V>> {
        let mut hits = HashMap::new();

        for chunk in keys.chunks(self.chunk_size) {
            let fetches = chunk
                .iter()
                .map(|key| async move { (key, self.remote.get(&self.cache_name, key).await) });

            // Barrier: every fetch in the chunk settles before the next
            // chunk is issued.
            for (key, fetched) in join_all(fetches).await {
                if let Some(bytes) = fetched.map_err(Error::remote)? {
                    hits.insert(key.clone(), codec.decode(&bytes)?);
                }
            }
        }

        Ok(hits)
    }
}
