// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Per-client memoization of wire codecs.
//!
//! Resolving a transcoder through the registry fuses it with envelope
//! framing into a [`WireCodec`] and caches the result, so repeated calls with
//! the same transcoder instance do not rebuild the adapter.

use std::{any::Any, collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use farcache_remote::{Envelope, Error};

use crate::transcoder::Transcoder;

/// A transcoder fused with envelope framing.
///
/// Maps values directly to and from the byte sequences the remote store
/// carries: encode wraps the transcoded payload in an envelope, decode parses
/// the envelope before handing it to the transcoder.
pub struct WireCodec<V> {
    transcoder: Arc<dyn Transcoder<Value = V>>,
}

impl<V> std::fmt::Debug for WireCodec<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WireCodec").finish_non_exhaustive()
    }
}

impl<V> WireCodec<V> {
    fn new(transcoder: Arc<dyn Transcoder<Value = V>>) -> Self {
        Self { transcoder }
    }

    pub(crate) fn encode(&self, value: &V) -> Result<Vec<u8>, Error> {
        Ok(self.transcoder.encode(value)?.to_bytes())
    }

    pub(crate) fn decode(&self, bytes: &[u8]) -> Result<V, Error> {
        self.transcoder.decode(Envelope::from_bytes(bytes)?)
    }
}

/// Instance-scoped mapping from transcoder identity to its memoized codec.
///
/// Identity is the transcoder's `Arc` pointer: semantically equal but
/// distinct instances intentionally get separate entries. Each codec keeps a
/// strong reference to its transcoder, so a live entry's address cannot be
/// recycled out from under the map.
pub(crate) struct TranscoderRegistry {
    codecs: Mutex<HashMap<usize, Arc<dyn Any + Send + Sync>>>,
}

impl std::fmt::Debug for TranscoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscoderRegistry")
            .field("len", &self.codecs.lock().len())
            .finish_non_exhaustive()
    }
}

impl TranscoderRegistry {
    pub(crate) fn new() -> Self {
        Self {
            codecs: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the memoized codec for the given transcoder, constructing and
    /// retaining one on first use.
    ///
    /// The memoization write happens under the registry lock, so racing
    /// first-use from multiple threads retains exactly one instance.
    pub(crate) fn resolve<V>(&self, transcoder: &Arc<dyn Transcoder<Value = V>>) -> Arc<WireCodec<V>>
    where
        V: Send + Sync + 'static,
    {
        let identity = Arc::as_ptr(transcoder).cast::<()>().addr();

        let mut codecs = self.codecs.lock();
        if let Some(codec) = codecs
            .get(&identity)
            .and_then(|codec| Arc::clone(codec).downcast::<WireCodec<V>>().ok())
        {
            return codec;
        }

        let codec = Arc::new(WireCodec::new(Arc::clone(transcoder)));
        codecs.insert(identity, Arc::clone(&codec) as Arc<dyn Any + Send + Sync>);
        codec
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.codecs.lock().len()
    }
}
