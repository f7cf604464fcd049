// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Pluggable value transcoding.
//!
//! A [`Transcoder`] turns typed values into [`Envelope`]s and back. The
//! envelope's flags word marks the serialization format so the decode path
//! can be routed (and misrouted payloads rejected) without any type metadata
//! in the remote store itself.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

use farcache_remote::{Envelope, Error};

/// Flags word marking a raw, untranscoded payload.
pub const FLAG_RAW: u32 = 0;

/// Flags word marking a postcard-serialized payload.
pub const FLAG_POSTCARD: u32 = 1;

/// A pluggable encode/decode strategy for cached values.
///
/// Transcoders are selected per call and identified by instance: the client
/// memoizes one wire codec per transcoder `Arc`, so two distinct instances —
/// even of the same type — get independent codecs.
pub trait Transcoder: Send + Sync {
    /// The value type this transcoder produces and consumes.
    type Value;

    /// Encodes a value into an envelope.
    ///
    /// # Errors
    ///
    /// Returns an error when the value cannot be serialized.
    fn encode(&self, value: &Self::Value) -> Result<Envelope, Error>;

    /// Decodes an envelope back into a value.
    ///
    /// # Errors
    ///
    /// Returns an error when the envelope's flags mark a different format or
    /// the payload cannot be deserialized.
    fn decode(&self, envelope: Envelope) -> Result<Self::Value, Error>;
}

/// Returns the provider's default transcoder for a serde-serializable type.
///
/// A fresh instance is constructed per call; callers that want the client's
/// codec memoization to apply should hold on to the returned `Arc` and reuse
/// it across operations.
#[must_use]
pub fn default_transcoder<V>() -> Arc<dyn Transcoder<Value = V>>
where
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    Arc::new(SerdeTranscoder::new())
}

/// The default transcoder: serde values in postcard wire format.
///
/// Payloads are marked with [`FLAG_POSTCARD`]; decoding rejects any other
/// flags word rather than guessing at the payload format.
#[derive(Clone, Debug)]
pub struct SerdeTranscoder<V> {
    _phantom: PhantomData<fn() -> V>,
}

impl<V> Default for SerdeTranscoder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SerdeTranscoder<V> {
    /// Creates a new serde transcoder.
    #[must_use]
    pub fn new() -> Self {
        Self { _phantom: PhantomData }
    }
}

impl<V> Transcoder for SerdeTranscoder<V>
where
    V: Serialize + DeserializeOwned + Send + Sync,
{
    type Value = V;

    fn encode(&self, value: &V) -> Result<Envelope, Error> {
        let payload = postcard::to_allocvec(value).map_err(Error::remote)?;
        Ok(Envelope::new(FLAG_POSTCARD, payload))
    }

    fn decode(&self, envelope: Envelope) -> Result<V, Error> {
        if envelope.flags() != FLAG_POSTCARD {
            return Err(Error::corrupt(format!(
                "flags {:#x} do not mark a postcard payload",
                envelope.flags()
            )));
        }
        postcard::from_bytes(envelope.payload()).map_err(Error::corrupt)
    }
}

/// A passthrough transcoder for callers that manage their own bytes.
///
/// Encodes with [`FLAG_RAW`] and ignores flags on decode.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawTranscoder;

impl Transcoder for RawTranscoder {
    type Value = Vec<u8>;

    fn encode(&self, value: &Vec<u8>) -> Result<Envelope, Error> {
        Ok(Envelope::new(FLAG_RAW, value.clone()))
    }

    fn decode(&self, envelope: Envelope) -> Result<Vec<u8>, Error> {
        Ok(envelope.into_payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farcache_remote::ErrorKind;

    #[test]
    fn serde_transcoder_round_trip() {
        let transcoder = SerdeTranscoder::<String>::new();
        let envelope = transcoder.encode(&"value".to_string()).expect("encode failed");
        assert_eq!(envelope.flags(), FLAG_POSTCARD);

        let decoded = transcoder.decode(envelope).expect("decode failed");
        assert_eq!(decoded, "value");
    }

    #[test]
    fn serde_transcoder_rejects_foreign_flags() {
        let transcoder = SerdeTranscoder::<String>::new();
        let error = transcoder
            .decode(Envelope::new(0x2A, b"whatever".to_vec()))
            .expect_err("foreign flags accepted");
        assert_eq!(error.kind(), ErrorKind::MalformedEnvelope);
    }

    #[test]
    fn serde_transcoder_rejects_garbage_payload() {
        let transcoder = SerdeTranscoder::<Vec<u64>>::new();
        // A length prefix far past the end of the payload.
        let error = transcoder
            .decode(Envelope::new(FLAG_POSTCARD, vec![0xFF, 0xFF]))
            .expect_err("garbage payload accepted");
        assert_eq!(error.kind(), ErrorKind::MalformedEnvelope);
    }

    #[test]
    fn raw_transcoder_passes_bytes_through() {
        let transcoder = RawTranscoder;
        let envelope = transcoder.encode(&vec![1, 2, 3]).expect("encode failed");
        assert_eq!(envelope.flags(), FLAG_RAW);
        assert_eq!(transcoder.decode(envelope).expect("decode failed"), vec![1, 2, 3]);
    }

    #[test]
    fn raw_transcoder_ignores_flags_on_decode() {
        let transcoder = RawTranscoder;
        let decoded = transcoder
            .decode(Envelope::new(0xFFFF, b"opaque".to_vec()))
            .expect("decode failed");
        assert_eq!(decoded, b"opaque".to_vec());
    }

    #[test]
    fn default_transcoder_is_usable_through_the_trait_object() {
        let transcoder = default_transcoder::<u64>();
        let envelope = transcoder.encode(&7).expect("encode failed");
        assert_eq!(transcoder.decode(envelope).expect("decode failed"), 7);
    }
}
