// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Byte framing that carries transcoder metadata through a byte-only store.
//!
//! The remote store understands nothing but opaque bytes, so every stored
//! value is prefixed with a 4-byte big-endian flags word. Transcoders use the
//! flags to mark the serialization format of the payload and to route the
//! decode path on the way back out.

use crate::Error;

/// Number of bytes occupied by the flags header.
pub const FLAGS_LEN: usize = 4;

/// A transcoded payload together with its transcoder flags.
///
/// Every byte sequence written by the adapter is at least [`FLAGS_LEN`] bytes
/// long, even when the flags word is zero.
///
/// # Examples
///
/// ```
/// use farcache_remote::Envelope;
///
/// let envelope = Envelope::new(7, b"payload".to_vec());
/// let bytes = envelope.to_bytes();
/// assert_eq!(bytes.len(), 7 + 4);
///
/// let decoded = Envelope::from_bytes(&bytes)?;
/// assert_eq!(decoded, envelope);
/// # Ok::<(), farcache_remote::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    flags: u32,
    payload: Vec<u8>,
}

impl Envelope {
    /// Creates an envelope from a flags word and an encoded payload.
    #[must_use]
    pub fn new(flags: u32, payload: Vec<u8>) -> Self {
        Self { flags, payload }
    }

    /// Returns the transcoder flags.
    #[must_use]
    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// Returns the encoded payload.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consumes the envelope and returns the encoded payload.
    #[must_use]
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Serializes the envelope for storage.
    ///
    /// Produces `payload.len() + 4` bytes: the flags in big-endian order
    /// followed by the payload unchanged. Never fails.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(FLAGS_LEN + self.payload.len());
        bytes.extend_from_slice(&self.flags.to_be_bytes());
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Parses stored bytes back into an envelope.
    ///
    /// The returned payload is copied out of `bytes` and is independently
    /// owned.
    ///
    /// # Errors
    ///
    /// Returns an error with the [`MalformedEnvelope`](crate::ErrorKind::MalformedEnvelope)
    /// kind when `bytes` is shorter than the flags header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let Some((flags, payload)) = bytes.split_first_chunk::<FLAGS_LEN>() else {
            return Err(Error::malformed_envelope(bytes.len()));
        };

        Ok(Self {
            flags: u32::from_be_bytes(*flags),
            payload: payload.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn round_trip() {
        let envelope = Envelope::new(0xDEAD_BEEF, vec![1, 2, 3]);
        let decoded = Envelope::from_bytes(&envelope.to_bytes()).expect("round trip failed");
        assert_eq!(decoded.flags(), 0xDEAD_BEEF);
        assert_eq!(decoded.payload(), &[1, 2, 3]);
    }

    #[test]
    fn zero_flags_still_carry_the_header() {
        let bytes = Envelope::new(0, Vec::new()).to_bytes();
        assert_eq!(bytes, vec![0, 0, 0, 0]);
    }

    #[test]
    fn flags_are_big_endian() {
        let bytes = Envelope::new(1, vec![0xFF]).to_bytes();
        assert_eq!(bytes, vec![0, 0, 0, 1, 0xFF]);
    }

    #[test]
    fn short_input_is_malformed() {
        for len in 0..FLAGS_LEN {
            let error = Envelope::from_bytes(&vec![0; len]).expect_err("short input accepted");
            assert_eq!(error.kind(), ErrorKind::MalformedEnvelope);
        }
    }
}
