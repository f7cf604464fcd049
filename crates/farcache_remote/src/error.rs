// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for adapter and remote store operations.

use std::fmt;

use recoverable::{Recovery, RecoveryInfo};

/// Classification of an adapter failure.
///
/// Callers distinguish "not found" from "failed to look up" by the result
/// type (`Ok(None)` vs `Err`); this enum further classifies the failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The remote call did not complete within its deadline.
    Timeout,
    /// A remote-side failure (network, transport, service error), wrapping
    /// the original cause.
    Remote,
    /// Stored bytes were too short to carry the flags header.
    MalformedEnvelope,
    /// The caller invoked an operation this adapter does not implement.
    Unsupported,
}

impl ErrorKind {
    /// Returns the stable name used in messages and telemetry attributes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Remote => "remote failure",
            Self::MalformedEnvelope => "malformed envelope",
            Self::Unsupported => "unsupported operation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error from a cache adapter operation.
///
/// Use [`Error::kind`] to classify the failure and
/// [`std::error::Error::source`] to reach the underlying cause.
///
/// # Example
///
/// ```
/// use farcache_remote::{Error, ErrorKind};
///
/// let error = Error::unsupported("flush_all");
/// assert_eq!(error.kind(), ErrorKind::Unsupported);
/// ```
#[ohno::error]
#[display("cache operation failed: {kind}")]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    /// Creates an error for a remote call that missed its deadline.
    #[must_use]
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Wraps a remote-side failure.
    pub fn remote(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(ErrorKind::Remote, cause)
    }

    /// Creates an error for stored bytes too short to carry the flags header.
    #[must_use]
    pub fn malformed_envelope(len: usize) -> Self {
        Self::caused_by(
            ErrorKind::MalformedEnvelope,
            format!("stored value is {len} bytes, shorter than the flags header"),
        )
    }

    /// Wraps a decode failure over stored bytes that carried a valid header
    /// but an unreadable payload.
    pub fn corrupt(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(ErrorKind::MalformedEnvelope, cause)
    }

    /// Creates an error for an operation this adapter does not implement.
    #[must_use]
    pub fn unsupported(operation: &'static str) -> Self {
        Self::caused_by(
            ErrorKind::Unsupported,
            format!("'{operation}' is not supported by this cache provider"),
        )
    }

    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl Recovery for Error {
    fn recovery(&self) -> RecoveryInfo {
        match self.kind {
            ErrorKind::Timeout => RecoveryInfo::retry(),
            ErrorKind::Remote => RecoveryInfo::unknown(),
            ErrorKind::MalformedEnvelope | ErrorKind::Unsupported => RecoveryInfo::never(),
        }
    }
}

/// A specialized [`Result`] type for cache adapter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error reported by a [`RemoteStore`](crate::RemoteStore) implementation.
///
/// Store implementations wrap their transport or service failures in this
/// type; the adapter translates it into [`Error`] with the
/// [`Remote`](ErrorKind::Remote) kind before surfacing it to callers.
#[ohno::error]
#[display("remote store failure")]
pub struct StoreError;

impl StoreError {
    /// Creates a store error from any type that can be converted to an error.
    ///
    /// This is the public API for creating store errors from implementation
    /// crates.
    pub fn from_message(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recoverable::RecoveryKind;

    #[test]
    fn kind_is_preserved() {
        assert_eq!(Error::timeout().kind(), ErrorKind::Timeout);
        assert_eq!(Error::remote("boom").kind(), ErrorKind::Remote);
        assert_eq!(Error::malformed_envelope(2).kind(), ErrorKind::MalformedEnvelope);
        assert_eq!(Error::unsupported("add").kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn display_contains_kind() {
        let error = Error::timeout();
        assert!(format!("{error}").contains("timeout"));
    }

    #[test]
    fn remote_error_display_contains_cause() {
        let error = Error::remote("connection reset");
        assert!(format!("{error}").contains("connection reset"));
    }

    #[test]
    fn unsupported_names_the_operation() {
        let error = Error::unsupported("incr");
        assert!(format!("{error}").contains("incr"));
    }

    #[test]
    fn recovery_classification() {
        assert_eq!(Error::timeout().recovery().kind(), RecoveryKind::Retry);
        assert_eq!(Error::remote("boom").recovery().kind(), RecoveryKind::Unknown);
        assert_eq!(Error::malformed_envelope(0).recovery().kind(), RecoveryKind::Never);
        assert_eq!(Error::unsupported("flush_all").recovery().kind(), RecoveryKind::Never);
    }

    #[test]
    fn store_error_wraps_cause() {
        let error = StoreError::caused_by("socket closed");
        assert!(format!("{error}").contains("socket closed"));
    }
}
