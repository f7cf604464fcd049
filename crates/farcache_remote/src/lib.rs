// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(docsrs, feature(doc_cfg))]

//! Remote store abstractions for the `farcache` cache adapter.
//!
//! This crate defines the [`RemoteStore`] trait that remote cache clients must
//! satisfy, along with the [`Envelope`] framing that carries transcoder
//! metadata through a byte-only store and the [`Error`] taxonomy surfaced to
//! adapter callers.
//!
//! # Overview
//!
//! The remote store abstraction separates transport concerns from the cache
//! contract. Implement [`RemoteStore`] for your remote service's client, then
//! use `farcache` to get the memcached-style API (typed values, TTL
//! defaulting, bulk reads) on top.
//!
//! # Implementing a Remote Store
//!
//! Implement all four methods of [`RemoteStore`]:
//!
//! ```
//! use farcache_remote::{RemoteStore, StoreError};
//! use std::collections::HashMap;
//! use std::sync::RwLock;
//! use std::time::Duration;
//!
//! struct SimpleStore(RwLock<HashMap<(String, String), Vec<u8>>>);
//!
//! impl RemoteStore for SimpleStore {
//!     async fn get(&self, cache: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
//!         Ok(self.0.read().unwrap().get(&(cache.to_owned(), key.to_owned())).cloned())
//!     }
//!
//!     async fn set(&self, cache: &str, key: &str, value: Vec<u8>, _ttl: Duration) -> Result<(), StoreError> {
//!         self.0.write().unwrap().insert((cache.to_owned(), key.to_owned()), value);
//!         Ok(())
//!     }
//!
//!     async fn delete(&self, cache: &str, key: &str) -> Result<(), StoreError> {
//!         self.0.write().unwrap().remove(&(cache.to_owned(), key.to_owned()));
//!         Ok(())
//!     }
//!
//!     async fn close(&self) {}
//! }
//! ```

mod envelope;
pub mod error;
mod store;

#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[doc(inline)]
pub use envelope::{Envelope, FLAGS_LEN};
#[doc(inline)]
pub use error::{Error, ErrorKind, Result, StoreError};
#[doc(inline)]
pub use store::RemoteStore;
