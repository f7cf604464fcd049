// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(docsrs, feature(doc_cfg))]

//! A memcached-style cache client over byte-only remote cache services.
//!
//! This crate adapts application code written against a generic
//! memcached-style contract — get/set/delete, bulk reads, pluggable value
//! transcoding, TTLs — onto a remote key-value cache service that natively
//! speaks opaque bytes with literal TTL semantics. The adapter supplies:
//!
//! - an [`Envelope`] framing that carries serialization metadata through the
//!   byte-only store,
//! - a per-client registry that memoizes wire codecs per transcoder instance,
//! - chunked, concurrency-bounded bulk reads,
//! - translation of remote failures and deadline expiry into a typed
//!   [`Error`] taxonomy.
//!
//! # Examples
//!
//! ## Basic usage against the in-memory store
//!
//! ```
//! use farcache::{CacheClient, default_transcoder};
//! use std::time::Duration;
//! use tick::Clock;
//! # futures::executor::block_on(async {
//!
//! let client = CacheClient::builder(Clock::new_frozen())
//!     .memory()
//!     .cache_name("products")
//!     .build();
//!
//! let transcoder = default_transcoder::<String>();
//! client.set("sku-1", Duration::from_secs(60), &"widget".to_string(), &transcoder).await?;
//!
//! let value = client.get("sku-1", &transcoder).await?;
//! assert_eq!(value.as_deref(), Some("widget"));
//! # Ok::<(), farcache::Error>(())
//! # });
//! ```
//!
//! ## A custom remote store
//!
//! Implement [`RemoteStore`] for your service's client and hand it to the
//! builder via [`ClientBuilder::remote`]. The store sees only envelope-framed
//! bytes and literal TTLs; the adapter handles typing, TTL defaulting, and
//! error translation.

pub mod builder;
mod bulk;
pub mod client;
mod registry;
pub mod telemetry;
mod transcoder;

#[doc(inline)]
pub use builder::ClientBuilder;
#[doc(inline)]
pub use client::CacheClient;
#[cfg(feature = "memory")]
#[doc(inline)]
pub use farcache_memory::InMemoryStore;
#[doc(inline)]
pub use farcache_remote::{Envelope, Error, ErrorKind, RemoteStore, Result, StoreError};
#[doc(inline)]
pub use telemetry::Telemetry;
#[doc(inline)]
pub use transcoder::{FLAG_POSTCARD, FLAG_RAW, RawTranscoder, SerdeTranscoder, Transcoder, default_transcoder};
