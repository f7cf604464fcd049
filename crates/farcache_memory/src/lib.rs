// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(docsrs, feature(doc_cfg))]

//! In-memory remote store with the remote service's semantics.
//!
//! [`InMemoryStore`] implements
//! [`RemoteStore`](farcache_remote::RemoteStore) against process memory,
//! faithfully reproducing the remote cache service's contract — opaque
//! bytes, namespaced keys, and *literal* TTL handling where a zero
//! time-to-live expires the entry immediately. That fidelity makes the
//! adapter's TTL-defaulting correction observable in tests and lets local
//! development run without a live service.

mod builder;
mod store;

#[doc(inline)]
pub use builder::InMemoryStoreBuilder;
#[doc(inline)]
pub use store::InMemoryStore;
