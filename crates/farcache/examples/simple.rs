// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Simple Client Example
//!
//! Demonstrates basic adapter operations against the in-memory store:
//! set, get, bulk get, delete, shutdown.

use std::time::Duration;

use farcache::{CacheClient, default_transcoder};
use tick::Clock;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), farcache::Error> {
    let clock = Clock::new_tokio();

    // Build a client over the in-memory store with a 2-minute default TTL.
    let client = CacheClient::builder(clock)
        .memory()
        .cache_name("users")
        .default_ttl(Duration::from_secs(120))
        .build();

    let transcoder = default_transcoder::<String>();

    // Store a value; the zero TTL means "use the configured default".
    client.set("user:1", Duration::ZERO, &"Alice".to_string(), &transcoder).await?;

    // Retrieve it (returns Some("Alice")).
    let _value = client.get("user:1", &transcoder).await?;

    // Bulk reads omit missing keys (returns one entry).
    let _values = client.bulk_get(["user:1", "user:2"], &transcoder).await?;

    // Remove the entry.
    client.delete("user:1").await?;

    // Release the remote handle.
    client.shutdown().await;

    Ok(())
}
