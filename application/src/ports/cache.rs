//! Response cache port
//!
//! A key/value store with TTL shared by all AI client adapters. Keys
//! are namespaced per backend by the caller. Backend unavailability
//! degrades to always-miss; it is never surfaced to the end caller.

use async_trait::async_trait;
use std::time::Duration;

/// Key/value cache with per-entry TTL
///
/// A read after expiry is a miss, never stale data. Writes are atomic
/// per key; last-writer-wins is acceptable because every value is a
/// complete independent payload.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Fetch a value; `None` on miss, expiry, or backend failure
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a value; backend failures are logged and swallowed
    async fn set(&self, key: &str, value: &str, ttl: Duration);
}

/// Always-miss cache for tests and cache-disabled runs
pub struct NoCache;

#[async_trait]
impl ResponseCache for NoCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) {}
}
