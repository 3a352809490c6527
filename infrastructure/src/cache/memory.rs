//! In-process response cache
//!
//! TTL map used when no Redis URL is configured and as the fallback
//! when the Redis connection cannot be established. Expiry is passive:
//! expired entries are dropped on read.

use async_trait::async_trait;
use helpdesk_application::ResponseCache;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory key/value cache with per-entry TTL
#[derive(Default)]
pub struct MemoryResponseCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryResponseCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseCache for MemoryResponseCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let cache = MemoryResponseCache::new();
        cache.set("k", "v", Duration::from_secs(60)).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_after_ttl_is_a_miss() {
        let cache = MemoryResponseCache::new();
        cache.set("k", "v", Duration::from_secs(60)).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.get("k").await.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let cache = MemoryResponseCache::new();
        cache.set("k", "first", Duration::from_secs(60)).await;
        cache.set("k", "second", Duration::from_secs(60)).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_unknown_key_is_a_miss() {
        let cache = MemoryResponseCache::new();
        assert!(cache.get("nope").await.is_none());
    }
}
