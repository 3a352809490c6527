//! Redis-backed response cache
//!
//! Shared across AI clients and across concurrent runs. Any Redis
//! failure degrades to always-miss behavior: logged at warning level,
//! never surfaced to the caller.

use async_trait::async_trait;
use helpdesk_application::ResponseCache;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tracing::warn;

/// Response cache over a remote Redis instance
pub struct RedisResponseCache {
    connection: ConnectionManager,
}

impl RedisResponseCache {
    /// Connect to Redis; the connection manager reconnects on its own
    /// after transient drops
    pub async fn connect(url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl ResponseCache for RedisResponseCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut connection = self.connection.clone();
        match connection.get::<_, Option<String>>(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("cache read failed, treating as miss: {e}");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        let mut connection = self.connection.clone();
        if let Err(e) = connection
            .set_ex::<_, _, ()>(key, value, ttl.as_secs())
            .await
        {
            warn!("cache write failed: {e}");
        }
    }
}
