//! AI gateway port
//!
//! Defines the uniform invoke contract every external AI backend is
//! wrapped behind. Adapters live in the infrastructure layer.

use async_trait::async_trait;
use helpdesk_domain::{InvocationError, ModelId, ModelOutput, ModelRequest};
use std::time::Duration;

/// Per-invocation options
///
/// When `cache_key` is present the adapter checks the response cache
/// before the network call and stores a successful result afterwards.
/// The timeout is a hard upper bound on the network call; a cache hit
/// costs no part of the budget.
#[derive(Debug, Clone)]
pub struct InvokeOptions {
    pub cache_key: Option<String>,
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

impl InvokeOptions {
    pub fn new(timeout: Duration) -> Self {
        Self {
            cache_key: None,
            cache_ttl: Duration::from_secs(3600),
            timeout,
        }
    }

    pub fn with_cache(mut self, key: impl Into<String>, ttl: Duration) -> Self {
        self.cache_key = Some(key.into());
        self.cache_ttl = ttl;
        self
    }
}

/// Gateway to the external AI backends
///
/// One call per invocation, fail-fast: no automatic retry (retries,
/// if desired, are the caller's responsibility via re-invocation).
/// Failures come back classified as [`InvocationError`], never as an
/// unclassified error.
#[async_trait]
pub trait AiGateway: Send + Sync {
    async fn invoke(
        &self,
        model: ModelId,
        request: ModelRequest,
        options: InvokeOptions,
    ) -> Result<ModelOutput, InvocationError>;
}
