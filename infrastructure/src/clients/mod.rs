//! AI provider clients and the gateway adapter
//!
//! One client per external backend, each normalizing its provider's
//! response shape into the uniform [`ModelOutput`] contract.
//! [`HttpAiGateway`] routes invocations to the right client and owns
//! the cache-around-call behavior.

pub mod evidence;
pub mod info_gather;
pub mod reasoner;

pub use evidence::EvidenceClient;
pub use info_gather::InfoGatherClient;
pub use reasoner::ReasonerClient;

use crate::config::FileConfig;
use async_trait::async_trait;
use helpdesk_application::{AiGateway, InvokeOptions, ResponseCache};
use helpdesk_domain::{InvocationError, ModelId, ModelOutput, ModelRequest};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Classify an HTTP error status into the invocation error taxonomy
pub(crate) fn classify_status(status: reqwest::StatusCode, detail: &str) -> InvocationError {
    match status.as_u16() {
        401 | 403 => InvocationError::auth(format!(
            "provider rejected credentials ({status}): {detail}"
        )),
        429 => InvocationError::rate_limited(format!(
            "provider backpressure ({status}): {detail}"
        )),
        _ => InvocationError::upstream(format!("provider error ({status}): {detail}")),
    }
}

/// Classify a transport-level failure
pub(crate) fn classify_transport(error: &reqwest::Error) -> InvocationError {
    if error.is_timeout() {
        InvocationError::timeout("call exceeded its budget")
    } else {
        InvocationError::upstream(format!("transport failure: {error}"))
    }
}

/// Gateway routing invocations to the provider clients
///
/// Cache behavior per invocation: a hit returns immediately with zero
/// recorded latency and no network call; a successful network response
/// is written back under the caller's key. Failed or cancelled calls
/// never write to the cache.
pub struct HttpAiGateway {
    reasoner: ReasonerClient,
    evidence: EvidenceClient,
    info_gather: InfoGatherClient,
    cache: Arc<dyn ResponseCache>,
}

impl HttpAiGateway {
    pub fn new(config: &FileConfig, cache: Arc<dyn ResponseCache>) -> Self {
        Self {
            reasoner: ReasonerClient::new(&config.providers.reasoner),
            evidence: EvidenceClient::new(&config.providers.evidence),
            info_gather: InfoGatherClient::new(&config.providers.info_gather),
            cache,
        }
    }
}

#[async_trait]
impl AiGateway for HttpAiGateway {
    async fn invoke(
        &self,
        model: ModelId,
        request: ModelRequest,
        options: InvokeOptions,
    ) -> Result<ModelOutput, InvocationError> {
        let started = Instant::now();

        if let Some(key) = &options.cache_key
            && let Some(cached) = self.cache.get(key).await
        {
            match serde_json::from_str::<ModelOutput>(&cached) {
                Ok(mut output) => {
                    debug!(model = %model, key, "cache hit");
                    output.latency_ms = 0;
                    output.cache_hit = true;
                    return Ok(output);
                }
                Err(e) => {
                    warn!(model = %model, key, "unreadable cache entry, treating as miss: {e}");
                }
            }
        }

        let result = match model {
            ModelId::Reasoner => self.reasoner.send(&request, options.timeout).await,
            ModelId::EvidenceSearch => self.evidence.send(&request, options.timeout).await,
            ModelId::InfoGather => self.info_gather.send(&request, options.timeout).await,
        };

        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(mut output) => {
                output.latency_ms = duration_ms;
                output.cache_hit = false;
                info!(model = %model, duration_ms, cache = "miss", "AI call completed");

                if let Some(key) = &options.cache_key {
                    match serde_json::to_string(&output) {
                        Ok(payload) => {
                            self.cache.set(key, &payload, options.cache_ttl).await;
                        }
                        Err(e) => warn!(model = %model, "failed to serialize for cache: {e}"),
                    }
                }

                Ok(output)
            }
            Err(error) => {
                warn!(model = %model, duration_ms, "AI call failed: {error}");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryResponseCache;
    use helpdesk_domain::InvocationErrorKind;
    use reqwest::StatusCode;
    use std::time::Duration;

    fn keyless_gateway(cache: Arc<MemoryResponseCache>) -> HttpAiGateway {
        // Default config carries no API keys, so any network path
        // fails with an auth error before any I/O happens.
        HttpAiGateway::new(&FileConfig::default(), cache)
    }

    #[tokio::test]
    async fn test_cache_hit_short_circuits_the_network_call() {
        let cache = Arc::new(MemoryResponseCache::new());
        let gateway = keyless_gateway(Arc::clone(&cache));

        let mut seeded = ModelOutput::new("cached answer");
        seeded.latency_ms = 480;
        cache
            .set(
                "ai:reasoner:cafebabe",
                &serde_json::to_string(&seeded).unwrap(),
                Duration::from_secs(3600),
            )
            .await;

        let options = InvokeOptions::new(Duration::from_secs(60))
            .with_cache("ai:reasoner:cafebabe", Duration::from_secs(3600));
        let output = gateway
            .invoke(ModelId::Reasoner, ModelRequest::new("VPN down"), options)
            .await
            .unwrap();

        assert_eq!(output.answer, "cached answer");
        assert!(output.cache_hit);
        assert_eq!(output.latency_ms, 0);
    }

    #[tokio::test]
    async fn test_failed_call_never_writes_to_the_cache() {
        let cache = Arc::new(MemoryResponseCache::new());
        let gateway = keyless_gateway(Arc::clone(&cache));

        let options = InvokeOptions::new(Duration::from_secs(60))
            .with_cache("ai:reasoner:deadbeef", Duration::from_secs(3600));
        let error = gateway
            .invoke(ModelId::Reasoner, ModelRequest::new("VPN down"), options)
            .await
            .unwrap_err();

        assert_eq!(error.kind, InvocationErrorKind::Auth);
        assert!(cache.get("ai:reasoner:deadbeef").await.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_cache_entry_degrades_to_miss() {
        let cache = Arc::new(MemoryResponseCache::new());
        let gateway = keyless_gateway(Arc::clone(&cache));

        cache
            .set("ai:reasoner:0000", "not json", Duration::from_secs(3600))
            .await;

        let options = InvokeOptions::new(Duration::from_secs(60))
            .with_cache("ai:reasoner:0000", Duration::from_secs(3600));
        let error = gateway
            .invoke(ModelId::Reasoner, ModelRequest::new("VPN down"), options)
            .await
            .unwrap_err();

        // Falls through to the (keyless) network path
        assert_eq!(error.kind, InvocationErrorKind::Auth);
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED, "").kind,
            InvocationErrorKind::Auth
        );
        assert_eq!(
            classify_status(StatusCode::FORBIDDEN, "").kind,
            InvocationErrorKind::Auth
        );
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "").kind,
            InvocationErrorKind::RateLimited
        );
        assert_eq!(
            classify_status(StatusCode::SERVICE_UNAVAILABLE, "").kind,
            InvocationErrorKind::Upstream
        );
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST, "").kind,
            InvocationErrorKind::Upstream
        );
    }
}
