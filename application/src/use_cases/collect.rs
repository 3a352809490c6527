//! Multi-model collector
//!
//! Dispatches one invocation per selected backend concurrently and
//! collects every outcome as data. A failing backend populates its own
//! entry; it neither aborts its siblings nor raises out of the
//! collector.

use crate::ports::ai_gateway::{AiGateway, InvokeOptions};
use crate::ports::observer::{RunObserver, emit};
use helpdesk_domain::{
    InvocationError, ModelId, ModelInvocation, ModelRequest, OrchestratorEvent, Query,
    QueryClassification,
};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Per-backend invocation budgets and cache policy
///
/// Defaults mirror the provider clients: 60 s budgets for the chat
/// backends, 30 s for info-gather; 1 h cache TTL for answers, 24 h for
/// gathered information.
#[derive(Debug, Clone)]
pub struct InvokePolicy {
    pub cache_enabled: bool,
    pub reasoner_timeout: Duration,
    pub evidence_timeout: Duration,
    pub info_gather_timeout: Duration,
    pub reasoner_ttl: Duration,
    pub evidence_ttl: Duration,
    pub info_gather_ttl: Duration,
}

impl Default for InvokePolicy {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            reasoner_timeout: Duration::from_secs(60),
            evidence_timeout: Duration::from_secs(60),
            info_gather_timeout: Duration::from_secs(30),
            reasoner_ttl: Duration::from_secs(3600),
            evidence_ttl: Duration::from_secs(3600),
            info_gather_ttl: Duration::from_secs(86400),
        }
    }
}

impl InvokePolicy {
    pub fn timeout_for(&self, model: ModelId) -> Duration {
        match model {
            ModelId::Reasoner => self.reasoner_timeout,
            ModelId::EvidenceSearch => self.evidence_timeout,
            ModelId::InfoGather => self.info_gather_timeout,
        }
    }

    pub fn ttl_for(&self, model: ModelId) -> Duration {
        match model {
            ModelId::Reasoner => self.reasoner_ttl,
            ModelId::EvidenceSearch => self.evidence_ttl,
            ModelId::InfoGather => self.info_gather_ttl,
        }
    }

    /// Build the invoke options for one dispatch
    pub fn options_for(&self, model: ModelId, query: &Query) -> InvokeOptions {
        let mut options = InvokeOptions::new(self.timeout_for(model));
        if self.cache_enabled {
            options = options.with_cache(cache_key(model, query), self.ttl_for(model));
        }
        options
    }
}

/// Derive the cache key for one backend and query
///
/// Keys are namespaced by backend identifier so clients never collide
/// on the shared store.
pub fn cache_key(model: ModelId, query: &Query) -> String {
    let digest = Sha256::digest(query.text().as_bytes());
    format!("ai:{}:{}", model.as_str(), &hex::encode(digest)[..16])
}

/// Dispatch the classified query to every selected backend concurrently
///
/// Returns one entry per selected backend in dispatch order, success
/// or failure alike. An empty selection returns an empty vec
/// immediately; whether that is acceptable is the orchestrator's
/// decision, not the collector's.
pub async fn collect_model_responses<G: AiGateway + 'static>(
    gateway: Arc<G>,
    query: &Query,
    classification: &QueryClassification,
    selection: &[ModelId],
    policy: &InvokePolicy,
    observer: &dyn RunObserver,
) -> Vec<ModelInvocation> {
    if selection.is_empty() {
        return Vec::new();
    }

    let mut join_set = JoinSet::new();

    for &model in selection {
        emit(observer, OrchestratorEvent::AiProcessing { model });

        let gateway = Arc::clone(&gateway);
        let request = build_request(model, query, classification);
        let options = policy.options_for(model, query);

        join_set.spawn(async move {
            let outcome = gateway.invoke(model, request, options).await;
            (model, outcome)
        });
    }

    let mut resolved: HashMap<ModelId, ModelInvocation> = HashMap::new();

    while let Some(result) = join_set.join_next().await {
        match result {
            Ok((model, Ok(output))) => {
                debug!(model = %model, latency_ms = output.latency_ms, "backend responded");
                emit(
                    observer,
                    OrchestratorEvent::AiCompleted {
                        model,
                        success: true,
                    },
                );
                resolved.insert(model, ModelInvocation::success(model, output));
            }
            Ok((model, Err(error))) => {
                warn!(model = %model, "backend failed: {error}");
                emit(
                    observer,
                    OrchestratorEvent::AiCompleted {
                        model,
                        success: false,
                    },
                );
                resolved.insert(model, ModelInvocation::failure(model, error));
            }
            Err(e) => {
                warn!("collector task join error: {e}");
            }
        }
    }

    // Re-order completion results to dispatch order so downstream
    // source merging is reproducible run to run.
    selection
        .iter()
        .map(|&model| {
            resolved.remove(&model).unwrap_or_else(|| {
                ModelInvocation::failure(
                    model,
                    InvocationError::upstream("invocation task aborted"),
                )
            })
        })
        .collect()
}

/// Build the provider-facing request for one backend
fn build_request(model: ModelId, query: &Query, classification: &QueryClassification) -> ModelRequest {
    match model {
        ModelId::Reasoner => ModelRequest::new(query.text())
            .with_system_prompt(format!(
                "You are the reasoning engine of an IT service desk. \
                 The query was classified as {} / {}. \
                 Answer precisely and structure the response for a technician.",
                classification.query_type, classification.domain_category
            ))
            .with_history(query.history().to_vec()),
        ModelId::EvidenceSearch => ModelRequest::new(query.text()).with_system_prompt(
            "Search for current, citable evidence relevant to this IT support query. \
             Prefer vendor documentation and cite every source.",
        ),
        ModelId::InfoGather => ModelRequest::new(format!(
            "Collect and organize technical background information for this \
             IT support query: {}",
            query.text()
        )),
    }
}
