//! Run query use case - the top-level orchestrator
//!
//! Sequences classification, the concurrent sub-agent and
//! multi-model stages, and integration for one query. A run always
//! terminates in `Done` with a structured outcome; total backend
//! failure degrades the answer, it never produces a blanket failure.

use crate::ports::ai_gateway::AiGateway;
use crate::ports::observer::{NullObserver, RunObserver, emit};
use crate::use_cases::collect::{InvokePolicy, collect_model_responses};
use crate::use_cases::fan_out::run_sub_agents;
use helpdesk_domain::{
    DomainCategory, IntegratedAnswer, ModelId, ModelInvocation, OrchestratorEvent, QualityScore,
    Query, QueryType, RunPhase, SubAgentTask, classify, integrate,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// The structured result handed back to the inbound caller
///
/// Serializes to the wire contract consumed by the HTTP layer:
/// `answer`, `queryType`, `domainType`, `modelResponses`,
/// `subAgentResults`, `processingTimeMs`, `qualityScore`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationOutcome {
    pub answer: IntegratedAnswer,
    pub query_type: QueryType,
    pub domain_type: DomainCategory,
    pub model_responses: Vec<ModelInvocation>,
    pub sub_agent_results: Vec<SubAgentTask>,
    pub processing_time_ms: u64,
    pub quality_score: QualityScore,
}

/// Orchestrator for one query at a time
///
/// Owns the active backend selection. The selection is mutable between
/// runs via [`toggle_model`](Self::toggle_model); each run snapshots
/// it on entry and is unaffected by later changes.
pub struct RunQueryUseCase<G: AiGateway + 'static> {
    gateway: Arc<G>,
    selection: Vec<ModelId>,
    policy: InvokePolicy,
}

impl<G: AiGateway + 'static> RunQueryUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            selection: ModelId::default_selection(),
            policy: InvokePolicy::default(),
        }
    }

    pub fn with_selection(mut self, selection: Vec<ModelId>) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_policy(mut self, policy: InvokePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The backends currently selected for the next run
    pub fn selection(&self) -> &[ModelId] {
        &self.selection
    }

    /// Toggle one backend in the default selection (between runs)
    pub fn toggle_model(&mut self, model: ModelId, observer: &dyn RunObserver) {
        if let Some(pos) = self.selection.iter().position(|&m| m == model) {
            self.selection.remove(pos);
        } else {
            self.selection.push(model);
        }
        emit(
            observer,
            OrchestratorEvent::SelectionChanged {
                selected: self.selection.clone(),
            },
        );
    }

    /// Execute one run without progress reporting
    pub async fn execute(&self, query: Query) -> OrchestrationOutcome {
        self.execute_with_observer(query, &NullObserver).await
    }

    /// Execute one run, delivering lifecycle events to the observer
    pub async fn execute_with_observer(
        &self,
        query: Query,
        observer: &dyn RunObserver,
    ) -> OrchestrationOutcome {
        let started = Instant::now();

        // Snapshot: selection changes after this point affect the next
        // run, not this one.
        let selection = self.selection.clone();

        info!(
            query = query.text(),
            models = selection.len(),
            "starting orchestration run"
        );

        emit(
            observer,
            OrchestratorEvent::PhaseChanged {
                phase: RunPhase::Classifying,
            },
        );
        let classification = classify(&query);
        emit(
            observer,
            OrchestratorEvent::QueryClassified { classification },
        );

        emit(
            observer,
            OrchestratorEvent::PhaseChanged {
                phase: RunPhase::AnalyzingAndCollecting,
            },
        );
        let (tasks, invocations) = tokio::join!(
            run_sub_agents(&query, &classification, observer),
            collect_model_responses(
                Arc::clone(&self.gateway),
                &query,
                &classification,
                &selection,
                &self.policy,
                observer,
            ),
        );

        emit(
            observer,
            OrchestratorEvent::PhaseChanged {
                phase: RunPhase::Integrating,
            },
        );
        let answer = integrate(&query, &classification, &tasks, &invocations);
        let quality_score = answer.quality;

        emit(
            observer,
            OrchestratorEvent::PhaseChanged {
                phase: RunPhase::Done,
            },
        );

        let processing_time_ms = started.elapsed().as_millis() as u64;
        info!(
            processing_time_ms,
            quality = quality_score.overall,
            "orchestration run complete"
        );

        OrchestrationOutcome {
            answer,
            query_type: classification.query_type,
            domain_type: classification.domain_category,
            model_responses: invocations,
            sub_agent_results: tasks,
            processing_time_ms,
            quality_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ai_gateway::InvokeOptions;
    use async_trait::async_trait;
    use helpdesk_domain::{
        InvocationError, ModelOutput, ModelRequest, SourceRef, SubAgentStatus,
    };
    use std::sync::Mutex;

    struct StubGateway {
        fail: Vec<ModelId>,
    }

    #[async_trait]
    impl AiGateway for StubGateway {
        async fn invoke(
            &self,
            model: ModelId,
            _request: ModelRequest,
            _options: InvokeOptions,
        ) -> Result<ModelOutput, InvocationError> {
            if self.fail.contains(&model) {
                Err(InvocationError::upstream("stubbed failure"))
            } else {
                Ok(ModelOutput::new(format!("{model} answer"))
                    .with_sources(vec![SourceRef::new("doc", format!("https://{model}"))]))
            }
        }
    }

    struct Recording(Mutex<Vec<String>>);

    impl RunObserver for Recording {
        fn on_event(&self, event: &OrchestratorEvent) {
            self.0.lock().unwrap().push(event.name().to_string());
        }
    }

    fn use_case(fail: Vec<ModelId>) -> RunQueryUseCase<StubGateway> {
        RunQueryUseCase::new(Arc::new(StubGateway { fail }))
            .with_selection(ModelId::ALL.to_vec())
    }

    #[tokio::test]
    async fn test_full_run_produces_outcome() {
        let outcome = use_case(Vec::new())
            .execute(Query::new("なぜ障害が頻発するのか調査してほしい"))
            .await;

        assert_eq!(outcome.query_type, QueryType::Investigation);
        assert_eq!(outcome.domain_type, DomainCategory::Problem);
        assert_eq!(outcome.model_responses.len(), 3);
        assert_eq!(outcome.sub_agent_results.len(), 7);
        assert_eq!(outcome.quality_score, outcome.answer.quality);
    }

    #[tokio::test]
    async fn test_total_backend_failure_still_reaches_done() {
        let outcome = use_case(ModelId::ALL.to_vec())
            .execute(Query::new("Outlookで添付ファイルが送信できない"))
            .await;

        assert!(outcome.model_responses.iter().all(|r| !r.is_success()));
        assert!(!outcome.answer.summary.is_empty());
        assert!(
            outcome
                .sub_agent_results
                .iter()
                .all(|t| t.status == SubAgentStatus::Completed)
        );
    }

    #[tokio::test]
    async fn test_phase_sequence_and_event_stream() {
        let observer = Recording(Mutex::new(Vec::new()));
        use_case(Vec::new())
            .execute_with_observer(Query::new("printer offline"), &observer)
            .await;

        let events = observer.0.lock().unwrap();
        let phases: Vec<&String> = events.iter().filter(|e| *e == "phase-changed").collect();
        assert_eq!(phases.len(), 4, "Classifying, Analyzing, Integrating, Done");
        assert_eq!(events.first().map(String::as_str), Some("phase-changed"));
        assert!(events.contains(&"query-classified".to_string()));
        assert_eq!(
            events.iter().filter(|e| *e == "ai-completed").count(),
            3
        );
    }

    #[tokio::test]
    async fn test_empty_selection_still_completes() {
        let outcome = RunQueryUseCase::new(Arc::new(StubGateway { fail: Vec::new() }))
            .with_selection(Vec::new())
            .execute(Query::new("anything at all"))
            .await;

        assert!(outcome.model_responses.is_empty());
        assert_eq!(outcome.sub_agent_results.len(), 7);
        assert!(!outcome.answer.summary.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_model_emits_selection_changed() {
        let observer = Recording(Mutex::new(Vec::new()));
        let mut use_case = RunQueryUseCase::new(Arc::new(StubGateway { fail: Vec::new() }));

        assert_eq!(use_case.selection(), &[ModelId::Reasoner]);

        use_case.toggle_model(ModelId::EvidenceSearch, &observer);
        assert_eq!(
            use_case.selection(),
            &[ModelId::Reasoner, ModelId::EvidenceSearch]
        );

        use_case.toggle_model(ModelId::EvidenceSearch, &observer);
        assert_eq!(use_case.selection(), &[ModelId::Reasoner]);

        let events = observer.0.lock().unwrap();
        assert_eq!(
            events.iter().filter(|e| *e == "selection-changed").count(),
            2
        );
    }

    #[tokio::test]
    async fn test_outcome_wire_shape() {
        let outcome = use_case(Vec::new())
            .execute(Query::new("How do I reset my password?"))
            .await;

        let json = serde_json::to_value(&outcome).unwrap();
        for field in [
            "answer",
            "queryType",
            "domainType",
            "modelResponses",
            "subAgentResults",
            "processingTimeMs",
            "qualityScore",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json["queryType"], "faq");
    }
}
