//! Run lifecycle phases and observer events

use crate::classify::QueryClassification;
use crate::core::model::ModelId;
use crate::subagent::SubAgentKind;
use serde::{Deserialize, Serialize};

/// Phase of an orchestration run
///
/// A run walks every phase in order; there is no failure terminal
/// state, total backend failure still reaches `Done` with a degraded
/// answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunPhase {
    Idle,
    Classifying,
    /// Sub-agent fan-out and multi-model collection run concurrently
    /// inside this single logical phase
    AnalyzingAndCollecting,
    Integrating,
    Done,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::Classifying => "classifying",
            RunPhase::AnalyzingAndCollecting => "analyzing-and-collecting",
            RunPhase::Integrating => "integrating",
            RunPhase::Done => "done",
        }
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events emitted during a run for progress observers
///
/// Delivery is synchronous, in-process, and best-effort; a misbehaving
/// listener is isolated and cannot abort the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum OrchestratorEvent {
    SelectionChanged { selected: Vec<ModelId> },
    PhaseChanged { phase: RunPhase },
    QueryClassified { classification: QueryClassification },
    SubAgentProcessing { agent: SubAgentKind },
    SubAgentCompleted { agent: SubAgentKind, success: bool },
    AiProcessing { model: ModelId },
    AiCompleted { model: ModelId, success: bool },
}

impl OrchestratorEvent {
    /// The wire name of this event
    pub fn name(&self) -> &'static str {
        match self {
            OrchestratorEvent::SelectionChanged { .. } => "selection-changed",
            OrchestratorEvent::PhaseChanged { .. } => "phase-changed",
            OrchestratorEvent::QueryClassified { .. } => "query-classified",
            OrchestratorEvent::SubAgentProcessing { .. } => "subagent-processing",
            OrchestratorEvent::SubAgentCompleted { .. } => "subagent-completed",
            OrchestratorEvent::AiProcessing { .. } => "ai-processing",
            OrchestratorEvent::AiCompleted { .. } => "ai-completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_match_wire_contract() {
        let event = OrchestratorEvent::SubAgentCompleted {
            agent: SubAgentKind::Qa,
            success: true,
        };
        assert_eq!(event.name(), "subagent-completed");

        let event = OrchestratorEvent::AiProcessing {
            model: ModelId::Reasoner,
        };
        assert_eq!(event.name(), "ai-processing");
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(
            RunPhase::AnalyzingAndCollecting.to_string(),
            "analyzing-and-collecting"
        );
    }
}
