//! Domain layer for the Mirai HelpDesk orchestrator
//!
//! This crate contains the core business logic, entities, and value
//! objects. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Orchestration run
//!
//! One end-to-end execution from a single input [`Query`] to one
//! [`IntegratedAnswer`]: classify, fan out to seven sub-agent analyses
//! and the selected AI backends, then deterministically merge.
//!
//! ## Fan-out / fan-in
//!
//! Sub-agents and backends run concurrently and fail independently;
//! the integrator is the single deterministic merge step and never
//! fails the run.

pub mod answer;
pub mod classify;
pub mod core;
pub mod event;
pub mod invocation;
pub mod subagent;

// Re-export commonly used types
pub use answer::{IntegratedAnswer, QualityScore, dedupe_sources, integrate};
pub use classify::{DomainCategory, QueryClassification, QueryType, classify};
pub use core::{
    error::DomainError,
    model::ModelId,
    query::{ConversationTurn, Query, TurnRole},
};
pub use event::{OrchestratorEvent, RunPhase};
pub use invocation::{
    InvocationError, InvocationErrorKind, ModelInvocation, ModelOutput, ModelRequest, SourceRef,
};
pub use subagent::{SubAgentKind, SubAgentStatus, SubAgentTask, run_analysis};
