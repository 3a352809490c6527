//! Application layer for the Mirai HelpDesk orchestrator
//!
//! This crate contains use cases and port definitions. It depends only
//! on the domain layer; adapters for the ports live in infrastructure
//! and presentation.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    ai_gateway::{AiGateway, InvokeOptions},
    cache::{NoCache, ResponseCache},
    observer::{NullObserver, RunObserver, emit},
};
pub use use_cases::collect::{InvokePolicy, cache_key, collect_model_responses};
pub use use_cases::fan_out::run_sub_agents;
pub use use_cases::run_query::{OrchestrationOutcome, RunQueryUseCase};
