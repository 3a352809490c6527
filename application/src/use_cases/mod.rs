//! Use cases - the orchestration pipeline stages

pub mod collect;
pub mod fan_out;
pub mod run_query;
