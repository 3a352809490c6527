//! Infrastructure layer for the Mirai HelpDesk orchestrator
//!
//! Adapters behind the application ports: HTTP clients for the three
//! AI providers, in-memory and Redis response caches, and file plus
//! environment configuration loading.

pub mod cache;
pub mod clients;
pub mod config;

pub use cache::{MemoryResponseCache, RedisResponseCache};
pub use clients::HttpAiGateway;
pub use config::{ConfigLoader, FileConfig};
