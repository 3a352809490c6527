//! Ports - interfaces the application layer consumes
//!
//! Adapters implementing these live in the infrastructure and
//! presentation layers.

pub mod ai_gateway;
pub mod cache;
pub mod observer;
