//! Configuration schema and loading

pub mod file_config;
pub mod loader;

pub use file_config::{CacheConfig, FileConfig, ProviderConfig, ProvidersConfig, SelectionConfig};
pub use loader::ConfigLoader;
