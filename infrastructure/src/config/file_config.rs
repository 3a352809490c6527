//! Configuration file schema

use helpdesk_application::InvokePolicy;
use helpdesk_domain::{DomainError, ModelId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub providers: ProvidersConfig,
    pub cache: CacheConfig,
    pub selection: SelectionConfig,
}

/// One section per AI backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub reasoner: ProviderConfig,
    pub evidence: ProviderConfig,
    pub info_gather: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            reasoner: ProviderConfig::new("claude-sonnet-4-5", 60, 3600, 4096),
            evidence: ProviderConfig::new("sonar-pro", 60, 3600, 2048),
            info_gather: ProviderConfig::new("gemini-2.0-flash", 30, 86400, 2048),
        }
    }
}

/// Settings for one AI backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API key; falls back to the provider's environment variable
    pub api_key: Option<String>,
    /// Provider-side model name
    pub model: String,
    /// Hard upper bound on one network call
    pub timeout_secs: u64,
    /// TTL for cached responses
    pub cache_ttl_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ProviderConfig {
    fn new(model: &str, timeout_secs: u64, cache_ttl_secs: u64, max_tokens: u32) -> Self {
        Self {
            api_key: None,
            model: model.to_string(),
            timeout_secs,
            cache_ttl_secs,
            max_tokens,
            temperature: 0.3,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new("claude-sonnet-4-5", 60, 3600, 2048)
    }
}

/// Response cache backing store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis connection URL; unset means in-process cache only
    pub redis_url: Option<String>,
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            enabled: true,
        }
    }
}

/// Default backend selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Backend identifiers; empty means reasoner only
    pub models: Vec<String>,
}

impl FileConfig {
    /// Resolve the configured default selection
    pub fn selection_models(&self) -> Result<Vec<ModelId>, DomainError> {
        if self.selection.models.is_empty() {
            return Ok(ModelId::default_selection());
        }
        self.selection.models.iter().map(|s| s.parse()).collect()
    }

    /// Derive the per-backend invocation policy
    pub fn invoke_policy(&self) -> InvokePolicy {
        InvokePolicy {
            cache_enabled: self.cache.enabled,
            reasoner_timeout: self.providers.reasoner.timeout(),
            evidence_timeout: self.providers.evidence.timeout(),
            info_gather_timeout: self.providers.info_gather.timeout(),
            reasoner_ttl: self.providers.reasoner.cache_ttl(),
            evidence_ttl: self.providers.evidence.cache_ttl(),
            info_gather_ttl: self.providers.info_gather.cache_ttl(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mirror_provider_clients() {
        let config = FileConfig::default();
        assert_eq!(config.providers.reasoner.timeout_secs, 60);
        assert_eq!(config.providers.info_gather.timeout_secs, 30);
        assert_eq!(config.providers.info_gather.cache_ttl_secs, 86400);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_empty_selection_falls_back_to_reasoner() {
        let config = FileConfig::default();
        assert_eq!(
            config.selection_models().unwrap(),
            vec![ModelId::Reasoner]
        );
    }

    #[test]
    fn test_unknown_selection_model_rejected() {
        let config = FileConfig {
            selection: SelectionConfig {
                models: vec!["oracle".to_string()],
            },
            ..Default::default()
        };
        assert!(config.selection_models().is_err());
    }

    #[test]
    fn test_invoke_policy_from_config() {
        let config = FileConfig::default();
        let policy = config.invoke_policy();
        assert_eq!(policy.info_gather_timeout, Duration::from_secs(30));
        assert_eq!(policy.info_gather_ttl, Duration::from_secs(86400));
    }
}
