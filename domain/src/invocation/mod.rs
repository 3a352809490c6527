//! Model invocation types - the uniform result shape every AI backend
//! is normalized into
//!
//! A [`ModelInvocation`] is one attempt to call one backend. It is
//! created when the collector dispatches and immutable once resolved:
//! either a normalized [`ModelOutput`] or a classified
//! [`InvocationError`], never an unclassified failure.

use crate::core::model::ModelId;
use crate::core::query::ConversationTurn;
use serde::{Deserialize, Serialize};

/// A source reference returned by a backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

impl SourceRef {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Request payload sent to a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Prior conversation turns, oldest first
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

impl ModelRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            history: Vec::new(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }
}

/// Normalized successful result from one backend call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelOutput {
    pub answer: String,
    /// Confidence in [0, 1] where the backend reports one; backends
    /// that don't report confidence leave this absent rather than
    /// fabricating a value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    /// Wall-clock latency of the call; zero on a cache hit
    pub latency_ms: u64,
    #[serde(default)]
    pub cache_hit: bool,
}

impl ModelOutput {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            confidence: None,
            sources: Vec::new(),
            latency_ms: 0,
            cache_hit: false,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    pub fn with_sources(mut self, sources: Vec<SourceRef>) -> Self {
        self.sources = sources;
        self
    }
}

/// Classified failure of one backend call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct InvocationError {
    pub kind: InvocationErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvocationErrorKind {
    /// Bad or missing provider credentials; an operator problem
    Auth,
    /// Provider backpressure; the caller may retry later with backoff
    RateLimited,
    /// The call exceeded its own budget; only this call failed
    Timeout,
    /// Any other provider-side failure
    Upstream,
}

impl std::fmt::Display for InvocationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InvocationErrorKind::Auth => "auth error",
            InvocationErrorKind::RateLimited => "rate limited",
            InvocationErrorKind::Timeout => "timeout",
            InvocationErrorKind::Upstream => "upstream error",
        };
        write!(f, "{s}")
    }
}

impl InvocationError {
    pub fn new(kind: InvocationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(InvocationErrorKind::Auth, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(InvocationErrorKind::RateLimited, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(InvocationErrorKind::Timeout, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(InvocationErrorKind::Upstream, message)
    }
}

/// One resolved attempt to call one backend (Value Object)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInvocation {
    pub model: ModelId,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<ModelOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<InvocationError>,
}

impl ModelInvocation {
    pub fn success(model: ModelId, output: ModelOutput) -> Self {
        Self {
            model,
            success: true,
            output: Some(output),
            error: None,
        }
    }

    pub fn failure(model: ModelId, error: InvocationError) -> Self {
        Self {
            model,
            success: false,
            output: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn output(&self) -> Option<&ModelOutput> {
        self.output.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_clamped() {
        let out = ModelOutput::new("a").with_confidence(1.4);
        assert_eq!(out.confidence, Some(1.0));
        let out = ModelOutput::new("a").with_confidence(-0.2);
        assert_eq!(out.confidence, Some(0.0));
    }

    #[test]
    fn test_confidence_absent_by_default() {
        let out = ModelOutput::new("a");
        assert!(out.confidence.is_none());
    }

    #[test]
    fn test_invocation_success_and_failure() {
        let ok = ModelInvocation::success(ModelId::Reasoner, ModelOutput::new("hi"));
        assert!(ok.is_success());
        assert!(ok.output().is_some());

        let err = ModelInvocation::failure(
            ModelId::EvidenceSearch,
            InvocationError::timeout("60s budget exceeded"),
        );
        assert!(!err.is_success());
        assert_eq!(
            err.error.as_ref().map(|e| e.kind),
            Some(InvocationErrorKind::Timeout)
        );
    }

    #[test]
    fn test_error_display() {
        let e = InvocationError::auth("key rejected");
        assert_eq!(e.to_string(), "auth error: key rejected");
    }
}
