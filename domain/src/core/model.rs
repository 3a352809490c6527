//! ModelId value object - the fixed set of external AI backends

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The external AI backends the orchestrator can dispatch to (Value Object)
///
/// Each backend plays a fixed role in the pipeline: the reasoner makes
/// the primary judgement and final integration input, the evidence
/// backend performs web search with citations, and the info-gather
/// backend collects and organizes supporting technical information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelId {
    /// Primary reasoning backend (query judgement, answer generation)
    Reasoner,
    /// Web-search backend with citation support (evidence generation)
    EvidenceSearch,
    /// Information-gathering / embedding backend
    InfoGather,
}

impl ModelId {
    /// All backends, in canonical dispatch order
    pub const ALL: [ModelId; 3] = [
        ModelId::Reasoner,
        ModelId::EvidenceSearch,
        ModelId::InfoGather,
    ];

    /// Get the string identifier for this backend
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Reasoner => "reasoner",
            ModelId::EvidenceSearch => "evidence-search",
            ModelId::InfoGather => "info-gather",
        }
    }

    /// Human-readable role description
    pub fn role(&self) -> &'static str {
        match self {
            ModelId::Reasoner => "Primary judgement and final integration",
            ModelId::EvidenceSearch => "Web search and evidence with citations",
            ModelId::InfoGather => "Technical information gathering",
        }
    }

    /// The default backend selection for a fresh orchestrator
    ///
    /// Only the reasoner is active until the operator opts into the
    /// other backends.
    pub fn default_selection() -> Vec<ModelId> {
        vec![ModelId::Reasoner]
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelId {
    type Err = super::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reasoner" => Ok(ModelId::Reasoner),
            "evidence-search" | "evidence" => Ok(ModelId::EvidenceSearch),
            "info-gather" | "info" => Ok(ModelId::InfoGather),
            other => Err(super::error::DomainError::InvalidModel(other.to_string())),
        }
    }
}

impl Serialize for ModelId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
