//! Query classification - keyword rules over the raw query text
//!
//! Classification is pure and synchronous: no I/O, first matching rule
//! wins, and each axis falls through to an explicit named default.
//! The helpdesk serves a Japanese-first user base, so the marker sets
//! carry both Japanese and English terms.
//!
//! This stage is designed to be swapped for a reasoner-backed
//! classifier later; the contract (pure, always terminates, exactly
//! one label per axis) must survive that swap.

use crate::core::query::Query;
use serde::{Deserialize, Serialize};

/// How the user's query should be answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// Known-procedure question ("how do I ...?")
    Faq,
    /// Something needs to be looked into before an answer exists
    Investigation,
    /// Default: the answer needs supporting evidence
    Evidence,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Faq => "faq",
            QueryType::Investigation => "investigation",
            QueryType::Evidence => "evidence",
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ITSM process the query belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainCategory {
    /// Default: service disruption to restore
    Incident,
    /// Root-cause analysis
    Problem,
    /// Change management
    Change,
    /// Release / deployment management
    Release,
    /// Service request
    Request,
}

impl DomainCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainCategory::Incident => "incident",
            DomainCategory::Problem => "problem",
            DomainCategory::Change => "change",
            DomainCategory::Release => "release",
            DomainCategory::Request => "request",
        }
    }
}

impl std::fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The labels attached to a query, one per axis (Value Object)
///
/// Computed once per run and frozen; downstream failures never revise
/// a classification after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryClassification {
    pub query_type: QueryType,
    pub domain_category: DomainCategory,
}

const FAQ_MARKERS: &[&str] = &["?", "？", "方法", "どうやって", "how to", "how do"];
const INVESTIGATION_MARKERS: &[&str] = &["調査", "確認", "検証", "investigate", "verify"];

const PROBLEM_MARKERS: &[&str] = &["原因", "なぜ", "頻発", "root cause", "why"];
const CHANGE_MARKERS: &[&str] = &["変更", "設定", "更新", "change", "update"];
const RELEASE_MARKERS: &[&str] = &["リリース", "展開", "release", "rollout"];
const REQUEST_MARKERS: &[&str] = &["依頼", "申請", "ほしい", "request", "please provide"];
const INCIDENT_MARKERS: &[&str] = &["障害", "エラー", "止まった", "outage", "error"];

fn contains_any(text: &str, markers: &[&str]) -> bool {
    let lower = text.to_lowercase();
    markers.iter().any(|m| lower.contains(m))
}

/// Classify a query on both axes
///
/// Total: every query receives exactly one `QueryType` and one
/// `DomainCategory`. Problem markers are checked before incident
/// markers so that a root-cause question mentioning an incident term
/// ("なぜ障害が...") lands on `Problem` rather than `Incident`.
pub fn classify(query: &Query) -> QueryClassification {
    let text = query.text();

    let query_type = if contains_any(text, FAQ_MARKERS) {
        QueryType::Faq
    } else if contains_any(text, INVESTIGATION_MARKERS) {
        QueryType::Investigation
    } else {
        QueryType::Evidence
    };

    let domain_category = if contains_any(text, PROBLEM_MARKERS) {
        DomainCategory::Problem
    } else if contains_any(text, CHANGE_MARKERS) {
        DomainCategory::Change
    } else if contains_any(text, RELEASE_MARKERS) {
        DomainCategory::Release
    } else if contains_any(text, REQUEST_MARKERS) {
        DomainCategory::Request
    } else if contains_any(text, INCIDENT_MARKERS) {
        DomainCategory::Incident
    } else {
        // Named default: an unmatched query is treated as an incident
        DomainCategory::Incident
    };

    QueryClassification {
        query_type,
        domain_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_text(text: &str) -> QueryClassification {
        classify(&Query::new(text))
    }

    #[test]
    fn test_interrogative_marker_yields_faq() {
        let c = classify_text("パスワードをリセットする方法は？");
        assert_eq!(c.query_type, QueryType::Faq);

        let c = classify_text("How do I map a network drive?");
        assert_eq!(c.query_type, QueryType::Faq);
    }

    #[test]
    fn test_faq_holds_regardless_of_domain() {
        let c = classify_text("障害の復旧方法は?");
        assert_eq!(c.query_type, QueryType::Faq);
        assert_eq!(c.domain_category, DomainCategory::Incident);
    }

    #[test]
    fn test_default_scenario() {
        // No type markers, no domain markers: both axes fall through
        let c = classify_text("Outlookで添付ファイルが送信できない");
        assert_eq!(c.query_type, QueryType::Evidence);
        assert_eq!(c.domain_category, DomainCategory::Incident);
    }

    #[test]
    fn test_investigation_and_problem_scenario() {
        let c = classify_text("なぜ障害が頻発するのか調査してほしい");
        assert_eq!(c.query_type, QueryType::Investigation);
        assert_eq!(c.domain_category, DomainCategory::Problem);
    }

    #[test]
    fn test_change_and_request_markers() {
        let c = classify_text("プロキシ設定を更新したい");
        assert_eq!(c.domain_category, DomainCategory::Change);

        let c = classify_text("新しいライセンスを申請");
        assert_eq!(c.domain_category, DomainCategory::Request);
    }

    #[test]
    fn test_release_markers() {
        let c = classify_text("次回リリースの影響範囲");
        assert_eq!(c.domain_category, DomainCategory::Release);
    }

    #[test]
    fn test_labels_match_wire_casing() {
        // Console strings and the JSON wire form must agree
        for query_type in [QueryType::Faq, QueryType::Investigation, QueryType::Evidence] {
            let wire = serde_json::to_value(query_type).unwrap();
            assert_eq!(wire, query_type.as_str());
        }
        for category in [
            DomainCategory::Incident,
            DomainCategory::Problem,
            DomainCategory::Change,
            DomainCategory::Release,
            DomainCategory::Request,
        ] {
            let wire = serde_json::to_value(category).unwrap();
            assert_eq!(wire, category.as_str());
        }
    }

    #[test]
    fn test_always_total() {
        for text in [
            "x",
            "完全に無関係なテキスト",
            "a long english sentence with nothing relevant in it at all",
        ] {
            // Must terminate with exactly one label per axis
            let c = classify_text(text);
            let _ = (c.query_type, c.domain_category);
        }
    }
}
