//! Per-specialist analysis functions
//!
//! Each analysis is a deterministic function of the query and its
//! classification: same inputs, same report. The fan-out runner calls
//! these concurrently; they never block and never call external
//! services.

use super::SubAgentKind;
use crate::classify::{DomainCategory, QueryClassification, QueryType};
use crate::core::query::Query;

/// Technical terms the Ops specialist scans for
const TECH_ELEMENTS: &[&str] = &[
    "outlook",
    "teams",
    "sharepoint",
    "onedrive",
    "exchange",
    "vpn",
    "wifi",
    "プリンタ",
    "printer",
    "password",
    "パスワード",
    "license",
    "ライセンス",
    "network",
    "ネットワーク",
];

/// Run one specialist's analysis
pub fn run_analysis(
    kind: SubAgentKind,
    query: &Query,
    classification: &QueryClassification,
) -> String {
    match kind {
        SubAgentKind::Architect => architect(query),
        SubAgentKind::Curator => curator(query, classification),
        SubAgentKind::DomainExpert => domain_expert(classification),
        SubAgentKind::Ops => ops(query),
        SubAgentKind::Qa => qa(query),
        SubAgentKind::Coordinator => coordinator(classification),
        SubAgentKind::Documenter => documenter(query, classification),
    }
}

/// Structural consistency: is the query answerable as stated?
fn architect(query: &Query) -> String {
    let chars = query.text().chars().count();
    let turns = query.history().len();
    let shape = if chars < 10 {
        "terse; may need a follow-up question"
    } else if turns > 0 {
        "part of an ongoing conversation"
    } else {
        "self-contained"
    };
    format!("structure: {shape} ({chars} chars, {turns} prior turns)")
}

/// Taxonomy tags derived from the classification and query text
fn curator(query: &Query, classification: &QueryClassification) -> String {
    let mut tags = vec![
        classification.query_type.as_str().to_string(),
        classification.domain_category.as_str().to_string(),
    ];
    tags.extend(found_elements(query).iter().map(|e| e.to_string()));
    format!("tags: {}", tags.join(", "))
}

/// ITSM-process guidance for the assigned category
fn domain_expert(classification: &QueryClassification) -> String {
    let guidance = match classification.domain_category {
        DomainCategory::Incident => "restore service first, analyze later",
        DomainCategory::Problem => "identify root cause before applying workarounds",
        DomainCategory::Change => "verify approval and rollback plan before applying",
        DomainCategory::Release => "confirm deployment window and affected services",
        DomainCategory::Request => "confirm entitlement and route for fulfilment",
    };
    format!(
        "{} process applies: {}",
        classification.domain_category, guidance
    )
}

/// Technical elements mentioned in the query
fn ops(query: &Query) -> String {
    let found = found_elements(query);
    if found.is_empty() {
        "no known technical elements detected".to_string()
    } else {
        format!("technical elements: {}", found.join(", "))
    }
}

/// Quality / duplicate heuristics
fn qa(query: &Query) -> String {
    // Repeated history turns with the same text suggest a duplicate report
    let duplicate = query
        .history()
        .iter()
        .any(|turn| turn.text.trim() == query.text().trim());
    if duplicate {
        "possible duplicate of an earlier turn in this conversation".to_string()
    } else {
        "no duplicate indicators found".to_string()
    }
}

/// Teams that need to be looped in for this category
fn coordinator(classification: &QueryClassification) -> String {
    let parties = match classification.domain_category {
        DomainCategory::Incident => "service desk, on-call operations",
        DomainCategory::Problem => "problem management, engineering",
        DomainCategory::Change => "change advisory board",
        DomainCategory::Release => "release management, QA",
        DomainCategory::Request => "fulfilment team",
    };
    format!("coordination points: {parties}")
}

/// One-line summary for the final answer
fn documenter(query: &Query, classification: &QueryClassification) -> String {
    let excerpt: String = query.text().chars().take(60).collect();
    format!(
        "[{} / {}] {}",
        classification.query_type, classification.domain_category, excerpt
    )
}

fn found_elements(query: &Query) -> Vec<&'static str> {
    let lower = query.text().to_lowercase();
    TECH_ELEMENTS
        .iter()
        .copied()
        .filter(|e| lower.contains(e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn classified(text: &str) -> (Query, QueryClassification) {
        let query = Query::new(text);
        let classification = classify(&query);
        (query, classification)
    }

    #[test]
    fn test_all_analyses_are_deterministic() {
        let (query, classification) = classified("Outlookで添付ファイルが送信できない");
        for kind in SubAgentKind::ALL {
            let first = run_analysis(kind, &query, &classification);
            let second = run_analysis(kind, &query, &classification);
            assert_eq!(first, second, "{kind} analysis must be deterministic");
            assert!(!first.is_empty());
        }
    }

    #[test]
    fn test_ops_extracts_elements() {
        let (query, classification) = classified("VPN and Outlook both fail");
        let report = run_analysis(SubAgentKind::Ops, &query, &classification);
        assert!(report.contains("vpn"));
        assert!(report.contains("outlook"));
    }

    #[test]
    fn test_curator_includes_classification_tags() {
        let (query, classification) = classified("なぜ障害が頻発するのか調査してほしい");
        let report = run_analysis(SubAgentKind::Curator, &query, &classification);
        assert!(report.contains("investigation"));
        assert!(report.contains("problem"));
    }

    #[test]
    fn test_qa_flags_duplicate_turn() {
        use crate::core::query::{ConversationTurn, TurnRole};
        let query = Query::new("printer offline").with_history(vec![ConversationTurn::new(
            TurnRole::User,
            "printer offline",
        )]);
        let classification = classify(&query);
        let report = run_analysis(SubAgentKind::Qa, &query, &classification);
        assert!(report.contains("duplicate"));
    }

    #[test]
    fn test_faq_type_used_by_documenter() {
        let (query, classification) = classified("How do I reset my password?");
        assert_eq!(classification.query_type, QueryType::Faq);
        let report = run_analysis(SubAgentKind::Documenter, &query, &classification);
        assert!(report.contains("faq"));
    }
}
