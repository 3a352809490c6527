//! Response integration - the deterministic fan-in step
//!
//! [`integrate`] merges sub-agent reports and model invocations into a
//! single [`IntegratedAnswer`]. The merge is deterministic: source
//! ordering follows model-dispatch order (not completion order) and
//! URL de-duplication keeps the first occurrence, so the same inputs
//! always produce the same answer. Integration never fails; with no
//! successful inputs it produces a degraded answer that names what was
//! missing.

use crate::classify::QueryClassification;
use crate::core::model::ModelId;
use crate::core::query::Query;
use crate::invocation::{ModelInvocation, SourceRef};
use crate::subagent::{SubAgentKind, SubAgentTask};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Four sub-scores grading the integrated answer, each in 0..=100
///
/// The exact formula is an internal choice; the contract is the range
/// and monotonicity: more successfully collected evidence never lowers
/// a score, all else equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScore {
    pub completeness: u8,
    pub accuracy: u8,
    pub relevance: u8,
    pub overall: u8,
}

impl QualityScore {
    /// Compute the score from the merged inputs
    pub fn compute(tasks: &[SubAgentTask], invocations: &[ModelInvocation]) -> Self {
        let completed = tasks.iter().filter(|t| t.is_completed()).count() as u32;
        let ok_models = invocations.iter().filter(|i| i.is_success()).count() as u32;
        let has_sources = invocations
            .iter()
            .filter_map(ModelInvocation::output)
            .any(|o| !o.sources.is_empty());

        let completeness = clamp_score(40 + completed * 6 + ok_models * 6);
        let accuracy =
            clamp_score(45 + completed * 4 + ok_models * 8 + if has_sources { 7 } else { 0 });
        let relevance = clamp_score(55 + completed * 4 + ok_models * 5);
        let overall = clamp_score((completeness as u32 + accuracy as u32 + relevance as u32) / 3);

        Self {
            completeness,
            accuracy,
            relevance,
            overall,
        }
    }
}

fn clamp_score(value: u32) -> u8 {
    value.min(100) as u8
}

/// The terminal artifact of an orchestration run (Value Object)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegratedAnswer {
    /// Combined answer body
    pub summary: String,
    /// Detail aimed at technicians
    pub technical_summary: String,
    /// Plain-language explanation for the end user
    pub user_summary: String,
    /// De-duplicated sources in model-dispatch order
    pub sources: Vec<SourceRef>,
    pub quality: QualityScore,
    /// Inputs that failed and are therefore absent from the merge
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_inputs: Vec<String>,
}

/// Merge sub-agent reports and model invocations into one answer
pub fn integrate(
    query: &Query,
    classification: &QueryClassification,
    tasks: &[SubAgentTask],
    invocations: &[ModelInvocation],
) -> IntegratedAnswer {
    let sources = dedupe_sources(invocations);
    let quality = QualityScore::compute(tasks, invocations);

    let reasoner_answer = answer_of(invocations, ModelId::Reasoner);
    let evidence_answer = answer_of(invocations, ModelId::EvidenceSearch);
    let info_answer = answer_of(invocations, ModelId::InfoGather);

    let ops_report = report_of(tasks, SubAgentKind::Ops);
    let expert_report = report_of(tasks, SubAgentKind::DomainExpert);
    let coordinator_report = report_of(tasks, SubAgentKind::Coordinator);
    let documenter_report = report_of(tasks, SubAgentKind::Documenter);

    // Technical detail: reasoner first, evidence as fallback, then
    // whatever the local specialists produced.
    let mut technical_parts: Vec<&str> = Vec::new();
    if let Some(answer) = reasoner_answer.or(evidence_answer) {
        technical_parts.push(answer);
    }
    if let Some(report) = ops_report {
        technical_parts.push(report);
    }
    if let Some(report) = expert_report {
        technical_parts.push(report);
    }
    let technical_summary = if technical_parts.is_empty() {
        format!(
            "No backend answered for \"{}\"; manual follow-up required.",
            query.text()
        )
    } else {
        technical_parts.join("\n\n")
    };

    let user_summary = documenter_report
        .map(str::to_string)
        .or_else(|| reasoner_answer.map(str::to_string))
        .unwrap_or_else(|| {
            format!(
                "[{} / {}] {}",
                classification.query_type,
                classification.domain_category,
                query.text()
            )
        });

    let mut summary_parts = vec![user_summary.clone()];
    if let Some(answer) = info_answer {
        summary_parts.push(answer.to_string());
    }
    if let Some(report) = coordinator_report {
        summary_parts.push(report.to_string());
    }
    let summary = summary_parts.join("\n\n");

    let missing_inputs = missing_inputs(tasks, invocations);

    IntegratedAnswer {
        summary,
        technical_summary,
        user_summary,
        sources,
        quality,
        missing_inputs,
    }
}

/// Flatten successful invocations' sources in dispatch order and
/// de-duplicate by URL, keeping the first occurrence
pub fn dedupe_sources(invocations: &[ModelInvocation]) -> Vec<SourceRef> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut sources = Vec::new();
    for output in invocations.iter().filter_map(ModelInvocation::output) {
        for source in &output.sources {
            if seen.insert(source.url.as_str()) {
                sources.push(source.clone());
            }
        }
    }
    sources
}

fn answer_of(invocations: &[ModelInvocation], model: ModelId) -> Option<&str> {
    invocations
        .iter()
        .find(|i| i.model == model)
        .and_then(ModelInvocation::output)
        .map(|o| o.answer.as_str())
}

fn report_of(tasks: &[SubAgentTask], kind: SubAgentKind) -> Option<&str> {
    tasks
        .iter()
        .find(|t| t.kind == kind && t.is_completed())
        .and_then(|t| t.report.as_deref())
}

fn missing_inputs(tasks: &[SubAgentTask], invocations: &[ModelInvocation]) -> Vec<String> {
    let mut missing: Vec<String> = tasks
        .iter()
        .filter(|t| !t.is_completed())
        .map(|t| format!("subagent:{}", t.kind))
        .collect();
    missing.extend(
        invocations
            .iter()
            .filter(|i| !i.is_success())
            .map(|i| format!("model:{}", i.model)),
    );
    missing
}
