//! Sub-agent analysis tasks
//!
//! Seven fixed specialists analyze every query in parallel. Each task
//! lives only for the duration of one orchestration run; the final
//! status snapshot travels out with the integrated answer, nothing is
//! persisted.

mod analysis;

pub use analysis::run_analysis;

use serde::{Deserialize, Serialize};

/// The seven fixed sub-agent specialists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubAgentKind {
    /// Structural consistency check of the query
    Architect,
    /// Tag and category assignment
    Curator,
    /// ITSM-principle compliance verification
    DomainExpert,
    /// Technical element extraction
    Ops,
    /// Quality assurance and duplicate detection
    Qa,
    /// Cross-team coordination point check
    Coordinator,
    /// Summary generation
    Documenter,
}

impl SubAgentKind {
    /// All sub-agents, in canonical order
    pub const ALL: [SubAgentKind; 7] = [
        SubAgentKind::Architect,
        SubAgentKind::Curator,
        SubAgentKind::DomainExpert,
        SubAgentKind::Ops,
        SubAgentKind::Qa,
        SubAgentKind::Coordinator,
        SubAgentKind::Documenter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubAgentKind::Architect => "architect",
            SubAgentKind::Curator => "curator",
            SubAgentKind::DomainExpert => "domain-expert",
            SubAgentKind::Ops => "ops",
            SubAgentKind::Qa => "qa",
            SubAgentKind::Coordinator => "coordinator",
            SubAgentKind::Documenter => "documenter",
        }
    }

    /// Human-readable role description
    pub fn role(&self) -> &'static str {
        match self {
            SubAgentKind::Architect => "Design consistency check",
            SubAgentKind::Curator => "Tag and category classification",
            SubAgentKind::DomainExpert => "ITSM principle compliance",
            SubAgentKind::Ops => "Technical element extraction",
            SubAgentKind::Qa => "Quality assurance and duplicate detection",
            SubAgentKind::Coordinator => "Coordination point check",
            SubAgentKind::Documenter => "Summary generation",
        }
    }
}

impl std::fmt::Display for SubAgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of one sub-agent task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubAgentStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl SubAgentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubAgentStatus::Completed | SubAgentStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubAgentStatus::Pending => "pending",
            SubAgentStatus::Running => "running",
            SubAgentStatus::Completed => "completed",
            SubAgentStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SubAgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One sub-agent's task for a single orchestration run (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubAgentTask {
    pub kind: SubAgentKind,
    pub status: SubAgentStatus,
    /// Analysis output, present once completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    /// Failure description, present once failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at_ms: Option<u64>,
}

impl SubAgentTask {
    pub fn pending(kind: SubAgentKind) -> Self {
        Self {
            kind,
            status: SubAgentStatus::Pending,
            report: None,
            error: None,
            started_at_ms: None,
            finished_at_ms: None,
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        self.status = SubAgentStatus::Running;
        self.started_at_ms = Some(now_ms);
    }

    pub fn complete(&mut self, report: impl Into<String>, now_ms: u64) {
        self.status = SubAgentStatus::Completed;
        self.report = Some(report.into());
        self.finished_at_ms = Some(now_ms);
    }

    pub fn fail(&mut self, error: impl Into<String>, now_ms: u64) {
        self.status = SubAgentStatus::Failed;
        self.error = Some(error.into());
        self.finished_at_ms = Some(now_ms);
    }

    pub fn is_completed(&self) -> bool {
        self.status == SubAgentStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_seven_agents() {
        assert_eq!(SubAgentKind::ALL.len(), 7);
    }

    #[test]
    fn test_task_lifecycle() {
        let mut task = SubAgentTask::pending(SubAgentKind::Qa);
        assert_eq!(task.status, SubAgentStatus::Pending);
        assert!(!task.status.is_terminal());

        task.start(10);
        assert_eq!(task.status, SubAgentStatus::Running);

        task.complete("no duplicates found", 25);
        assert!(task.is_completed());
        assert!(task.status.is_terminal());
        assert_eq!(task.started_at_ms, Some(10));
        assert_eq!(task.finished_at_ms, Some(25));
    }

    #[test]
    fn test_task_failure() {
        let mut task = SubAgentTask::pending(SubAgentKind::Ops);
        task.start(0);
        task.fail("analysis panicked", 5);
        assert_eq!(task.status, SubAgentStatus::Failed);
        assert!(task.report.is_none());
        assert!(task.error.is_some());
    }
}
