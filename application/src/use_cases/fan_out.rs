//! Sub-agent fan-out runner
//!
//! Starts all seven specialist analyses concurrently and returns only
//! after every task has reached a terminal state. One specialist's
//! failure never blocks the others.

use crate::ports::observer::{RunObserver, emit};
use helpdesk_domain::{
    OrchestratorEvent, Query, QueryClassification, SubAgentKind, SubAgentTask, run_analysis,
};
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Run all seven sub-agent analyses concurrently
///
/// Emits `subagent-processing` for each task before it runs and
/// `subagent-completed` as each reaches a terminal state. Returns the
/// full task snapshot in canonical order once every task is terminal;
/// there is no partial-return mode.
pub async fn run_sub_agents(
    query: &Query,
    classification: &QueryClassification,
    observer: &dyn RunObserver,
) -> Vec<SubAgentTask> {
    let started = Instant::now();
    let mut tasks: Vec<SubAgentTask> = SubAgentKind::ALL
        .iter()
        .map(|&kind| SubAgentTask::pending(kind))
        .collect();

    let mut join_set = JoinSet::new();

    for task in &mut tasks {
        let kind = task.kind;
        emit(observer, OrchestratorEvent::SubAgentProcessing { agent: kind });
        task.start(elapsed_ms(started));

        let query = query.clone();
        let classification = *classification;
        join_set.spawn(async move {
            let report = run_analysis(kind, &query, &classification);
            (kind, report)
        });
    }

    while let Some(result) = join_set.join_next().await {
        match result {
            Ok((kind, report)) => {
                debug!(agent = %kind, "sub-agent analysis completed");
                if let Some(task) = tasks.iter_mut().find(|t| t.kind == kind) {
                    task.complete(report, elapsed_ms(started));
                }
                emit(
                    observer,
                    OrchestratorEvent::SubAgentCompleted {
                        agent: kind,
                        success: true,
                    },
                );
            }
            Err(e) => {
                warn!("sub-agent task join error: {e}");
            }
        }
    }

    // A panicked analysis leaves its task non-terminal; mark it failed
    // so the snapshot always holds seven terminal tasks.
    for task in &mut tasks {
        if !task.status.is_terminal() {
            task.fail("analysis task aborted", elapsed_ms(started));
            emit(
                observer,
                OrchestratorEvent::SubAgentCompleted {
                    agent: task.kind,
                    success: false,
                },
            );
        }
    }

    tasks
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::observer::NullObserver;
    use helpdesk_domain::{SubAgentStatus, classify};
    use std::sync::Mutex;

    struct Recording(Mutex<Vec<String>>);

    impl RunObserver for Recording {
        fn on_event(&self, event: &OrchestratorEvent) {
            self.0.lock().unwrap().push(event.name().to_string());
        }
    }

    #[tokio::test]
    async fn test_all_seven_reach_terminal_state() {
        let query = Query::new("Outlookで添付ファイルが送信できない");
        let classification = classify(&query);

        let tasks = run_sub_agents(&query, &classification, &NullObserver).await;

        assert_eq!(tasks.len(), 7);
        for task in &tasks {
            assert_eq!(task.status, SubAgentStatus::Completed, "{}", task.kind);
            assert!(task.report.is_some());
            assert!(task.started_at_ms.is_some());
            assert!(task.finished_at_ms.is_some());
        }
    }

    #[tokio::test]
    async fn test_tasks_returned_in_canonical_order() {
        let query = Query::new("VPN down");
        let classification = classify(&query);

        let tasks = run_sub_agents(&query, &classification, &NullObserver).await;

        let kinds: Vec<SubAgentKind> = tasks.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, SubAgentKind::ALL);
    }

    #[tokio::test]
    async fn test_progress_events_emitted() {
        let query = Query::new("printer offline");
        let classification = classify(&query);
        let observer = Recording(Mutex::new(Vec::new()));

        run_sub_agents(&query, &classification, &observer).await;

        let events = observer.0.lock().unwrap();
        let processing = events.iter().filter(|e| *e == "subagent-processing").count();
        let completed = events.iter().filter(|e| *e == "subagent-completed").count();
        assert_eq!(processing, 7);
        assert_eq!(completed, 7);
    }
}
