//! Progress reporting for orchestration runs

use colored::Colorize;
use helpdesk_application::RunObserver;
use helpdesk_domain::{OrchestratorEvent, RunPhase, SubAgentKind};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports run progress with progress bars
///
/// One bar counts the seven sub-agent analyses, another counts the AI
/// backend calls. The model bar grows as dispatches are observed since
/// the selection size is not known up front.
pub struct ProgressReporter {
    multi: MultiProgress,
    agent_bar: Mutex<Option<ProgressBar>>,
    model_bar: Mutex<Option<ProgressBar>>,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            agent_bar: Mutex::new(None),
            model_bar: Mutex::new(None),
            phase_bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap()
    }

    fn phase_display_name(phase: RunPhase) -> &'static str {
        match phase {
            RunPhase::Idle => "Idle",
            RunPhase::Classifying => "Phase 1: Classification",
            RunPhase::AnalyzingAndCollecting => "Phase 2: Analysis and Collection",
            RunPhase::Integrating => "Phase 3: Integration",
            RunPhase::Done => "Done",
        }
    }

    fn counter_bar(&self, slot: &Mutex<Option<ProgressBar>>, prefix: &str, len: u64) -> ProgressBar {
        let mut guard = slot.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            return pb.clone();
        }
        let pb = self.multi.add(ProgressBar::new(len));
        pb.set_style(Self::bar_style());
        pb.set_prefix(prefix.to_string());
        *guard = Some(pb.clone());
        pb
    }

    fn finish_counters(&self) {
        for slot in [&self.agent_bar, &self.model_bar] {
            if let Some(pb) = slot.lock().unwrap().take() {
                pb.finish();
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RunObserver for ProgressReporter {
    fn on_event(&self, event: &OrchestratorEvent) {
        match event {
            OrchestratorEvent::PhaseChanged { phase } => {
                if let Some(pb) = self.phase_bar.lock().unwrap().take() {
                    pb.finish_and_clear();
                }
                if *phase == RunPhase::Done {
                    self.finish_counters();
                    return;
                }
                let pb = self.multi.add(ProgressBar::new_spinner());
                pb.set_style(Self::spinner_style());
                pb.set_prefix(Self::phase_display_name(*phase).to_string());
                *self.phase_bar.lock().unwrap() = Some(pb);
            }
            OrchestratorEvent::QueryClassified { classification } => {
                if let Some(pb) = self.phase_bar.lock().unwrap().as_ref() {
                    pb.set_message(format!(
                        "{} / {}",
                        classification.query_type.as_str(),
                        classification.domain_category.as_str()
                    ));
                }
            }
            OrchestratorEvent::SubAgentProcessing { agent } => {
                let pb = self.counter_bar(
                    &self.agent_bar,
                    "Sub-agents",
                    SubAgentKind::ALL.len() as u64,
                );
                pb.set_message(agent.to_string());
            }
            OrchestratorEvent::SubAgentCompleted { agent, success } => {
                if let Some(pb) = self.agent_bar.lock().unwrap().as_ref() {
                    let status = if *success {
                        format!("{} {}", "v".green(), agent)
                    } else {
                        format!("{} {}", "x".red(), agent)
                    };
                    pb.set_message(status);
                    pb.inc(1);
                }
            }
            OrchestratorEvent::AiProcessing { model } => {
                let pb = self.counter_bar(&self.model_bar, "AI backends", 0);
                pb.inc_length(1);
                pb.set_message(model.to_string());
            }
            OrchestratorEvent::AiCompleted { model, success } => {
                if let Some(pb) = self.model_bar.lock().unwrap().as_ref() {
                    let status = if *success {
                        format!("{} {}", "v".green(), model)
                    } else {
                        format!("{} {}", "x".red(), model)
                    };
                    pb.set_message(status);
                    pb.inc(1);
                }
            }
            OrchestratorEvent::SelectionChanged { selected } => {
                let names: Vec<&str> = selected.iter().map(|m| m.as_str()).collect();
                self.multi
                    .println(format!("selection: {}", names.join(", ")))
                    .ok();
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl RunObserver for SimpleProgress {
    fn on_event(&self, event: &OrchestratorEvent) {
        match event {
            OrchestratorEvent::PhaseChanged { phase } => {
                println!(
                    "{} {}",
                    "->".cyan(),
                    ProgressReporter::phase_display_name(*phase).bold()
                );
            }
            OrchestratorEvent::QueryClassified { classification } => {
                println!(
                    "   classified as {} / {}",
                    classification.query_type.as_str(),
                    classification.domain_category.as_str()
                );
            }
            OrchestratorEvent::SubAgentCompleted { agent, success } => {
                if *success {
                    println!("  {} {}", "v".green(), agent);
                } else {
                    println!("  {} {} (failed)", "x".red(), agent);
                }
            }
            OrchestratorEvent::AiCompleted { model, success } => {
                if *success {
                    println!("  {} {}", "v".green(), model);
                } else {
                    println!("  {} {} (failed)", "x".red(), model);
                }
            }
            OrchestratorEvent::SelectionChanged { selected } => {
                let names: Vec<&str> = selected.iter().map(|m| m.as_str()).collect();
                println!("selection: {}", names.join(", "));
            }
            OrchestratorEvent::SubAgentProcessing { .. }
            | OrchestratorEvent::AiProcessing { .. } => {}
        }
    }
}
