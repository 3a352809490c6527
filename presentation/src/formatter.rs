//! Console output formatter for orchestration outcomes

use colored::Colorize;
use helpdesk_application::OrchestrationOutcome;

/// Formats orchestration outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete outcome
    pub fn format(outcome: &OrchestrationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Mirai HelpDesk Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {} / {}\n",
            "Classified as:".cyan().bold(),
            outcome.query_type.as_str(),
            outcome.domain_type.as_str()
        ));

        // AI backend responses
        output.push_str(&Self::section_header("AI Backend Responses"));
        if outcome.model_responses.is_empty() {
            output.push_str("\n(no backends selected)\n");
        }
        for invocation in &outcome.model_responses {
            match invocation.output() {
                Some(out) => {
                    let cache_note = if out.cache_hit { " (cached)" } else { "" };
                    output.push_str(&format!(
                        "\n{}\n{}\n",
                        format!("── {} ({} ms){} ──", invocation.model, out.latency_ms, cache_note)
                            .yellow()
                            .bold(),
                        out.answer
                    ));
                }
                None => {
                    output.push_str(&format!(
                        "\n{}\nError: {}\n",
                        format!("── {} ──", invocation.model).red().bold(),
                        invocation
                            .error
                            .as_ref()
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| "Unknown".to_string())
                    ));
                }
            }
        }

        // Sub-agent analyses
        output.push_str(&Self::section_header("Sub-Agent Analyses"));
        for task in &outcome.sub_agent_results {
            match &task.report {
                Some(report) => {
                    output.push_str(&format!(
                        "\n{}\n{}\n",
                        format!("── {} ({}) ──", task.kind, task.kind.role())
                            .yellow()
                            .bold(),
                        report
                    ));
                }
                None => {
                    output.push_str(&format!(
                        "\n{}\nError: {}\n",
                        format!("── {} ──", task.kind).red().bold(),
                        task.error.as_deref().unwrap_or("Unknown")
                    ));
                }
            }
        }

        // Integrated answer
        output.push_str(&Self::section_header("Integrated Answer"));
        output.push_str(&format!("\n{}\n", outcome.answer.summary));

        if !outcome.answer.sources.is_empty() {
            output.push_str(&format!("\n{}\n", "Sources:".cyan().bold()));
            for source in &outcome.answer.sources {
                output.push_str(&format!("  * {} ({})\n", source.title, source.url));
            }
        }

        if !outcome.answer.missing_inputs.is_empty() {
            output.push_str(&format!("\n{}\n", "Missing inputs:".yellow().bold()));
            for missing in &outcome.answer.missing_inputs {
                output.push_str(&format!("  * {}\n", missing));
            }
        }

        let q = &outcome.quality_score;
        output.push_str(&format!(
            "\n{} {} (completeness {}, accuracy {}, relevance {})\n",
            "Quality:".cyan().bold(),
            q.overall,
            q.completeness,
            q.accuracy,
            q.relevance
        ));
        output.push_str(&format!(
            "{} {} ms\n",
            "Elapsed:".dimmed(),
            outcome.processing_time_ms
        ));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON (the wire contract shape)
    pub fn format_json(outcome: &OrchestrationOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the integrated answer only (concise output)
    pub fn format_answer_only(outcome: &OrchestrationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Mirai HelpDesk Answer ===".cyan().bold()
        ));

        output.push_str(&format!(
            "{} {} / {}\n\n",
            "Classified as:".dimmed(),
            outcome.query_type.as_str(),
            outcome.domain_type.as_str()
        ));

        output.push_str(&outcome.answer.summary);
        output.push('\n');

        if !outcome.answer.sources.is_empty() {
            output.push('\n');
            for source in &outcome.answer.sources {
                output.push_str(&format!("  * {}\n", source.url));
            }
        }

        output.push_str(&format!(
            "\n{} {}  {} {} ms\n",
            "Quality:".dimmed(),
            outcome.quality_score.overall,
            "Elapsed:".dimmed(),
            outcome.processing_time_ms
        ));

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
