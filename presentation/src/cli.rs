//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for orchestration results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with all backend responses and analyses
    Full,
    /// Only the integrated answer
    Answer,
    /// JSON output (the wire contract shape)
    Json,
}

/// CLI arguments for mirai-helpdesk
#[derive(Parser, Debug)]
#[command(name = "mirai-helpdesk")]
#[command(author, version, about = "Multi-AI helpdesk orchestrator for ITSM queries")]
#[command(long_about = r#"
Mirai HelpDesk classifies an ITSM query, fans it out to seven local
analysis roles and the selected AI backends in parallel, and merges
everything into one integrated answer with a quality score.

Backends: reasoner (Claude), evidence-search (Perplexity),
info-gather (Gemini). The default selection is reasoner only.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./helpdesk.toml     Project-level config
3. ~/.config/mirai-helpdesk/config.toml   Global config

Example:
  mirai-helpdesk "Outlookで添付ファイルが送信できない"
  mirai-helpdesk -m reasoner -m evidence-search "なぜ障害が頻発するのか調査してほしい"
  mirai-helpdesk --output json "How do I reset my password?"
"#)]
pub struct Cli {
    /// The query to orchestrate
    pub query: Option<String>,

    /// AI backends to consult (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "answer")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Bypass the response cache for this run
    #[arg(long)]
    pub no_cache: bool,
}
