//! CLI entrypoint for Mirai HelpDesk
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use helpdesk_application::{NoCache, ResponseCache, RunQueryUseCase};
use helpdesk_domain::{ModelId, Query};
use helpdesk_infrastructure::{
    ConfigLoader, HttpAiGateway, MemoryResponseCache, RedisResponseCache,
};
use helpdesk_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting Mirai HelpDesk");

    let query_text = match cli.query {
        Some(q) => q,
        None => bail!("A query is required."),
    };
    let query = Query::try_new(query_text.clone()).context("invalid query")?;

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?
    };

    // Selection: CLI flags override the configured models
    let selection: Vec<ModelId> = if cli.model.is_empty() {
        config.selection_models()?
    } else {
        cli.model
            .iter()
            .map(|s| s.parse())
            .collect::<Result<_, _>>()?
    };

    // === Dependency Injection ===
    let cache: Arc<dyn ResponseCache> = if cli.no_cache {
        Arc::new(NoCache)
    } else {
        match &config.cache.redis_url {
            Some(url) => match RedisResponseCache::connect(url).await {
                Ok(redis) => Arc::new(redis),
                Err(e) => {
                    warn!("Redis unavailable, falling back to in-memory cache: {e}");
                    Arc::new(MemoryResponseCache::new())
                }
            },
            None => Arc::new(MemoryResponseCache::new()),
        }
    };

    let mut policy = config.invoke_policy();
    if cli.no_cache {
        policy.cache_enabled = false;
    }

    let gateway = Arc::new(HttpAiGateway::new(&config, cache));

    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|              Mirai HelpDesk - AI Orchestrator              |");
        println!("+============================================================+");
        println!();
        println!("Query: {}", query_text);
        println!(
            "Backends: {}",
            selection
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    let use_case = RunQueryUseCase::new(gateway)
        .with_selection(selection)
        .with_policy(policy);

    // Execute with or without progress reporting
    let outcome = if cli.quiet {
        use_case.execute(query).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_observer(query, &progress).await
    };

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&outcome),
        OutputFormat::Answer => ConsoleFormatter::format_answer_only(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };

    println!("{}", output);

    Ok(())
}
