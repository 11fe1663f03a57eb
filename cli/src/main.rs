//! CLI entrypoint for Brainstorm AI
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use brainstorm_application::{CompletionClient, ProgressObserver, RunSession};
use brainstorm_infrastructure::{
    ConfigLoader, IdeaFileWriter, JsonExporter, MarkdownExporter, OpenAiBackend, YamlExporter,
};
use brainstorm_presentation::{Cli, ConsoleSummary, ProgressReporter};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration, then apply CLI overrides on top
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };

    if let Some(objective) = cli.objective {
        config.session.objective = objective;
    }
    if let Some(context) = cli.context {
        config.session.context = context;
    }
    if let Some(constraints) = cli.constraints {
        config.session.constraints = constraints;
    }
    if let Some(cycles) = cli.cycles {
        config.session.cycles = cycles;
    }
    if let Some(top_ideas) = cli.top_ideas {
        config.session.top_ideas = top_ideas;
    }

    if config.session.objective.trim().is_empty() {
        bail!("Objective is required. Pass it as an argument or set session.objective.");
    }
    let issues = config.validate();
    if !issues.is_empty() {
        bail!("Invalid configuration:\n  {}", issues.join("\n  "));
    }

    // Initialize logging based on verbosity level, mirrored to a file
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let file_appender =
        tracing_appender::rolling::daily(&config.export.logs_dir, "brainstorm-ai.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    info!("Starting Brainstorm AI");

    // === Dependency Injection ===
    // Create infrastructure adapter (OpenAI-compatible backend)
    let mut backend =
        OpenAiBackend::from_env().context("failed to create the completion backend")?;
    if let Some(base_url) = &config.api.base_url {
        backend = backend.with_base_url(base_url);
    }

    let client = Arc::new(CompletionClient::new(
        Arc::new(backend),
        config.role_settings(),
        config.pricing_table(),
        config.retry_policy(),
    ));
    let usage = client.usage();

    if !cli.quiet {
        let estimate = config.pricing_table().estimate_session_cost(
            &config.roles.default_model,
            config.session.cycles,
            config.session.top_ideas,
        );
        println!();
        println!("Objective: {}", config.session.objective);
        println!();
        print!(
            "{}",
            ConsoleSummary::format_estimate(&estimate, config.session.cycles, config.session.top_ideas)
        );
        println!();
    }

    // Build the session use case with the configured exporters
    let mut run = RunSession::new(Arc::clone(&client), config.session_settings());
    if config.export.json {
        run = run.with_exporter(Box::new(JsonExporter::new(&config.export.logs_dir)));
    }
    if config.export.yaml {
        run = run.with_exporter(Box::new(YamlExporter::new(&config.export.logs_dir)));
    }
    if config.export.markdown {
        run = run.with_exporter(Box::new(MarkdownExporter::new(&config.export.logs_dir)));
    }
    if config.export.save_individual_ideas {
        run = run.with_idea_exporter(Box::new(IdeaFileWriter::new(&config.export.exports_dir)));
    }
    if !cli.quiet {
        let observer: Arc<dyn ProgressObserver> = Arc::new(ProgressReporter::new());
        run = run.with_observer(observer);
    }

    let result = run.execute().await;

    if !cli.quiet {
        println!();
        print!("{}", ConsoleSummary::format_stats(&usage.snapshot()));
    }

    let session = result.context("brainstorming session failed")?;
    info!(
        cycles = session.cycles.len(),
        applications = session.applications.len(),
        "session completed"
    );

    Ok(())
}
