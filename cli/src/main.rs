//! CLI entrypoint for bootsmith
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use bootsmith_application::{
    ConversationLogger, ExecuteStepUseCase, ExecutionParams, InstructionStore, NoConversationLogger,
    NoProgress, PlanStepsUseCase, RunBootstrapUseCase, ports::progress::BootstrapProgress,
};
use bootsmith_domain::ProjectProfile;
use bootsmith_infrastructure::{
    ConfigLoader, CorpusSource, FileConfig, JsonlConversationLogger, LocalToolExecutor,
    OpenAiEmbeddings, OpenAiGateway, registry_schemas,
};
use bootsmith_application::ports::tool_executor::ToolExecutorPort;
use bootsmith_presentation::{Cli, ProgressReporter, Questionnaire, StdinInteraction};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
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

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load and validate configuration
    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;

    let Some(api_key) = config.model.resolve_api_key() else {
        bail!("No API key configured. Set model.api_key in bootsmith.toml or OPENAI_API_KEY.");
    };

    info!("Starting bootsmith");

    // Collect the project profile
    let profile = if cli.has_full_profile() {
        ProjectProfile::new(
            cli.name.clone().unwrap_or_default(),
            cli.project_type.clone().unwrap_or_default(),
            cli.description.clone().unwrap_or_default(),
            cli.technologies.clone(),
        )
    } else {
        Questionnaire::run()?
    };

    if !cli.quiet {
        println!();
        println!("Bootstrapping '{}' ({})", profile.name, profile.project_type);
        println!("Technologies: {}", profile.technologies_display());
        println!();
    }

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiGateway::new(
        &config.model.base_url,
        &api_key,
        &config.model.chat_model,
    )?);
    let embeddings = Arc::new(OpenAiEmbeddings::new(
        &config.model.base_url,
        &api_key,
        &config.model.embedding_model,
    )?);

    // Build the instruction index once, up front
    let corpus_path = cli.corpus.clone().or(config.corpus.path.clone());
    let corpus_text = CorpusSource::from_config(corpus_path)
        .load()
        .context("Failed to load instruction corpus")?;
    let mut store = InstructionStore::new(embeddings, config.retrieval.to_retrieval_config());
    store
        .load(&corpus_text)
        .await
        .context("Failed to index instruction corpus")?;
    let store = Arc::new(store);

    let executor = Arc::new(LocalToolExecutor::new());
    let tool_schemas = registry_schemas(executor.registry());

    let conversation_logger: Arc<dyn ConversationLogger> =
        match config.execution.conversation_log.as_ref() {
            Some(path) => match JsonlConversationLogger::new(path) {
                Some(logger) => {
                    info!("Writing run transcript to {}", logger.path().display());
                    Arc::new(logger)
                }
                None => Arc::new(NoConversationLogger),
            },
            None => Arc::new(NoConversationLogger),
        };

    let params = ExecutionParams::default()
        .with_temperature(config.execution.temperature)
        .with_max_turns(config.execution.max_turns);

    let planner = PlanStepsUseCase::new(gateway.clone());
    let step_executor = ExecuteStepUseCase::new(
        gateway,
        executor,
        Arc::new(StdinInteraction::new()),
        store,
        tool_schemas,
    )
    .with_params(params)
    .with_conversation_logger(conversation_logger);

    let use_case = RunBootstrapUseCase::new(planner, step_executor);

    let progress: Box<dyn BootstrapProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let report = use_case.execute(&profile, progress.as_ref()).await?;

    println!();
    println!(
        "Finished: {}/{} steps completed",
        report.completed(),
        report.steps.len()
    );
    if !report.all_completed() {
        println!("{} step(s) were abandoned; review the log and re-run if needed.", report.abandoned());
        std::process::exit(1);
    }

    Ok(())
}
