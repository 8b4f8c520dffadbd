//! Pulseline - heartbeat-controlled agent pipeline
//!
//! CLI entry point: runs one prompt through the agent loop and prints the
//! final answer on stdout.

use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use pulseline::cli::{Cli, Command};
use pulseline::config::Config;
use pulseline::llm::{LlmClient, Message, OpenAiClient};
use pulseline::pipeline::HeartbeatPipeline;
use pulseline::tools::ToolRegistry;

fn setup_logging(verbose: bool) -> Result<()> {
    // Logs go to stderr so the answer on stdout stays clean
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "Pulseline loaded config: model={}, max_iterations={}",
        config.llm.model, config.pipeline.max_iterations
    );

    match cli.command {
        Some(Command::Run {
            prompt,
            model,
            max_iterations,
            system,
        }) => cmd_run(config, &prompt, &model, max_iterations, system).await,
        Some(Command::Tools) => cmd_tools(),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Run a prompt through the agent loop
async fn cmd_run(
    mut config: Config,
    prompt: &str,
    model: &str,
    max_iterations: Option<u32>,
    system: Option<String>,
) -> Result<()> {
    if let Some(max) = max_iterations {
        config.pipeline.max_iterations = max;
    }

    config.validate()?;

    let llm: Arc<dyn LlmClient> =
        Arc::new(OpenAiClient::from_config(&config.llm).context("Failed to create LLM client")?);
    let tools = Arc::new(ToolRegistry::standard());

    // Seed history: an optional system turn describing the heartbeat
    // protocol; the pipeline appends the user turn itself
    let mut messages = Vec::new();
    if let Some(system_prompt) = system {
        messages.push(Message::system(system_prompt));
    }

    let pipeline = HeartbeatPipeline::new(config, llm, tools);

    let answer = pipeline
        .pipe(prompt, model, messages, &serde_json::json!({}))
        .await
        .context("Agent loop failed")?;

    println!("{}", answer);
    Ok(())
}

/// List the registered tools
fn cmd_tools() -> Result<()> {
    let registry = ToolRegistry::standard();

    println!("Registered tools:");
    println!();

    for spec in registry.specs() {
        println!("  {}", spec.name);
        println!("    {}", spec.description);

        if let Some(properties) = spec.parameters.get("properties").and_then(|p| p.as_object()) {
            for (param, schema) in properties {
                let param_type = schema.get("type").and_then(|t| t.as_str()).unwrap_or("any");
                println!("    - {} ({})", param, param_type);
            }
        }
        println!();
    }

    Ok(())
}
