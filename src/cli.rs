//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pulseline - heartbeat-controlled agent pipeline
#[derive(Parser)]
#[command(
    name = "pulse",
    about = "Run prompts through a heartbeat-controlled agent loop",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Run a prompt through the agent loop and print the final answer
    Run {
        /// The user prompt
        prompt: String,

        /// Model identifier (defaults to the configured model)
        #[arg(short, long, default_value = "")]
        model: String,

        /// Maximum completion round-trips
        #[arg(short = 'i', long)]
        max_iterations: Option<u32>,

        /// System prompt prepended to the conversation
        #[arg(short, long)]
        system: Option<String>,
    },

    /// List the registered tools
    Tools,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_parses_prompt_and_flags() {
        let cli = Cli::parse_from(["pulse", "run", "2+2?", "--model", "gpt-4o", "-i", "3"]);

        match cli.command {
            Some(Command::Run {
                prompt,
                model,
                max_iterations,
                system,
            }) => {
                assert_eq!(prompt, "2+2?");
                assert_eq!(model, "gpt-4o");
                assert_eq!(max_iterations, Some(3));
                assert!(system.is_none());
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_model_defaults_to_empty() {
        let cli = Cli::parse_from(["pulse", "run", "hello"]);

        match cli.command {
            Some(Command::Run { model, .. }) => assert_eq!(model, ""),
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["pulse", "-v", "--config", "/tmp/p.yml", "tools"]);

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.yml")));
        assert!(matches!(cli.command, Some(Command::Tools)));
    }
}
