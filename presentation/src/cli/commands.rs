//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use quorum_desk_domain::{Backend, Verbosity};
use std::path::PathBuf;

/// CLI arguments for quorum-desk
#[derive(Parser, Debug)]
#[command(name = "quorum-desk")]
#[command(author, version, about = "Multi-backend chat orchestration with consensus and voting")]
#[command(long_about = r#"
Quorum Desk answers every prompt in two phases:

1. Primary: one fast answer from the backend that fits the task type
2. Consensus: answers from every configured backend (or a delegated
   multi-agent engine), each optionally followed by a confidence vote

Configuration files are loaded from (in priority order):
1. --config <path>                     Explicit config file
2. ./quorum-desk.toml                  Project-level config
3. ~/.config/quorum-desk/config.toml   Global config
QUORUM_DESK_* and VERBOSITY environment variables override all files.

Example:
  quorum-desk ask "Summarize this ticket" --task-type summarization
  quorum-desk ask "Find leads in fintech" --model claude --verbosity verbose
  quorum-desk serve --bind 0.0.0.0:8000
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask one question and stream the answer
    Ask(AskArgs),

    /// Run the HTTP API
    Serve {
        /// Listen address (overrides `[server] bind`)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The prompt to send
    pub prompt: String,

    /// Backend for the primary answer (gpt5, claude, mistral, gemini, ...)
    #[arg(short, long, value_name = "BACKEND", value_parser = parse_backend)]
    pub model: Option<Backend>,

    /// minimal, balanced or verbose
    #[arg(long, value_name = "LEVEL", value_parser = parse_verbosity)]
    pub verbosity: Option<Verbosity>,

    /// Task type used to pick the primary backend
    #[arg(short, long, value_name = "TYPE", default_value = "research_query")]
    pub task_type: String,

    /// Do not emit confidence votes
    #[arg(long)]
    pub no_voting: bool,

    /// Wait for the whole answer and print it at once
    #[arg(long)]
    pub sync: bool,

    /// Print one JSON object per chunk
    #[arg(long, conflicts_with = "sync")]
    pub json: bool,

    /// Ask the primary backend once per verbosity level instead of chatting
    #[arg(long, conflicts_with_all = ["sync", "json", "verbosity"])]
    pub all_verbosities: bool,
}

fn parse_backend(value: &str) -> Result<Backend, String> {
    if value.trim().is_empty() {
        return Err("backend name is empty".to_string());
    }
    value.parse::<Backend>().map_err(|e| e.to_string())
}

fn parse_verbosity(value: &str) -> Result<Verbosity, String> {
    value.parse::<Verbosity>().map_err(|e| e.to_string())
}
