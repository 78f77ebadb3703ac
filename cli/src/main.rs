//! CLI entrypoint for Quorum Desk
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use quorum_desk_application::{ChatOptions, ChatOrchestrator, PRIMARY_FALLBACK_PREFIX};
use quorum_desk_domain::{TaskType, Verbosity};
use quorum_desk_infrastructure::{
    ConfigLoader, FileConfig, JsonlTranscriptLogger, build_clients, build_engine, describe,
};
use quorum_desk_presentation::{
    AskArgs, ChunkFormatter, Cli, Command, ConsoleFormatter, JsonLinesFormatter,
};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are written on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    ConfigLoader::check(&config)?;

    info!("Starting Quorum Desk");

    // === Dependency Injection ===
    let orchestrator = build_orchestrator(&config)?;

    match cli.command {
        Some(Command::Serve { bind }) => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            quorum_desk_presentation::serve(orchestrator, &bind)
                .await
                .with_context(|| format!("HTTP server on {} failed", bind))?;
        }
        Some(Command::Ask(args)) => run_ask(&orchestrator, args).await?,
        None => bail!("No command given. Use `quorum-desk ask \"<prompt>\"` or `quorum-desk serve`."),
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over the `-v` count. With a log file, output goes
/// through a non-blocking appender whose guard must outlive `main`.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let Some(path) = log_file else {
        builder.with_writer(std::io::stderr).init();
        return Ok(None);
    };

    let Some(file_name) = path.file_name() else {
        bail!("--log-file must name a file, got {}", path.display());
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    builder.with_writer(writer).with_ansi(false).init();
    Ok(Some(guard))
}

fn build_orchestrator(config: &FileConfig) -> Result<ChatOrchestrator> {
    let clients = build_clients(config)?;
    info!("Model clients: {:?}", describe(&clients));
    let engine = build_engine(config)?;
    let mut orchestrator =
        ChatOrchestrator::new(config.to_orchestrator_config(), clients, engine)?;

    if let Some(path) = &config.logging.transcript_path {
        match JsonlTranscriptLogger::new(path) {
            Some(logger) => {
                info!("Writing transcripts to {}", logger.path().display());
                orchestrator = orchestrator.with_transcript_logger(Arc::new(logger));
            }
            None => warn!("Transcript logging disabled"),
        }
    }

    Ok(orchestrator)
}

async fn run_ask(orchestrator: &ChatOrchestrator, args: AskArgs) -> Result<()> {
    let mut options = ChatOptions::new().with_task_type(TaskType::from(args.task_type));
    if let Some(backend) = args.model {
        options = options.with_backend(backend);
    }
    if let Some(verbosity) = args.verbosity {
        options = options.with_verbosity(verbosity);
    }
    if args.no_voting {
        options = options.with_voting(false);
    }

    if args.all_verbosities {
        let backend = orchestrator.resolve_backend(&options);
        for verbosity in Verbosity::ALL {
            println!("{}", ConsoleFormatter::verbosity_section(&backend, verbosity));
            match orchestrator.generate(&backend, &args.prompt, verbosity).await {
                Ok(text) => println!("{}\n", text),
                Err(e) => println!("{}{}\n", PRIMARY_FALLBACK_PREFIX, e),
            }
        }
        return Ok(());
    }

    if args.sync {
        println!("{}", orchestrator.chat_sync(args.prompt, options).await);
        return Ok(());
    }

    let formatter: Box<dyn ChunkFormatter> = if args.json {
        Box::new(JsonLinesFormatter)
    } else {
        print!(
            "{}",
            ConsoleFormatter::header(
                &args.prompt,
                &orchestrator.resolve_backend(&options),
                orchestrator.effective_verbosity(&options),
            )
        );
        Box::new(ConsoleFormatter)
    };

    let mut stream = orchestrator.chat(args.prompt, options);
    let mut stdout = std::io::stdout();
    while let Some(chunk) = stream.recv().await {
        writeln!(stdout, "{}", formatter.format_chunk(&chunk))?;
        stdout.flush()?;
    }

    Ok(())
}
