//! Console output formatter for chat streams

use crate::output::formatter::{ChunkFormatter, PlainFormatter};
use colored::Colorize;
use quorum_desk_domain::{Backend, Chunk, Phase, Verbosity};

/// Formats chunks for a terminal
///
/// Each content chunk gets a header naming its phase and backend; votes
/// are colored by score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Banner printed before a streamed chat
    pub fn header(prompt: &str, primary: &Backend, verbosity: Verbosity) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "=== Quorum Desk ===".cyan().bold()));
        output.push_str(&format!("{} {}\n", "Prompt:".cyan().bold(), prompt));
        output.push_str(&format!(
            "{} {}  {} {}\n",
            "Primary:".cyan().bold(),
            primary,
            "Verbosity:".cyan().bold(),
            verbosity
        ));
        output
    }

    /// Section title for one level of a verbosity sweep
    pub fn verbosity_section(backend: &Backend, verbosity: Verbosity) -> String {
        format!("── {} @ {} ──", backend, verbosity)
            .yellow()
            .bold()
            .to_string()
    }

    fn content_title(model: Option<&Backend>, phase: Option<Phase>) -> String {
        let model = model.map(Backend::as_str).unwrap_or("engine");
        let title = match phase {
            Some(phase) => format!("── {} · {} ──", phase, model),
            None => format!("── {} ──", model),
        };
        match phase {
            Some(Phase::Fallback) => title.red().bold().to_string(),
            _ => title.yellow().bold().to_string(),
        }
    }
}

impl ChunkFormatter for ConsoleFormatter {
    fn format_chunk(&self, chunk: &Chunk) -> String {
        match chunk {
            Chunk::Content { model, phase, text } => {
                format!("\n{}\n{}", Self::content_title(model.as_ref(), *phase), text)
            }
            Chunk::VoteInfo { agent, score, reason } => {
                let line = PlainFormatter::vote_line(agent.as_deref(), *score);
                let line = if *score >= 0.75 {
                    line.green()
                } else if *score > 0.0 {
                    line.yellow()
                } else {
                    line.red()
                };
                match reason {
                    Some(reason) => format!("\n{} {}", line, reason.dimmed()),
                    None => format!("\n{}", line),
                }
            }
        }
    }
}
