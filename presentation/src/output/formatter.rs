//! Output formatter trait and the wire formats

use quorum_desk_domain::Chunk;

/// Turns one chunk into the text written for it
pub trait ChunkFormatter {
    fn format_chunk(&self, chunk: &Chunk) -> String;
}

/// Plain text as written to `/chat/stream` bodies.
///
/// Content text is passed through verbatim; votes become
/// `"\n[Vote] agent=<agent> score=<score>\n"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    /// `[Vote] agent=<agent> score=<score>` without surrounding newlines.
    ///
    /// A missing agent renders as `None`; the score always shows a decimal
    /// point (`1.0`, `0.75`).
    pub fn vote_line(agent: Option<&str>, score: f64) -> String {
        format!("[Vote] agent={} score={:?}", agent.unwrap_or("None"), score)
    }
}

impl ChunkFormatter for PlainFormatter {
    fn format_chunk(&self, chunk: &Chunk) -> String {
        match chunk {
            Chunk::Content { text, .. } => text.clone(),
            Chunk::VoteInfo { agent, score, .. } => {
                format!("\n{}\n", Self::vote_line(agent.as_deref(), *score))
            }
        }
    }
}

/// One serialized chunk per line
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesFormatter;

impl ChunkFormatter for JsonLinesFormatter {
    fn format_chunk(&self, chunk: &Chunk) -> String {
        serde_json::to_string(chunk).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_desk_domain::{Backend, Phase};

    #[test]
    fn test_plain_content_is_verbatim() {
        let chunk = Chunk::content(Backend::Gpt5, Phase::Primary, "[gpt5|minimal] hi");
        assert_eq!(PlainFormatter.format_chunk(&chunk), "[gpt5|minimal] hi");
    }

    #[test]
    fn test_plain_vote_line() {
        let chunk = Chunk::vote(&Backend::Claude, 1.0);
        assert_eq!(
            PlainFormatter.format_chunk(&chunk),
            "\n[Vote] agent=claude score=1.0\n"
        );
    }

    #[test]
    fn test_plain_vote_without_agent() {
        let chunk = Chunk::VoteInfo {
            agent: None,
            score: 0.25,
            reason: Some("weak".to_string()),
        };
        assert_eq!(
            PlainFormatter.format_chunk(&chunk),
            "\n[Vote] agent=None score=0.25\n"
        );
    }

    #[test]
    fn test_json_lines() {
        let line = JsonLinesFormatter.format_chunk(&Chunk::vote(&Backend::Mistral, 0.0));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["type"], "vote_info");
        assert_eq!(value["agent"], "mistral");
        assert!(!line.contains('\n'));
    }
}
