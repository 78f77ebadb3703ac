//! Receiving side of a chat.

use futures::Stream;
use quorum_desk_domain::Chunk;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Handle for receiving the chunks of one chat.
///
/// Wraps an `mpsc::Receiver<Chunk>` fed by the chat's producer task and
/// implements [`Stream`]. Dropping the handle stops the producer after its
/// in-flight backend call completes.
pub struct ChunkStream {
    receiver: mpsc::Receiver<Chunk>,
}

impl ChunkStream {
    pub(crate) fn new(receiver: mpsc::Receiver<Chunk>) -> Self {
        Self { receiver }
    }

    /// Next chunk, or `None` once the chat is finished.
    pub async fn recv(&mut self) -> Option<Chunk> {
        self.receiver.recv().await
    }

    /// Drain the stream into a vector.
    pub async fn collect_chunks(mut self) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        while let Some(chunk) = self.recv().await {
            chunks.push(chunk);
        }
        chunks
    }

    /// Consume the stream and concatenate the text of every content chunk.
    ///
    /// Vote chunks are discarded.
    pub async fn collect_text(mut self) -> String {
        let mut full_text = String::new();
        while let Some(chunk) = self.recv().await {
            if let Some(text) = chunk.text() {
                full_text.push_str(text);
            }
        }
        full_text
    }
}

impl Stream for ChunkStream {
    type Item = Chunk;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use quorum_desk_domain::{Backend, Phase};

    fn stream_of(chunks: Vec<Chunk>) -> ChunkStream {
        let (tx, rx) = mpsc::channel(chunks.len().max(1));
        for chunk in chunks {
            tx.try_send(chunk).unwrap();
        }
        ChunkStream::new(rx)
    }

    #[tokio::test]
    async fn test_collect_text_skips_votes() {
        let stream = stream_of(vec![
            Chunk::content(Backend::Gpt5, Phase::Primary, "a"),
            Chunk::vote(&Backend::Gpt5, 1.0),
            Chunk::content(Backend::Claude, Phase::Consensus, "b"),
        ]);
        assert_eq!(stream.collect_text().await, "ab");
    }

    #[tokio::test]
    async fn test_stream_impl_yields_in_order() {
        let stream = stream_of(vec![
            Chunk::content(Backend::Gpt5, Phase::Primary, "first"),
            Chunk::vote(&Backend::Gpt5, 0.5),
        ]);
        let kinds: Vec<_> = stream.map(|c| c.kind()).collect().await;
        assert_eq!(kinds, vec!["content", "vote_info"]);
    }
}
