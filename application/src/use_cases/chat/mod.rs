//! Chat use case
//!
//! Runs one query through the primary/consensus flow and streams the
//! resulting chunks to the caller.
//!
//! # Flow
//!
//! 1. **Primary**: exactly one content chunk from the backend picked by the
//!    caller's hint or the [`ModelSelector`]. Failures become the chunk's
//!    text, so the first chunk always arrives.
//! 2. **Consensus**: either a delegated engine's normalized output or one
//!    answer (plus optional vote) per configured backend. Any failure here
//!    switches to a single fallback answer through the primary backend and
//!    the stream still ends normally.

mod options;
mod stream;

pub use options::ChatOptions;
pub use stream::ChunkStream;

use crate::config::OrchestratorConfig;
use crate::ports::consensus_engine::{ConsensusEngine, EngineError, EngineRequest};
use crate::ports::model_client::{BackendError, ModelClient};
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use quorum_desk_domain::{Backend, Chunk, ModelSelector, Phase, Verbosity, normalize};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Prefix of the text emitted when a primary (or fallback) call fails.
pub const PRIMARY_FALLBACK_PREFIX: &str = "[primary-fallback] ";

/// Score attached to votes for answers that were produced successfully.
pub const CONSENSUS_VOTE_SCORE: f64 = 1.0;

/// Errors raised while constructing a [`ChatOrchestrator`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrchestratorError {
    #[error("No backends configured")]
    NoBackends,

    #[error("Backend '{0}' has more than one client")]
    DuplicateBackend(Backend),

    #[error("Consensus backend '{0}' has no client")]
    UnknownConsensusBackend(Backend),
}

/// How the consensus phase is produced, fixed at construction.
#[derive(Clone)]
pub enum EngineMode {
    /// Delegate to an external multi-agent engine.
    Delegated(Arc<dyn ConsensusEngine>),
    /// Query these backends directly, in this order.
    Standalone(Vec<Backend>),
}

impl std::fmt::Debug for EngineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineMode::Delegated(engine) => f.debug_tuple("Delegated").field(&engine.name()).finish(),
            EngineMode::Standalone(backends) => f.debug_tuple("Standalone").field(backends).finish(),
        }
    }
}

/// Why the consensus phase gave up
#[derive(Error, Debug)]
enum ConsensusFailure {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("consensus task failed: {0}")]
    Task(String),
}

/// Result of the consensus phase
enum ConsensusOutcome {
    Completed,
    /// The caller dropped the stream.
    Abandoned,
    Failed(ConsensusFailure),
}

/// Everything resolved for one chat before the producer starts.
#[derive(Debug, Clone)]
struct ChatRequest {
    id: u64,
    query: String,
    backend: Backend,
    verbosity: Verbosity,
    voting: bool,
}

/// Sending side of a chat: forwards chunks to the caller and the transcript.
struct ChunkSink {
    chat_id: u64,
    sender: mpsc::Sender<Chunk>,
    transcript: Arc<dyn TranscriptLogger>,
    emitted: usize,
}

impl ChunkSink {
    /// Returns `false` once the receiver is gone.
    async fn emit(&mut self, chunk: Chunk) -> bool {
        self.transcript.log(TranscriptEvent::new(
            "chunk",
            self.chat_id,
            json!({ "chunk": &chunk }),
        ));
        if self.sender.send(chunk).await.is_err() {
            debug!("Chat {} receiver dropped", self.chat_id);
            return false;
        }
        self.emitted += 1;
        true
    }
}

/// Multi-backend chat orchestrator
///
/// Cheap to clone; every chat runs independently on its own task, so one
/// instance can serve any number of concurrent chats.
#[derive(Clone)]
pub struct ChatOrchestrator {
    clients: Arc<HashMap<Backend, Arc<dyn ModelClient>>>,
    selector: ModelSelector,
    mode: EngineMode,
    config: Arc<OrchestratorConfig>,
    transcript: Arc<dyn TranscriptLogger>,
    next_chat_id: Arc<AtomicU64>,
}

impl ChatOrchestrator {
    /// Build an orchestrator over a fixed client set.
    ///
    /// With an `engine` the consensus phase is delegated; otherwise the
    /// configured consensus backends are queried directly.
    pub fn new(
        config: OrchestratorConfig,
        clients: Vec<Arc<dyn ModelClient>>,
        engine: Option<Arc<dyn ConsensusEngine>>,
    ) -> Result<Self, OrchestratorError> {
        if clients.is_empty() {
            return Err(OrchestratorError::NoBackends);
        }

        let mut by_backend: HashMap<Backend, Arc<dyn ModelClient>> = HashMap::new();
        for client in clients {
            let backend = client.backend().clone();
            if by_backend.insert(backend.clone(), client).is_some() {
                return Err(OrchestratorError::DuplicateBackend(backend));
            }
        }

        let mode = match engine {
            Some(engine) => EngineMode::Delegated(engine),
            None => {
                if let Some(missing) = config.consensus.iter().find(|b| !by_backend.contains_key(*b)) {
                    return Err(OrchestratorError::UnknownConsensusBackend(missing.clone()));
                }
                EngineMode::Standalone(config.consensus.clone())
            }
        };

        info!(
            "Chat orchestrator ready: {} clients, mode {:?}",
            by_backend.len(),
            mode
        );

        Ok(Self {
            clients: Arc::new(by_backend),
            selector: ModelSelector::new(config.default_backend.clone()),
            mode,
            config: Arc::new(config),
            transcript: Arc::new(NoTranscriptLogger),
            next_chat_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Record every emitted chunk through `logger`.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    /// Backend the primary phase will use for these options
    pub fn resolve_backend(&self, options: &ChatOptions) -> Backend {
        options
            .backend_hint
            .clone()
            .unwrap_or_else(|| self.selector.select(&options.task_type))
    }

    /// Verbosity a chat with these options will run at
    pub fn effective_verbosity(&self, options: &ChatOptions) -> Verbosity {
        options.verbosity.unwrap_or(self.config.default_verbosity)
    }

    /// One bounded call through a single backend.
    pub async fn generate(
        &self,
        backend: &Backend,
        prompt: &str,
        verbosity: Verbosity,
    ) -> Result<String, BackendError> {
        let client = self
            .clients
            .get(backend)
            .ok_or_else(|| BackendError::not_configured(backend.clone()))?;

        let timeout = self.config.request_timeout;
        match tokio::time::timeout(timeout, client.generate(prompt, verbosity)).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::timeout(backend.clone(), timeout)),
        }
    }

    /// Start a chat and return its chunk stream.
    ///
    /// The first chunk is always the primary answer. Must be called from
    /// within a Tokio runtime.
    pub fn chat(&self, query: impl Into<String>, options: ChatOptions) -> ChunkStream {
        let request = ChatRequest {
            id: self.next_chat_id.fetch_add(1, Ordering::Relaxed),
            query: query.into(),
            backend: self.resolve_backend(&options),
            verbosity: self.effective_verbosity(&options),
            voting: options.voting_enabled.unwrap_or(self.config.voting_enabled),
        };

        let (sender, receiver) = mpsc::channel(self.config.stream_buffer.max(1));
        let sink = ChunkSink {
            chat_id: request.id,
            sender,
            transcript: Arc::clone(&self.transcript),
            emitted: 0,
        };

        let this = self.clone();
        tokio::spawn(async move { this.run(request, sink).await });

        ChunkStream::new(receiver)
    }

    /// Run a chat to completion and concatenate its content chunks.
    pub async fn chat_sync(&self, query: impl Into<String>, options: ChatOptions) -> String {
        self.chat(query, options).collect_text().await
    }

    async fn run(self, request: ChatRequest, mut sink: ChunkSink) {
        info!(
            "Chat {} started: primary={}, verbosity={}, voting={}",
            request.id, request.backend, request.verbosity, request.voting
        );
        self.transcript.log(TranscriptEvent::new(
            "chat_started",
            request.id,
            json!({
                "query": request.query,
                "backend": request.backend,
                "verbosity": request.verbosity,
                "voting": request.voting,
            }),
        ));

        let outcome = if self.primary_phase(&request, &mut sink).await {
            self.consensus_phase(&request, &mut sink).await
        } else {
            ConsensusOutcome::Abandoned
        };

        let status = match outcome {
            ConsensusOutcome::Completed => "completed",
            ConsensusOutcome::Abandoned => "abandoned",
            ConsensusOutcome::Failed(failure) => {
                warn!(
                    "Chat {} consensus failed, falling back to {}: {}",
                    request.id, request.backend, failure
                );
                self.fallback(&request, &mut sink).await;
                "fallback"
            }
        };

        info!("Chat {} {} after {} chunks", request.id, status, sink.emitted);
        self.transcript.log(TranscriptEvent::new(
            "chat_finished",
            request.id,
            json!({ "status": status, "chunks": sink.emitted }),
        ));
    }

    /// Emit the primary chunk; returns `false` if the caller is gone.
    async fn primary_phase(&self, request: &ChatRequest, sink: &mut ChunkSink) -> bool {
        let text = match self
            .generate(&request.backend, &request.query, request.verbosity)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("Chat {} primary call failed: {}", request.id, e);
                format!("{}{}", PRIMARY_FALLBACK_PREFIX, e)
            }
        };
        sink.emit(Chunk::content(request.backend.clone(), Phase::Primary, text))
            .await
    }

    async fn consensus_phase(&self, request: &ChatRequest, sink: &mut ChunkSink) -> ConsensusOutcome {
        match &self.mode {
            EngineMode::Delegated(engine) => self.delegated(engine.as_ref(), request, sink).await,
            EngineMode::Standalone(backends) if self.config.parallel_consensus => {
                self.standalone_parallel(backends, request, sink).await
            }
            EngineMode::Standalone(backends) => self.standalone(backends, request, sink).await,
        }
    }

    async fn delegated(
        &self,
        engine: &dyn ConsensusEngine,
        request: &ChatRequest,
        sink: &mut ChunkSink,
    ) -> ConsensusOutcome {
        let timeout = self.config.request_timeout;
        let engine_request = EngineRequest {
            query: request.query.clone(),
            verbosity: request.verbosity,
            voting_enabled: request.voting,
            primary: request.backend.clone(),
        };

        debug!("Chat {} delegating consensus to {}", request.id, engine.name());
        let mut stream = match tokio::time::timeout(timeout, engine.open(&engine_request)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return ConsensusOutcome::Failed(e.into()),
            Err(_) => {
                return ConsensusOutcome::Failed(
                    EngineError::Unavailable(format!("{} did not answer", engine.name())).into(),
                );
            }
        };

        loop {
            let item = match tokio::time::timeout(timeout, stream.next()).await {
                Ok(Some(item)) => item,
                Ok(None) => return ConsensusOutcome::Completed,
                Err(_) => {
                    return ConsensusOutcome::Failed(
                        EngineError::StreamFailed(format!(
                            "no chunk within {}ms",
                            timeout.as_millis()
                        ))
                        .into(),
                    );
                }
            };

            match item {
                Ok(foreign) => {
                    let chunk = normalize(foreign.as_ref());
                    if !sink.emit(chunk).await {
                        return ConsensusOutcome::Abandoned;
                    }
                }
                Err(e) => return ConsensusOutcome::Failed(e.into()),
            }
        }
    }

    async fn standalone(
        &self,
        backends: &[Backend],
        request: &ChatRequest,
        sink: &mut ChunkSink,
    ) -> ConsensusOutcome {
        for backend in backends {
            let result = self
                .generate(backend, &request.query, request.verbosity)
                .await;
            match self.emit_consensus(backend, result, request, sink).await {
                ConsensusOutcome::Completed => continue,
                other => return other,
            }
        }
        ConsensusOutcome::Completed
    }

    /// Same as [`standalone`](Self::standalone) with all calls in flight at
    /// once; results are buffered and emitted in configuration order.
    async fn standalone_parallel(
        &self,
        backends: &[Backend],
        request: &ChatRequest,
        sink: &mut ChunkSink,
    ) -> ConsensusOutcome {
        let mut join_set = JoinSet::new();
        for (index, backend) in backends.iter().enumerate() {
            let this = self.clone();
            let backend = backend.clone();
            let query = request.query.clone();
            let verbosity = request.verbosity;
            join_set.spawn(async move {
                let result = this.generate(&backend, &query, verbosity).await;
                (index, result)
            });
        }

        let mut pending: Vec<Option<Result<String, BackendError>>> = vec![None; backends.len()];
        let mut next = 0;

        while let Some(joined) = join_set.join_next().await {
            let (index, result) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    join_set.detach_all();
                    return ConsensusOutcome::Failed(ConsensusFailure::Task(e.to_string()));
                }
            };
            pending[index] = Some(result);

            while next < backends.len() {
                let Some(result) = pending[next].take() else {
                    break;
                };
                match self.emit_consensus(&backends[next], result, request, sink).await {
                    ConsensusOutcome::Completed => next += 1,
                    other => {
                        // let in-flight calls finish; their results are discarded
                        join_set.detach_all();
                        return other;
                    }
                }
            }
        }

        ConsensusOutcome::Completed
    }

    /// Emit one backend's consensus answer and, if voting, its vote.
    async fn emit_consensus(
        &self,
        backend: &Backend,
        result: Result<String, BackendError>,
        request: &ChatRequest,
        sink: &mut ChunkSink,
    ) -> ConsensusOutcome {
        let text = match result {
            Ok(text) => text,
            Err(e) => return ConsensusOutcome::Failed(e.into()),
        };
        debug!("Chat {} consensus answer from {}", request.id, backend);

        if !sink
            .emit(Chunk::content(backend.clone(), Phase::Consensus, text))
            .await
        {
            return ConsensusOutcome::Abandoned;
        }
        if request.voting && !sink.emit(Chunk::vote(backend, CONSENSUS_VOTE_SCORE)).await {
            return ConsensusOutcome::Abandoned;
        }
        ConsensusOutcome::Completed
    }

    /// Degraded ending: one direct answer through the primary backend.
    async fn fallback(&self, request: &ChatRequest, sink: &mut ChunkSink) {
        let (text, score) = match self
            .generate(&request.backend, &request.query, request.verbosity)
            .await
        {
            Ok(text) => (text, CONSENSUS_VOTE_SCORE),
            Err(e) => {
                warn!("Chat {} fallback call failed: {}", request.id, e);
                (format!("{}{}", PRIMARY_FALLBACK_PREFIX, e), 0.0)
            }
        };

        if !sink
            .emit(Chunk::content(request.backend.clone(), Phase::Fallback, text))
            .await
        {
            return;
        }
        if request.voting {
            sink.emit(Chunk::vote(&request.backend, score)).await;
        }
    }
}
