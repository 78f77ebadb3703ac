//! Per-call chat options

use quorum_desk_domain::{Backend, TaskType, Verbosity};

/// Options for one [`chat`](super::ChatOrchestrator::chat) call.
///
/// Unset fields fall back to the orchestrator's defaults.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Backend for the primary phase; overrides task-type routing.
    pub backend_hint: Option<Backend>,
    pub verbosity: Option<Verbosity>,
    pub task_type: TaskType,
    pub voting_enabled: Option<bool>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend_hint = Some(backend);
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = Some(verbosity);
        self
    }

    pub fn with_task_type(mut self, task_type: impl Into<TaskType>) -> Self {
        self.task_type = task_type.into();
        self
    }

    pub fn with_voting(mut self, enabled: bool) -> Self {
        self.voting_enabled = Some(enabled);
        self
    }
}
