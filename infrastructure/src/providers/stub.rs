//! Deterministic offline client

use async_trait::async_trait;
use quorum_desk_application::ports::model_client::{BackendError, ModelClient};
use quorum_desk_domain::core::string::char_prefix;
use quorum_desk_domain::{Backend, Verbosity};

/// Characters of the prompt echoed back by the stub
pub const STUB_PROMPT_CHARS: usize = 200;

/// Client that answers locally with `"[<backend>|<verbosity>] <prompt prefix>"`.
///
/// Never fails; used for development, demos and tests.
#[derive(Debug, Clone)]
pub struct StubModelClient {
    backend: Backend,
}

impl StubModelClient {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ModelClient for StubModelClient {
    fn backend(&self) -> &Backend {
        &self.backend
    }

    async fn generate(&self, prompt: &str, verbosity: Verbosity) -> Result<String, BackendError> {
        Ok(format!(
            "[{}|{}] {}",
            self.backend,
            verbosity,
            char_prefix(prompt, STUB_PROMPT_CHARS)
        ))
    }
}
