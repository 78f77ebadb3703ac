//! HTTP API
//!
//! - `GET /chat/stream`: chunked plain-text chat stream
//! - `POST /chat/sync`: complete answer as JSON
//! - `GET /health`: liveness probe

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{StreamQuery, SyncRequest, SyncResponse};

use axum::Router;
use axum::routing::{get, post};
use quorum_desk_application::ChatOrchestrator;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state of every route
#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: ChatOrchestrator,
    pub service: &'static str,
}

impl ApiState {
    pub fn new(orchestrator: ChatOrchestrator) -> Self {
        Self {
            orchestrator,
            service: "quorum-desk",
        }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/chat/stream", get(handlers::chat_stream))
        .route("/chat/sync", post(handlers::chat_sync))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API on `bind` until Ctrl-C.
pub async fn serve(orchestrator: ChatOrchestrator, bind: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(ApiState::new(orchestrator)))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
}
