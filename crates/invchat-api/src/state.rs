//! Application state shared across all route handlers.
//!
//! AppState is passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use invchat_chat::ChatOrchestrator;
use invchat_core::config::ChatConfig;

/// Shared application state.
///
/// Cloned into every handler task; the orchestrator sits behind an `Arc`.
/// The session store lives inside the orchestrator.
#[derive(Clone)]
pub struct AppState {
    /// Chat orchestrator (matcher + sessions + completion client).
    pub orchestrator: Arc<ChatOrchestrator>,
    /// Request limits for the chat endpoint.
    pub chat: ChatConfig,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(orchestrator: ChatOrchestrator, chat: ChatConfig) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            chat,
            start_time: Instant::now(),
        }
    }
}
