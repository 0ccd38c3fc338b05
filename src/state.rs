// src/state.rs

use std::sync::Arc;

use crate::llm::CompletionBackend;
use crate::routing::ConversationRouter;

/// Shared state for the HTTP handlers. The server holds no conversation
/// history; the full transcript arrives with every request.
pub struct AppState {
    pub router: ConversationRouter,
    pub backend: Arc<dyn CompletionBackend>,
}

pub fn create_app_state(backend: Arc<dyn CompletionBackend>) -> AppState {
    AppState {
        router: ConversationRouter::new(),
        backend,
    }
}
