use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; nothing here is written per request.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Default: `GeminiClient`.
    pub llm: Arc<dyn CompletionClient>,
    pub config: Arc<Config>,
}
