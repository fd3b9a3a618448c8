use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Record persistence. Postgres when `DATABASE_URL` is set, otherwise
    /// the in-memory store.
    pub store: Arc<dyn ResumeStore>,
    /// Present only when `ANTHROPIC_API_KEY` is configured; its absence
    /// disables the one-click generation endpoint and nothing else.
    pub llm: Option<LlmClient>,
    pub config: Config,
}
