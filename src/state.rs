use std::sync::Arc;

use crate::application::services::RetrievalService;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub retrieval: Arc<RetrievalService>,
    /// Whether the curated photo API has a key; reported by `/health`.
    pub curated_configured: bool,
}

impl AppState {
    pub fn new(retrieval: Arc<RetrievalService>, curated_configured: bool) -> Self {
        Self {
            retrieval,
            curated_configured,
        }
    }
}
