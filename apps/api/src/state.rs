use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::generation::pipeline::GenerationPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<GenerationPipeline>,
    /// Resolves bearer tokens for `auth::require_auth`.
    pub tokens: Arc<dyn TokenVerifier>,
}
