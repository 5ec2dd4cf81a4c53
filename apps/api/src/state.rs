use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::content::ContentService;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres in production; swapped for an in-memory store in tests.
    pub store: Arc<dyn Store>,
    /// Explicitly constructed content service; holds the optional LLM backend.
    pub content: ContentService,
    pub tokens: TokenKeys,
}
