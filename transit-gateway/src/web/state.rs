//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedSlClient;

/// Shared application state.
///
/// Built once in `main` (or per test) and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// SL client with the station lookup cache
    pub sl: Arc<CachedSlClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(sl: CachedSlClient) -> Self {
        Self { sl: Arc::new(sl) }
    }
}
