use std::sync::Arc;

use crate::application::services::ShortenerService;

/// Shared state injected into every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
}

impl AppState {
    pub fn new(shortener: Arc<ShortenerService>) -> Self {
        Self { shortener }
    }
}
