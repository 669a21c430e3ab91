//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::Mediator;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Dispatcher for every command and query
    pub mediator: Mediator,
}

impl AppState {
    /// Create a new application state around the given repository.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            mediator: Mediator::new(repository),
        }
    }
}
