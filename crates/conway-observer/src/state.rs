//! Shared application state for the board API server.

use std::sync::Arc;

use conway_core::BoardService;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// service owns the board store; handlers never touch the store directly.
#[derive(Clone)]
pub struct AppState {
    /// The board service all handlers delegate to.
    pub service: Arc<BoardService>,
}

impl AppState {
    /// Create application state around an existing service.
    pub const fn new(service: Arc<BoardService>) -> Self {
        Self { service }
    }
}
