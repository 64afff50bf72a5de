//! Axum router construction for the board API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for cross-origin clients.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the board server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `POST /api/boards` -- upload a board
/// - `GET /api/boards/{id}` -- current board
/// - `GET /api/boards/{id}/next` -- next generation
/// - `GET /api/boards/{id}/states` -- state after `steps` generations
/// - `GET /api/boards/{id}/final` -- fixed point within `maxIterations`
///
/// CORS allows any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Boards
        .route("/api/boards", post(handlers::upload_board))
        .route("/api/boards/{id}", get(handlers::get_board))
        .route("/api/boards/{id}/next", get(handlers::next_state))
        .route("/api/boards/{id}/states", get(handlers::states_after))
        .route("/api/boards/{id}/final", get(handlers::final_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
