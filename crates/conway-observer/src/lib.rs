//! Board API server for the Conway board service.
//!
//! This crate provides an Axum HTTP server that exposes the
//! [`BoardService`] operations:
//!
//! - **Upload** (`POST /api/boards`) of a row-major boolean matrix
//! - **Simulation** endpoints for the next state, the state after `N`
//!   steps, and the final (fixed-point) state
//! - **Read-only** access to a stored board
//! - **Minimal HTML page** (`GET /`) with the board count and endpoint list
//!
//! # Architecture
//!
//! Handlers translate HTTP into [`BoardService`] calls and service errors
//! back into status codes ([`ApiError`]). The service and its store are
//! shared across requests through [`AppState`]; the engine work itself is
//! synchronous and runs on the request task.
//!
//! [`BoardService`]: conway_core::BoardService
//! [`ApiError`]: error::ApiError

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, shutdown_signal, start_server};
pub use state::AppState;
