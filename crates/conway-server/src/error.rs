//! Error types for the board server binary.
//!
//! [`AppError`] is the top-level error type that wraps all possible
//! failure modes during startup, serving, and shutdown.

/// Top-level error for the board server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: conway_core::ConfigError,
    },

    /// The snapshot store could not be opened.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: conway_core::StoreError,
    },

    /// Flushing boards at shutdown failed.
    #[error("persist error: {source}")]
    Persist {
        /// The underlying service error.
        #[from]
        source: conway_core::ServiceError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: conway_observer::ServerError,
    },
}
