//! Error types for the board API server.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//!
//! | Failure | Status |
//! |---------|--------|
//! | absent or irregular grid, board too small, bad `steps`/`maxIterations` | 400 |
//! | malformed id, query string, or JSON body | 400 |
//! | unknown board id | 404 |
//! | no fixed point within `maxIterations` | 500 |
//! | storage failure or a failed blocking task | 500 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use conway_core::{ErrorKind, ServiceError};
use conway_types::GridError;

/// Errors that can occur in the board API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The board service rejected or failed the request.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A board id could not be parsed from the request path.
    #[error("invalid board id: {0}")]
    InvalidUuid(String),

    /// A query parameter was missing its expected type.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The request body was not the expected JSON.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The blocking task running the service call panicked or was cancelled.
    #[error("board task failed: {0}")]
    Task(String),
}

impl From<GridError> for ApiError {
    fn from(err: GridError) -> Self {
        Self::Service(ServiceError::Grid(err))
    }
}

impl ApiError {
    /// The HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Service(err) => match err.kind() {
                ErrorKind::Input | ErrorKind::Shape | ErrorKind::Validation | ErrorKind::Range => {
                    StatusCode::BAD_REQUEST
                }
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::NotConverged | ErrorKind::Internal => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::InvalidUuid(_) | Self::InvalidQuery(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "request rejected");
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
