//! REST API endpoint handlers for the board API server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `POST` | `/api/boards` | Upload a board, returns its id |
//! | `GET` | `/api/boards/{id}` | Current board without advancing |
//! | `GET` | `/api/boards/{id}/next` | Advance one generation |
//! | `GET` | `/api/boards/{id}/states?steps=N` | Advance `N` generations |
//! | `GET` | `/api/boards/{id}/final?maxIterations=N` | Advance to a fixed point |
//!
//! Service calls that simulate or may write the snapshot file run on
//! tokio's blocking pool, so a long simulation never holds an executor
//! worker.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use conway_core::{BoardService, ServiceError};
use conway_types::{BoardCreated, BoardId, BoardStateDto, BoardView, Grid};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/boards/{id}/states`.
#[derive(Debug, serde::Deserialize)]
pub struct StepsQuery {
    /// Generations to advance. Absent means zero.
    pub steps: Option<i64>,
}

/// Query parameters for `GET /api/boards/{id}/final`.
#[derive(Debug, serde::Deserialize)]
pub struct FinalQuery {
    /// Iteration budget. Absent is treated as zero and rejected.
    #[serde(rename = "maxIterations")]
    pub max_iterations: Option<i64>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the board count and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let boards = state
        .service
        .board_count()
        .map_or_else(|_| String::from("?"), |count| count.to_string());
    let limits = state.service.limits();
    let min_rows = limits.min_rows;
    let min_cols = limits.min_cols;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Conway Boards</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        code {{ color: #7ee787; }}
    </style>
</head>
<body>
    <h1>Conway Boards</h1>
    <p class="subtitle">Game of Life simulation service</p>

    <div>
        <div class="metric">
            <div class="label">Boards</div>
            <div class="value">{boards}</div>
        </div>
        <div class="metric">
            <div class="label">Minimum size</div>
            <div class="value">{min_rows}x{min_cols}</div>
        </div>
    </div>

    <h2>API Endpoints</h2>
    <ul>
        <li><code>POST /api/boards</code> -- Upload <code>{{"board": [[bool]]}}</code></li>
        <li><code>GET /api/boards/{{id}}</code> -- Current board</li>
        <li><code>GET /api/boards/{{id}}/next</code> -- Next generation</li>
        <li><code>GET /api/boards/{{id}}/states?steps=N</code> -- State after N generations</li>
        <li><code>GET /api/boards/{{id}}/final?maxIterations=N</code> -- First fixed point within N iterations</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// POST /api/boards -- upload
// ---------------------------------------------------------------------------

/// Upload a new board and return its id.
pub async fn upload_board(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BoardStateDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let grid = Grid::from_wire(request.board)?;
    let id = run_blocking(&state, move |service| service.upload(grid)).await?;

    info!(board_id = %id, "Board uploaded");
    Ok(Json(BoardCreated { id }))
}

// ---------------------------------------------------------------------------
// GET /api/boards/{id} -- current board
// ---------------------------------------------------------------------------

/// Return a stored board without advancing it.
pub async fn get_board(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_board_id(&id)?;
    let board = state.service.board(id)?;
    Ok(Json(BoardView::from(&board)))
}

// ---------------------------------------------------------------------------
// GET /api/boards/{id}/next -- one generation
// ---------------------------------------------------------------------------

/// Advance a board one generation and return the new state.
pub async fn next_state(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_board_id(&id)?;
    let grid = run_blocking(&state, move |service| service.next(id)).await?;

    info!(board_id = %id, "Next state computed");
    Ok(Json(BoardStateDto::from(&grid)))
}

// ---------------------------------------------------------------------------
// GET /api/boards/{id}/states?steps=N -- N generations
// ---------------------------------------------------------------------------

/// Advance a board `steps` generations and return the new state.
pub async fn states_after(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: Result<Query<StepsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_board_id(&id)?;
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let steps = query.steps.unwrap_or(0);
    let grid = run_blocking(&state, move |service| service.after_steps(id, steps)).await?;

    info!(board_id = %id, steps, "State after steps computed");
    Ok(Json(BoardStateDto::from(&grid)))
}

// ---------------------------------------------------------------------------
// GET /api/boards/{id}/final?maxIterations=N -- fixed point
// ---------------------------------------------------------------------------

/// Advance a board until it stops changing, within `maxIterations`.
pub async fn final_state(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: Result<Query<FinalQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_board_id(&id)?;
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let max_iterations = query.max_iterations.unwrap_or(0);
    let grid = run_blocking(&state, move |service| {
        service.final_state(id, max_iterations)
    })
    .await?;

    info!(board_id = %id, max_iterations, "Final state computed");
    Ok(Json(BoardStateDto::from(&grid)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a path segment into a [`BoardId`].
fn parse_board_id(raw: &str) -> Result<BoardId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::InvalidUuid(format!("{raw}: {e}")))
}

/// Run a service call on the blocking thread pool.
async fn run_blocking<T, F>(state: &AppState, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&BoardService) -> Result<T, ServiceError> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(|e| ApiError::Task(e.to_string()))?
        .map_err(ApiError::from)
}
