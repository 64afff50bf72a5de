//! Integration tests for the board API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use conway_core::{BoardLimits, BoardService, MemoryBoardStore, NoopLog};
use conway_observer::router::build_router;
use conway_observer::state::AppState;
use conway_types::BoardId;
use serde_json::{Value, json};
use tower::ServiceExt;

fn make_test_state() -> Arc<AppState> {
    let service = BoardService::new(
        Arc::new(MemoryBoardStore::new(Arc::new(NoopLog))),
        BoardLimits::default(),
        Arc::new(NoopLog),
    );
    Arc::new(AppState::new(Arc::new(service)))
}

// =========================================================================
// Helpers
// =========================================================================

async fn body_to_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(router: &Router, path: &str) -> Response {
    router
        .clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(router: &Router, path: &str, body: &Value) -> Response {
    router
        .clone()
        .oneshot(
            Request::post(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Upload `board` and return the assigned id.
async fn upload(router: &Router, board: Value) -> String {
    let response = post_json(router, "/api/boards", &json!({ "board": board })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    json["id"].as_str().unwrap().to_owned()
}

fn block() -> Value {
    json!([
        [false, false, false, false],
        [false, true, true, false],
        [false, true, true, false],
        [false, false, false, false]
    ])
}

fn horizontal_blinker() -> Value {
    json!([
        [false, false, false, false, false],
        [false, false, false, false, false],
        [false, true, true, true, false],
        [false, false, false, false, false],
        [false, false, false, false, false]
    ])
}

fn vertical_blinker() -> Value {
    json!([
        [false, false, false, false, false],
        [false, false, true, false, false],
        [false, false, true, false, false],
        [false, false, true, false, false],
        [false, false, false, false, false]
    ])
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let router = build_router(make_test_state());
    let response = get(&router, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_upload_returns_id() {
    let router = build_router(make_test_state());
    let id = upload(&router, block()).await;
    assert!(id.parse::<BoardId>().is_ok());
}

#[tokio::test]
async fn test_get_board_returns_view() {
    let router = build_router(make_test_state());
    let id = upload(&router, block()).await;

    let response = get(&router, &format!("/api/boards/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["board"], block());
    assert_eq!(json["rows"], 4);
    assert_eq!(json["cols"], 4);
    assert_eq!(json["live_cells"], 4);
    assert_eq!(json["generation"], 0);
}

#[tokio::test]
async fn test_upload_missing_board_is_bad_request() {
    let router = build_router(make_test_state());
    let response = post_json(&router, "/api/boards", &json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(&router, "/api/boards", &json!({ "board": null })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_irregular_board_is_bad_request() {
    let router = build_router(make_test_state());
    let board = json!([[true, false, true], [true, false], [false, false, false]]);
    let response = post_json(&router, "/api/boards", &json!({ "board": board })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_upload_small_board_is_bad_request() {
    let router = build_router(make_test_state());
    let board = json!([[true, true], [true, true]]);
    let response = post_json(&router, "/api/boards", &json!({ "board": board })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_malformed_json_is_bad_request() {
    let router = build_router(make_test_state());
    let response = router
        .clone()
        .oneshot(
            Request::post("/api/boards")
                .header("content-type", "application/json")
                .body(Body::from("{\"board\": [[tru"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_next_state_advances_board() {
    let router = build_router(make_test_state());
    let id = upload(&router, horizontal_blinker()).await;

    let response = get(&router, &format!("/api/boards/{id}/next")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response).await["board"], vertical_blinker());

    let response = get(&router, &format!("/api/boards/{id}/next")).await;
    assert_eq!(body_to_json(response).await["board"], horizontal_blinker());
}

#[tokio::test]
async fn test_next_state_unknown_board_is_not_found() {
    let router = build_router(make_test_state());
    let response = get(
        &router,
        "/api/boards/0192f0e4-7a1c-7d3e-9a4b-1c2d3e4f5a6b/next",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let router = build_router(make_test_state());
    let response = get(&router, "/api/boards/not-a-uuid/next").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_states_after_steps() {
    let router = build_router(make_test_state());
    let id = upload(&router, horizontal_blinker()).await;

    let response = get(&router, &format!("/api/boards/{id}/states?steps=3")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response).await["board"], vertical_blinker());

    let response = get(&router, &format!("/api/boards/{id}")).await;
    assert_eq!(body_to_json(response).await["generation"], 3);
}

#[tokio::test]
async fn test_states_without_steps_returns_current() {
    let router = build_router(make_test_state());
    let id = upload(&router, horizontal_blinker()).await;

    let response = get(&router, &format!("/api/boards/{id}/states")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response).await["board"], horizontal_blinker());
}

#[tokio::test]
async fn test_states_negative_steps_is_bad_request() {
    let router = build_router(make_test_state());
    let id = upload(&router, block()).await;

    let response = get(&router, &format!("/api/boards/{id}/states?steps=-1")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_states_non_numeric_steps_is_bad_request() {
    let router = build_router(make_test_state());
    let id = upload(&router, block()).await;

    let response = get(&router, &format!("/api/boards/{id}/states?steps=many")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_final_state_of_still_life() {
    let router = build_router(make_test_state());
    let id = upload(&router, block()).await;

    let response = get(&router, &format!("/api/boards/{id}/final?maxIterations=10")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response).await["board"], block());
}

#[tokio::test]
async fn test_final_state_of_oscillator_is_server_error() {
    let router = build_router(make_test_state());
    let id = upload(&router, horizontal_blinker()).await;

    let response = get(&router, &format!("/api/boards/{id}/final?maxIterations=10")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_to_json(response).await;
    assert_eq!(json["status"], 500);

    let response = get(&router, &format!("/api/boards/{id}")).await;
    let json = body_to_json(response).await;
    assert_eq!(json["board"], horizontal_blinker());
    assert_eq!(json["generation"], 0);
}

#[tokio::test]
async fn test_final_state_requires_positive_budget() {
    let router = build_router(make_test_state());
    let id = upload(&router, block()).await;

    for path in [
        format!("/api/boards/{id}/final"),
        format!("/api/boards/{id}/final?maxIterations=0"),
        format!("/api/boards/{id}/final?maxIterations=-4"),
    ] {
        let response = get(&router, &path).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
    }
}

#[tokio::test]
async fn test_final_state_unknown_board_is_not_found() {
    let router = build_router(make_test_state());
    let response = get(
        &router,
        "/api/boards/0192f0e4-7a1c-7d3e-9a4b-1c2d3e4f5a6b/final?maxIterations=5",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_long_simulation_does_not_starve_other_requests() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async {
        let router = build_router(make_test_state());
        let id = upload(&router, json!(vec![vec![true; 64]; 64])).await;

        let long_router = router.clone();
        let path = format!("/api/boards/{id}/states?steps={}", i64::MAX);
        let _long = tokio::spawn(async move { get(&long_router, &path).await });
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;

        let index = tokio::spawn(async move { get(&router, "/").await.status() });
        let status = tokio::time::timeout(std::time::Duration::from_secs(5), index)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(status, StatusCode::OK);
    });

    // The simulation is still running on the blocking pool; do not wait for it.
    runtime.shutdown_background();
}
