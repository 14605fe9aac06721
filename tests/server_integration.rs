//! Integration tests for the HTTP surface.
//!
//! Requests are driven through the router in-process with
//! `tower::ServiceExt::oneshot`; the remote file server is a wiremock server.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use charfetch_core::{AppState, OffsetMode, build_router};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::{mount_files, test_config, test_pipeline};

fn test_router(temp_dir: &TempDir) -> Router {
    let pipeline = test_pipeline(test_config(temp_dir.path(), OffsetMode::Chunk));
    build_router(AppState::new(pipeline))
}

fn files_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/files")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request should build")
}

fn lookup_body(server: &MockServer, lookup: &str) -> String {
    json!({
        "remote_file_server_url": server.uri(),
        "lookup_character": lookup,
    })
    .to_string()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router should respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn path_string(temp_dir: &TempDir, name: &str) -> String {
    temp_dir.path().join(name).to_string_lossy().into_owned()
}

#[tokio::test]
async fn test_post_files_returns_sorted_downloaded_paths() {
    let mock_server = MockServer::start().await;
    mount_files(
        &mock_server,
        &[("c.txt", "...z"), ("b.txt", "none"), ("a.txt", "abcz")],
    )
    .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let (status, body) = send(
        test_router(&temp_dir),
        files_request(lookup_body(&mock_server, "z")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([path_string(&temp_dir, "a.txt"), path_string(&temp_dir, "c.txt")])
    );
}

#[tokio::test]
async fn test_post_files_no_match_returns_empty_array() {
    let mock_server = MockServer::start().await;
    mount_files(&mock_server, &[("a.txt", "aaa")]).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let (status, body) = send(
        test_router(&temp_dir),
        files_request(lookup_body(&mock_server, "z")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_post_files_malformed_json_is_400() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let (status, body) = send(
        test_router(&temp_dir),
        files_request("{\"remote_file_server_url\": ".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "DECODE_ERROR");
}

#[tokio::test]
async fn test_post_files_missing_field_is_400() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let (status, body) = send(
        test_router(&temp_dir),
        files_request(json!({"lookup_character": "z"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "DECODE_ERROR");
}

#[tokio::test]
async fn test_post_files_invalid_lookup_is_400() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let (status, body) = send(
        test_router(&temp_dir),
        files_request(lookup_body(&mock_server, "zz")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_post_files_listing_failure_is_502_and_server_keeps_serving() {
    let failing = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&failing)
        .await;
    let healthy = MockServer::start().await;
    mount_files(&healthy, &[("a.txt", "z")]).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let app = test_router(&temp_dir);

    let (status, body) = send(app.clone(), files_request(lookup_body(&failing, "z"))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "REMOTE_UNAVAILABLE");
    assert!(body["error"]["message"].as_str().unwrap().contains("500"));

    let (status, body) = send(app, files_request(lookup_body(&healthy, "z"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([path_string(&temp_dir, "a.txt")]));
}

#[tokio::test]
async fn test_post_files_task_failure_reports_downloaded_files() {
    let mock_server = MockServer::start().await;
    mount_files(&mock_server, &[("ok.txt", "z")]).await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<a href=\"ok.txt\">ok.txt</a><a href=\"gone.txt\">gone.txt</a>",
        ))
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let (status, body) = send(
        test_router(&temp_dir),
        files_request(lookup_body(&mock_server, "z")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "TASK_FAILURES");
    assert!(body["error"]["message"].as_str().unwrap().contains("gone.txt"));
    assert_eq!(
        body["error"]["downloaded"],
        json!([path_string(&temp_dir, "ok.txt")])
    );
}

#[tokio::test]
async fn test_concurrent_requests_do_not_share_state() {
    let first = MockServer::start().await;
    mount_files(&first, &[("x1.txt", "q"), ("x2.txt", ".q")]).await;
    let second = MockServer::start().await;
    mount_files(&second, &[("y1.txt", "..q"), ("y2.txt", "...q")]).await;

    let first_dir = TempDir::new().expect("failed to create temp dir");
    let second_dir = TempDir::new().expect("failed to create temp dir");
    let app = test_router(&first_dir);
    let other_app = test_router(&second_dir);

    let (a, b) = tokio::join!(
        send(app.clone(), files_request(lookup_body(&first, "q"))),
        send(other_app, files_request(lookup_body(&second, "q"))),
    );
    assert_eq!(a, (StatusCode::OK, json!([path_string(&first_dir, "x1.txt")])));
    assert_eq!(b, (StatusCode::OK, json!([path_string(&second_dir, "y1.txt")])));

    // Two requests through the same router at once
    let (a, b) = tokio::join!(
        send(app.clone(), files_request(lookup_body(&first, "q"))),
        send(app, files_request(lookup_body(&second, "q"))),
    );
    assert_eq!(a, (StatusCode::OK, json!([path_string(&first_dir, "x1.txt")])));
    assert_eq!(b, (StatusCode::OK, json!([path_string(&first_dir, "y1.txt")])));
}

#[tokio::test]
async fn test_health() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request should build");

    let (status, body) = send(test_router(&temp_dir), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_get_files_not_allowed() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let request = Request::builder()
        .uri("/files")
        .body(Body::empty())
        .expect("request should build");

    let (status, _) = send(test_router(&temp_dir), request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
