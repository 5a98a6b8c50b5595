//! HTTP endpoint tests using axum-test

use std::future::IntoFuture;
use std::path::Path;
use std::time::Duration;

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use omr_sheet::{FontRegistry, SheetLayout};
use tempfile::TempDir;

use crate::app;
use crate::artifact::ScratchDir;
use crate::state::AppState;

/// Create a test server without a Bengali font, writing into a fresh
/// scratch directory
fn create_test_server() -> (TestServer, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let server = server_with_scratch(dir.path());
    (server, dir)
}

fn server_with_scratch(root: &Path) -> TestServer {
    let state = AppState::new(
        FontRegistry::new(),
        SheetLayout::default(),
        ScratchDir::new(root, true),
    );
    TestServer::new(app(state)).unwrap()
}

async fn scratch_is_empty(root: &Path) -> bool {
    for _ in 0..50 {
        if std::fs::read_dir(root).unwrap().next().is_none() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn test_health_reports_font_capability() {
    let (server, _dir) = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "omr-server");
    assert_eq!(json["bangla_font"], false);
}

#[tokio::test]
async fn test_generate_returns_pdf_attachment() {
    let (server, _dir) = create_test_server();
    let response = server
        .get("/generate-omr")
        .add_query_param("institute_name", "Green Model School")
        .add_query_param("total_questions", 40)
        .add_query_param("options_per_question", 4)
        .await;

    response.assert_status_ok();
    assert_eq!(response.header(header::CONTENT_TYPE), "application/pdf");
    let disposition = response.header(header::CONTENT_DISPOSITION);
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("omr_sheet.pdf"));
    assert!(response.as_bytes().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_bangla_without_font_still_succeeds() {
    let (server, _dir) = create_test_server();
    let response = server
        .get("/generate-omr")
        .add_query_param("institute_name", "Green Model School")
        .add_query_param("total_questions", 25)
        .add_query_param("options_per_question", 6)
        .add_query_param("use_bangla", true)
        .await;

    response.assert_status_ok();
    assert!(response.as_bytes().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_zero_questions_rejected() {
    let (server, dir) = create_test_server();
    let response = server
        .get("/generate-omr")
        .add_query_param("institute_name", "School")
        .add_query_param("total_questions", 0)
        .add_query_param("options_per_question", 4)
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["detail"][0]["loc"][0], "query");
    assert_eq!(json["detail"][0]["loc"][1], "total_questions");

    // Nothing was rendered
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_negative_questions_rejected() {
    let (server, _dir) = create_test_server();
    let response = server
        .get("/generate-omr")
        .add_query_param("institute_name", "School")
        .add_query_param("total_questions", -3)
        .add_query_param("options_per_question", 4)
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_options_outside_range_rejected() {
    let (server, _dir) = create_test_server();
    for options in [1, 7] {
        let response = server
            .get("/generate-omr")
            .add_query_param("institute_name", "School")
            .add_query_param("total_questions", 10)
            .add_query_param("options_per_question", options)
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["detail"][0]["loc"][1], "options_per_question");
    }
}

#[tokio::test]
async fn test_duplicated_parameter_is_unprocessable() {
    let (server, dir) = create_test_server();
    let response = server
        .get(
            "/generate-omr?institute_name=S&total_questions=4&total_questions=5\
             &options_per_question=4",
        )
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["detail"][0]["loc"], serde_json::json!(["query"]));
    assert_eq!(json["detail"][0]["type"], "query_parse_error");
    assert!(!response.text().contains("duplicate field"));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_missing_parameters_listed() {
    let (server, _dir) = create_test_server();
    let response = server
        .get("/generate-omr")
        .add_query_param("total_questions", 10)
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let json = response.json::<serde_json::Value>();
    let fields: Vec<_> = json["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["loc"][1].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, ["institute_name", "options_per_question"]);
}

#[tokio::test]
async fn test_temporary_file_removed_after_response() {
    let (server, dir) = create_test_server();
    let response = server
        .get("/generate-omr")
        .add_query_param("institute_name", "School")
        .add_query_param("total_questions", 12)
        .add_query_param("options_per_question", 5)
        .await;

    response.assert_status_ok();
    assert!(scratch_is_empty(dir.path()).await);
}

#[tokio::test]
async fn test_concurrent_requests_do_not_collide() {
    let (server, dir) = create_test_server();
    let first = server
        .get("/generate-omr")
        .add_query_param("institute_name", "First School")
        .add_query_param("total_questions", 8)
        .add_query_param("options_per_question", 2);
    let second = server
        .get("/generate-omr")
        .add_query_param("institute_name", "Second School")
        .add_query_param("total_questions", 200)
        .add_query_param("options_per_question", 6);

    let (first, second) = tokio::join!(first.into_future(), second.into_future());

    first.assert_status_ok();
    second.assert_status_ok();
    assert!(first.as_bytes().starts_with(b"%PDF"));
    assert!(second.as_bytes().starts_with(b"%PDF"));
    assert_ne!(first.as_bytes(), second.as_bytes());
    assert!(scratch_is_empty(dir.path()).await);
}

#[tokio::test]
async fn test_render_failure_is_generic_500() {
    let dir = tempfile::tempdir().unwrap();
    // Scratch directory never created, so writing the sheet fails
    let server = server_with_scratch(&dir.path().join("missing"));

    let response = server
        .get("/generate-omr")
        .add_query_param("institute_name", "School")
        .add_query_param("total_questions", 10)
        .add_query_param("options_per_question", 4)
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["detail"], "PDF generation failed");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (server, _dir) = create_test_server();
    let response = server
        .get("/health")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("https://example.com"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
}
