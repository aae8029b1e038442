#![cfg(feature = "web")]
//! Web handler integration tests: full pages, HTMX fragments and error statuses.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Local;
use http_body_util::BodyExt;
use std::sync::Arc;
use tickerscan::adapters::web::{build_router, AppState};
use tower::ServiceExt;

use common::*;

fn create_test_app() -> Router {
    let today = Local::now().date_naive();
    let port = MockDataPort::new()
        .with_bars("AAPL", bars_ending(today, 60, 100.0))
        .with_bars("MSFT", bars_ending(today, 80, 300.0))
        .with_error("FAIL", "upstream unavailable");

    build_router(AppState {
        data_port: Arc::new(port),
        default_ticker: "AAPL".to_string(),
    })
}

async fn get(app: Router, uri: &str, htmx: bool) -> (StatusCode, String) {
    let mut request = Request::builder().uri(uri);
    if htmx {
        request = request.header("HX-Request", "true");
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn index_scans_default_ticker() {
    let (status, body) = get(create_test_app(), "/", false).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("hx-get"));
    assert!(body.contains("AAPL Technical Overview"));
    assert!(body.contains("159.00"));
}

#[tokio::test]
async fn index_with_query_scans_that_ticker() {
    let (status, body) = get(create_test_app(), "/?ticker=msft", false).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("MSFT Technical Overview"));
    assert!(body.contains("379.00"));
}

#[tokio::test]
async fn empty_ticker_renders_form_only() {
    let (status, body) = get(create_test_app(), "/?ticker=", false).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form"));
    assert!(!body.contains("Technical Overview"));
}

#[tokio::test]
async fn htmx_request_gets_fragment() {
    let (status, body) = get(create_test_app(), "/report?ticker=aapl", true).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("AAPL Technical Overview"));
    assert!(body.contains("Below 20 EMA"));
    assert!(!body.contains("<!DOCTYPE html>"));
}

#[tokio::test]
async fn scan_route_renders_report() {
    let (status, body) = get(create_test_app(), "/scan/msft", true).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("MSFT Technical Overview"));
    assert!(body.contains("Green"));
}

#[tokio::test]
async fn unknown_ticker_is_unprocessable() {
    let (status, body) = get(create_test_app(), "/scan/zzzz", false).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("ZZZZ"));
    assert!(body.contains("422"));
}

#[tokio::test]
async fn loader_failure_is_bad_gateway() {
    let (status, body) = get(create_test_app(), "/report?ticker=FAIL", true).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("upstream unavailable"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = get(create_test_app(), "/nope", false).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("404"));
}

#[tokio::test]
async fn responses_are_html() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
}
