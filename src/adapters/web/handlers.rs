//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::Local;
use std::sync::Arc;

use crate::domain::scan::{normalize_ticker, scan};
use crate::ports::report_port::ReportPort;

use super::templates::{HtmlReportAdapter, PageTemplate};
use super::{is_htmx_request, AppState, WebError};

#[derive(Debug, Default, serde::Deserialize)]
pub struct ScanQuery {
    pub ticker: Option<String>,
}

/// Runs a scan off the async runtime and renders it as a fragment.
///
/// An empty ticker yields an empty fragment with status 200.
async fn scan_fragment(state: &Arc<AppState>, ticker: &str) -> (StatusCode, String) {
    if ticker.is_empty() {
        return (StatusCode::OK, String::new());
    }

    let port = Arc::clone(&state.data_port);
    let owned = ticker.to_string();
    let joined = tokio::task::spawn_blocking(move || {
        let today = Local::now().date_naive();
        scan(&*port, &owned, today).and_then(|report| HtmlReportAdapter.render(&report))
    })
    .await;

    match joined {
        Ok(Ok(html)) => (StatusCode::OK, html),
        Ok(Err(err)) => {
            tracing::warn!(ticker, "scan failed: {err}");
            let web = WebError::from(err);
            (web.status, web.fragment())
        }
        Err(join) => {
            let web = WebError::internal(format!("scan task failed: {}", join));
            (web.status, web.fragment())
        }
    }
}

fn page(ticker: &str, status: StatusCode, content: &str) -> Response {
    let title = if ticker.is_empty() {
        "Stock Technical Scanner".to_string()
    } else {
        format!("{} Technical Overview", ticker)
    };
    let template = PageTemplate {
        title: &title,
        ticker,
        content,
    };
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => WebError::internal(e.to_string()).into_response(),
    }
}

async fn respond(state: Arc<AppState>, headers: &HeaderMap, ticker: &str) -> Response {
    let (status, content) = scan_fragment(&state, ticker).await;
    if is_htmx_request(headers) {
        (status, Html(content)).into_response()
    } else {
        page(ticker, status, &content)
    }
}

/// `GET /?ticker=X`. Without a query the default ticker is scanned.
pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ScanQuery>,
) -> Response {
    let ticker = match query.ticker {
        Some(t) => normalize_ticker(&t),
        None => state.default_ticker.clone(),
    };
    respond(state, &headers, &ticker).await
}

/// `GET /report?ticker=X`: the fragment swapped in by the ticker field.
pub async fn report(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ScanQuery>,
) -> Response {
    let ticker = normalize_ticker(query.ticker.as_deref().unwrap_or_default());
    respond(state, &headers, &ticker).await
}

pub async fn scan_ticker(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(ticker): Path<String>,
) -> Response {
    let ticker = normalize_ticker(&ticker);
    respond(state, &headers, &ticker).await
}

pub async fn not_found() -> WebError {
    WebError::not_found("page not found")
}
