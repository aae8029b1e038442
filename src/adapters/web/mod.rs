//! Web server adapter.
//!
//! Axum server with an HTMX-enhanced page: a ticker text field whose change
//! re-runs the scan and swaps in the rendered report.

mod error;
mod handlers;
mod templates;

pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::ports::data_port::DataPort;

pub struct AppState {
    pub data_port: Arc<dyn DataPort + Send + Sync>,
    /// Ticker scanned when the page is opened without a query.
    pub default_ticker: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/report", get(handlers::report))
        .route("/scan/{ticker}", get(handlers::scan_ticker))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
