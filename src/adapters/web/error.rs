//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::ScannerError;

use super::templates::ErrorTemplate;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The error as an HTML fragment, falling back to the bare message.
    pub fn fragment(&self) -> String {
        ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        }
        .render()
        .unwrap_or_else(|_| self.message.clone())
    }
}

impl From<ScannerError> for WebError {
    fn from(err: ScannerError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status, Html(self.fragment())).into_response()
    }
}

pub fn status_from_error(err: &ScannerError) -> StatusCode {
    match err {
        ScannerError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ScannerError::ConfigParse { .. } | ScannerError::ConfigInvalid { .. } => {
            StatusCode::BAD_REQUEST
        }
        ScannerError::DataSource { .. } => StatusCode::BAD_GATEWAY,
        ScannerError::Render { .. } | ScannerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
