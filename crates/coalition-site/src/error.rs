//! Error types for the site server.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use coalition_content::ContentError;

use crate::render;

/// All errors that can occur while serving the site.
#[derive(thiserror::Error, Debug)]
pub enum SiteError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiteError {
    pub fn status(&self) -> StatusCode {
        match self {
            SiteError::PageNotFound(_) => StatusCode::NOT_FOUND,
            SiteError::Content(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            SiteError::Content(_) => StatusCode::BAD_GATEWAY,
            SiteError::Config(_) | SiteError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Html(render::error_page(status, &self.to_string()))).into_response()
    }
}

pub type SiteResult<T> = Result<T, SiteError>;
