//! Error types for the content layer.

/// Errors raised while fetching content from the API.
///
/// Every variant names the resource it was fetching so aggregated failures
/// can be attributed.
#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("Failed to fetch {resource}: {message}")]
    Network { resource: String, message: String },

    #[error("Failed to fetch {resource}: HTTP {status}")]
    Http { resource: String, status: u16 },

    #[error("Failed to parse {resource} response: {message}")]
    Parse { resource: String, message: String },

    #[error("No {resource} found with name: {name}")]
    NotFound { resource: String, name: String },

    #[error("Invalid path for {resource}: {path} (must start with '/')")]
    InvalidPath { resource: String, path: String },

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl ContentError {
    /// Human-readable name of the resource the error belongs to.
    pub fn resource(&self) -> Option<&str> {
        match self {
            ContentError::Network { resource, .. }
            | ContentError::Http { resource, .. }
            | ContentError::Parse { resource, .. }
            | ContentError::NotFound { resource, .. }
            | ContentError::InvalidPath { resource, .. } => Some(resource),
            ContentError::Client(_) => None,
        }
    }

    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ContentError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}

/// Convenience result type.
pub type ContentResult<T> = Result<T, ContentError>;
