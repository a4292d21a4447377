//! Error types for the GitHub assistant.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Response body did not match the expected JSON shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport error (connection, TLS, reading the body)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller supplied an argument the API would reject anyway
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// GitHub API error
    #[error(transparent)]
    GitHub(#[from] GitHubError),
}

impl Error {
    /// The API error, if this is one.
    #[must_use]
    pub fn api_error(&self) -> Option<&GitHubError> {
        match self {
            Self::GitHub(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the API answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::GitHub(GitHubError::NotFound { .. }))
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Typed errors returned by the GitHub REST API.
///
/// Each variant corresponds to an HTTP status class.
#[derive(Error, Debug, Clone)]
pub enum GitHubError {
    /// Bad or missing credentials (401).
    #[error("[{status}] {message}")]
    Authentication {
        status: u16,
        message: String,
        documentation_url: Option<String>,
        request_id: Option<String>,
    },

    /// Token lacks the required scope or access (403).
    #[error("[{status}] {message}")]
    Authorization {
        status: u16,
        message: String,
        documentation_url: Option<String>,
        request_id: Option<String>,
    },

    /// Resource not found, or hidden from this token (404).
    #[error("[{status}] {message}")]
    NotFound {
        status: u16,
        message: String,
        documentation_url: Option<String>,
        request_id: Option<String>,
    },

    /// Conflicting state, e.g. a file changed underneath (409).
    #[error("[{status}] {message}")]
    Conflict {
        status: u16,
        message: String,
        documentation_url: Option<String>,
        request_id: Option<String>,
    },

    /// Primary or secondary rate limit hit (429, or 403 with no remaining quota).
    #[error("[{status}] {message} (retry after {retry_after}s)")]
    RateLimited {
        status: u16,
        message: String,
        retry_after: u32,
        documentation_url: Option<String>,
        request_id: Option<String>,
    },

    /// Rejected payload (400, 422 and other 4xx).
    #[error("[{status}] {message}")]
    Validation {
        status: u16,
        message: String,
        documentation_url: Option<String>,
        request_id: Option<String>,
    },

    /// Server errors (5xx).
    #[error("[{status}] {message}")]
    Server {
        status: u16,
        message: String,
        documentation_url: Option<String>,
        request_id: Option<String>,
    },
}

impl GitHubError {
    /// HTTP status code of the response.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Authentication { status, .. }
            | Self::Authorization { status, .. }
            | Self::NotFound { status, .. }
            | Self::Conflict { status, .. }
            | Self::RateLimited { status, .. }
            | Self::Validation { status, .. }
            | Self::Server { status, .. } => *status,
        }
    }

    /// Get the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message, .. }
            | Self::Authorization { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::RateLimited { message, .. }
            | Self::Validation { message, .. }
            | Self::Server { message, .. } => message,
        }
    }

    /// Link to the API docs for this error, when GitHub sends one.
    #[must_use]
    pub fn documentation_url(&self) -> Option<&str> {
        match self {
            Self::Authentication { documentation_url, .. }
            | Self::Authorization { documentation_url, .. }
            | Self::NotFound { documentation_url, .. }
            | Self::Conflict { documentation_url, .. }
            | Self::RateLimited { documentation_url, .. }
            | Self::Validation { documentation_url, .. }
            | Self::Server { documentation_url, .. } => documentation_url.as_deref(),
        }
    }

    /// Value of the `x-github-request-id` header, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Authentication { request_id, .. }
            | Self::Authorization { request_id, .. }
            | Self::NotFound { request_id, .. }
            | Self::Conflict { request_id, .. }
            | Self::RateLimited { request_id, .. }
            | Self::Validation { request_id, .. }
            | Self::Server { request_id, .. } => request_id.as_deref(),
        }
    }

    /// Get the retry-after value for rate limited errors.
    #[must_use]
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            Self::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }
}
