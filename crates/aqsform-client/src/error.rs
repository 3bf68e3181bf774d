//! Error taxonomy for loader and submission failures.
//!
//! Every failure surfaces as an error whose `Display` text is suitable for
//! direct user display. The crate never retries; callers that want retry
//! can key off [`ClientError::is_retryable`].

use thiserror::Error;

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// User-facing failure categories, derived from the HTTP status where one
/// is available.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP 429. The response body is ignored for rate limiting.
    #[error("Too many requests, wait before retrying.")]
    RateLimited,
    /// HTTP 400.
    #[error("{0}")]
    InvalidInput(String),
    /// HTTP 401.
    #[error("{0}")]
    Unauthorized(String),
    /// HTTP 403.
    #[error("{0}")]
    Forbidden(String),
    /// HTTP 404.
    #[error("{0}")]
    NotFound(String),
    /// HTTP 500.
    #[error("{0}")]
    ServerError(String),
    /// HTTP 503.
    #[error("{0}")]
    Unavailable(String),
    /// Any other HTTP status.
    #[error("Request failed with status {status}: {message}")]
    Unexpected { status: u16, message: String },
    /// 2xx response whose envelope carried `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// Transport-level failure (connect, timeout, TLS).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// A 2xx response whose body did not parse as the expected envelope.
    #[error("Unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Maps an HTTP status and optional body message to the taxonomy. A
    /// non-empty body message takes precedence over the fixed sentence for
    /// every status except 429.
    pub(crate) fn from_status(status: u16, body_message: Option<String>) -> Self {
        let resolve = |fallback: &str| {
            body_message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };
        match status {
            429 => ClientError::RateLimited,
            400 => ClientError::InvalidInput(resolve("Invalid form data, check entries.")),
            401 => ClientError::Unauthorized(resolve("Session expired, log in again.")),
            403 => ClientError::Forbidden(resolve("No permission to submit this form.")),
            404 => ClientError::NotFound(resolve("Form not found, refresh and retry.")),
            500 => ClientError::ServerError(resolve("Server error, try again later.")),
            503 => ClientError::Unavailable(resolve("Service temporarily unavailable.")),
            other => ClientError::Unexpected {
                status: other,
                message: body_message.unwrap_or_else(|| "Unknown error".to_string()),
            },
        }
    }

    /// The HTTP status this error was derived from, where one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RateLimited => Some(429),
            ClientError::InvalidInput(_) => Some(400),
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Forbidden(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::ServerError(_) => Some(500),
            ClientError::Unavailable(_) => Some(503),
            ClientError::Unexpected { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether a later identical request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::RateLimited | ClientError::ServerError(_) | ClientError::Unavailable(_) => {
                true
            }
            ClientError::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
