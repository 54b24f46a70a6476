//! Publisher API error types.

use thiserror::Error;

/// Result type for Android Publisher API calls.
pub type PublisherResult<T> = Result<T, PublisherError>;

/// Errors returned by calls against the Android Publisher API.
#[derive(Debug, Error)]
pub enum PublisherError {
    /// The API answered with a non-success status.
    #[error("{operation} failed with HTTP {status}: {message}")]
    Http {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// The request never produced a response (connect, TLS, timeout).
    #[error("{operation} request failed: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded.
    #[error("{operation} returned an unreadable response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    /// The base URL cannot carry path segments.
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl PublisherError {
    /// Create an HTTP status error.
    pub fn http(operation: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            operation,
            status,
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            operation,
            message: message.into(),
        }
    }

    /// HTTP status of the failed call, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
