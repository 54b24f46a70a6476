//! Tool-specific error types.

use rmcp::model::{CallToolResult, Content};
use thiserror::Error;
use tracing::warn;

use crate::domains::publisher::{AuthError, EditError, PublisherError};

/// Errors that can occur during tool operations.
///
/// None of these travel as protocol errors: every variant is turned into an
/// `isError` tool result whose text starts with `Error: `.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// No credential could be obtained for the invocation.
    #[error("Authentication failed: {0}")]
    Unauthenticated(#[from] AuthError),

    /// An edit-scoped operation failed.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// A direct API call failed.
    #[error(transparent)]
    Api(#[from] PublisherError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Render as the error result returned to the client.
    pub fn into_result(self) -> CallToolResult {
        warn!("{}", self);
        CallToolResult::error(vec![Content::text(format!("Error: {}", self))])
    }
}
