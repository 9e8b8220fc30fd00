//! Tool-specific error types.
//!
//! The `Display` text of a [`ToolError`] is exactly what the caller sees in
//! a failure result, so most variants print their message verbatim.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during tool operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The requested tool is not served by this process.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Missing, mistyped or out-of-range argument.
    #[error("{0}")]
    InvalidArgument(String),

    /// The external program failed to launch or exited non-zero.
    /// Carries the underlying diagnostic unchanged.
    #[error("{0}")]
    ExternalOperation(String),

    /// The request was cancelled while the external program was running.
    #[error("operation cancelled")]
    Cancelled,

    /// The external program outlived the configured command timeout.
    #[error("operation timed out after {0:?}")]
    TimedOut(Duration),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid argument" error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// The argument is absent or not a string.
    pub fn not_a_string(name: &str) -> Self {
        Self::InvalidArgument(format!("{} must be a string", name))
    }

    /// Create a new "external operation" error.
    pub fn external(msg: impl Into<String>) -> Self {
        Self::ExternalOperation(msg.into())
    }
}
