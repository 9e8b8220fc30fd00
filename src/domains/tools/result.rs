//! Tool results.
//!
//! Every tool invocation ends in exactly one [`ToolResult`]: the success text
//! or the failure message. Transports turn it into an MCP `CallToolResult`
//! with `isError` set for failures.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

use super::error::ToolError;

/// Outcome of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResult {
    Success { text: String },
    Failure { message: String },
}

impl ToolResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Wrap an operation's outcome.
    ///
    /// Output bytes are taken as text without inspection; invalid UTF-8 is
    /// replaced rather than rejected, and empty output is still a success.
    pub fn from_outcome(outcome: Result<Vec<u8>, ToolError>) -> Self {
        match outcome {
            Ok(output) => Self::success(String::from_utf8_lossy(&output)),
            Err(e) => Self::failure(e.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// The success text or the failure message.
    pub fn text(&self) -> &str {
        match self {
            Self::Success { text } => text,
            Self::Failure { message } => message,
        }
    }
}

impl From<ToolResult> for CallToolResult {
    fn from(result: ToolResult) -> Self {
        match result {
            ToolResult::Success { text } => CallToolResult::success(vec![Content::text(text)]),
            ToolResult::Failure { message } => CallToolResult::error(vec![Content::text(message)]),
        }
    }
}
