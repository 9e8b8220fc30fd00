//! Error types for the MCP server's startup path.
//!
//! Tool failures never reach this type: they are folded into a failure result
//! at the handler boundary (see `domains::tools::ToolError`). Transport
//! failures have their own `TransportError`.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error raised while assembling the server.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
