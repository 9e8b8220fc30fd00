//! MCP Toolbox Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing a small
//! set of tools that shell out to external commands (curl) or generate data
//! in-process, with a uniform request/response pipeline and an audit log.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   the audit log, transports, and the main server
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: The tool pipeline (argument validation, command invocation,
//!     result formatting) and one definition per tool
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_toolbox::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{AuditLog, Config, Error, McpServer, Result};
