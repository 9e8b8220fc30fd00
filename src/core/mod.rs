//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the audit log, server lifecycle
//! management, and transport layer abstractions.

pub mod audit;
pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use audit::{AuditLog, Direction};
pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
