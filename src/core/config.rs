//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (including a `.env` file) or defaults.

use super::transport::TransportConfig;
use crate::domains::tools::Toolset;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Program used by the fetch-based tools when nothing else is configured.
pub const DEFAULT_FETCH_PROGRAM: &str = "curl";

/// Audit log file created in the working directory by default.
pub const DEFAULT_AUDIT_LOG: &str = "mcp.log";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tools domain configuration.
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the tools domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Which group of tools this process exposes.
    pub toolset: Toolset,

    /// Program invoked as `<program> -s <url>` by the fetch-based tools.
    pub fetch_program: String,

    /// Upper bound on a single external command. `None` means the command
    /// runs until it exits or the request is cancelled.
    pub command_timeout: Option<Duration>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,

    /// Path of the append-only audit log of tool requests and responses.
    pub audit_path: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            toolset: Toolset::default(),
            fetch_program: DEFAULT_FETCH_PROGRAM.to_string(),
            command_timeout: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
            audit_path: PathBuf::from(DEFAULT_AUDIT_LOG),
        }
    }
}

impl LoggingConfig {
    /// Load logging configuration from environment variables.
    ///
    /// Reads `MCP_LOG_LEVEL`, `MCP_LOG_TIMESTAMPS` and `MCP_AUDIT_LOG`. Emits
    /// no log events itself, so it can run before the subscriber exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }

        if let Ok(flag) = std::env::var("MCP_LOG_TIMESTAMPS") {
            logging.with_timestamps = !matches!(
                flag.trim().to_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }

        if let Ok(path) = std::env::var("MCP_AUDIT_LOG") {
            logging.audit_path = PathBuf::from(path);
        }

        logging
    }
}

impl Default for Config {
    fn default() -> Self {
        let tools = ToolsConfig::default();
        Self {
            server: ServerConfig {
                name: tools.toolset.server_name().to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            tools,
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_TOOLSET`, `MCP_LOG_LEVEL`.
    ///
    /// Invalid values are reported through `tracing`, so the subscriber must
    /// be installed first (see [`LoggingConfig::from_env`]).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(toolset) = std::env::var("MCP_TOOLSET") {
            match toolset.parse::<Toolset>() {
                Ok(toolset) => config.tools.toolset = toolset,
                Err(e) => warn!("{}; serving all tools", e),
            }
        }

        // An explicit name wins over the toolset's conventional one
        config.server.name = std::env::var("MCP_SERVER_NAME")
            .unwrap_or_else(|_| config.tools.toolset.server_name().to_string());

        config.logging = LoggingConfig::from_env();

        if let Ok(program) = std::env::var("MCP_FETCH_PROGRAM") {
            if program.trim().is_empty() {
                warn!(
                    "MCP_FETCH_PROGRAM is empty, keeping {}",
                    DEFAULT_FETCH_PROGRAM
                );
            } else {
                config.tools.fetch_program = program;
            }
        }

        if let Ok(secs) = std::env::var("MCP_COMMAND_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(0) => config.tools.command_timeout = None,
                Ok(secs) => {
                    config.tools.command_timeout = Some(Duration::from_secs(secs));
                    info!("External commands time out after {}s", secs);
                }
                Err(e) => warn!("Ignoring MCP_COMMAND_TIMEOUT_SECS={:?}: {}", secs, e),
            }
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }
}
