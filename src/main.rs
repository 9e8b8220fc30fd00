//! MCP Server Entry Point
//!
//! This is the main entry point for the MCP server. It initializes logging,
//! loads configuration, and starts the server with the configured transport.
//!
//! Banners go to stderr: with the STDIO transport, stdout carries the protocol.

use anyhow::Result;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use mcp_toolbox::core::config::LoggingConfig;
use mcp_toolbox::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging must be up before Config::from_env, which reports invalid values
    init_logging(&LoggingConfig::from_env());

    // Load configuration from environment
    let config = Config::from_env();

    info!(
        "Starting {} v{} (toolset: {})",
        config.server.name, config.server.version, config.tools.toolset
    );

    let server = McpServer::new(config.clone());

    eprintln!("🚀 Server started for toolset {}", config.tools.toolset);

    let transport = TransportService::new(config.transport);
    if let Err(e) = transport.run(server).await {
        error!("Transport failed: {}", e);
        eprintln!("😡 Server error: {}", e);
    }

    eprintln!("👋 Server stopped for toolset {}", config.tools.toolset);
    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(logging: &LoggingConfig) {
    let level = match logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
