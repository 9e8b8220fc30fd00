//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool implements [`PipelineTool`](crate::domains::tools::PipelineTool):
//! - a typed parameters struct decoded from the raw argument map
//! - an `invoke()` function (core logic)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs` for the
//! configured toolset. **Adding a new tool does NOT require modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::audit::AuditLog;
use super::config::Config;
use crate::domains::tools::{
    ProcessRunner, ToolContext, ToolError, ToolRegistry, ToolResult, build_tool_router,
};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and hands tool
/// calls to the tools domain.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry used for HTTP dispatch and tool listing.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// The audit log and the process runner are built here, once, and
    /// shared by every tool.
    pub fn new(config: Config) -> Self {
        let audit = Arc::new(AuditLog::open(config.logging.audit_path.clone()));
        let runner = Arc::new(ProcessRunner::new(config.tools.command_timeout));
        let tools = Arc::new(ToolContext::new(
            audit,
            runner,
            config.tools.fetch_program.clone(),
        ));
        Self::with_context(config, tools)
    }

    /// Create a server around an already assembled tool context.
    pub fn with_context(config: Config, tools: Arc<ToolContext>) -> Self {
        let config = Arc::new(config);
        let toolset = config.tools.toolset;

        Self {
            tool_router: build_tool_router::<Self>(tools.clone(), toolset),
            registry: Arc::new(ToolRegistry::new(tools, toolset)),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    fn instructions(&self) -> String {
        format!(
            "{} exposes the following tools: {}.",
            self.name(),
            self.registry.tool_names().join(", ")
        )
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Tool failures come back as `Ok(ToolResult::Failure)`; only an unknown
    /// tool name is an `Err`.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
        cancel: &CancellationToken,
    ) -> Result<ToolResult, ToolError> {
        self.registry.call_tool(name, arguments, cancel).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::Toolset;
    use crate::domains::tools::testing::{
        BlockingRunner, RecordingRunner, context_with_runner, test_context,
    };
    use rmcp::ServiceExt;
    use std::time::Duration;
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};

    fn server_for(toolset: Toolset) -> McpServer {
        let mut config = Config::default();
        config.tools.toolset = toolset;
        config.server.name = toolset.server_name().to_string();
        let (tools, _runner, _dir) = test_context(RecordingRunner::succeeding("ok"));
        McpServer::with_context(config, tools)
    }

    #[test]
    fn test_lists_only_toolset_tools() {
        let server = server_for(Toolset::Curl);
        let names: Vec<_> = server
            .list_tools()
            .into_iter()
            .filter_map(|t| t["name"].as_str().map(str::to_string))
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"use_curl".to_string()));
        assert!(names.contains(&"use_ipinfo".to_string()));
    }

    #[test]
    fn test_server_info_reports_configured_name() {
        let server = server_for(Toolset::Weather);
        let info = server.get_info();
        assert_eq!(info.server_info.name, "mcp-weather");
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("weather_info"));
    }

    #[tokio::test]
    async fn test_call_tool_outside_toolset_is_not_found() {
        let server = server_for(Toolset::Time);
        let err = server
            .call_tool(
                "use_curl",
                serde_json::json!({"url": "x"}),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    async fn send<W: AsyncWrite + Unpin>(writer: &mut W, message: serde_json::Value) {
        let mut line = message.to_string();
        line.push('\n');
        writer.write_all(line.as_bytes()).await.unwrap();
    }

    async fn response_to<R: AsyncBufRead + Unpin>(
        lines: &mut Lines<R>,
        id: u64,
    ) -> serde_json::Value {
        while let Some(line) = lines.next_line().await.unwrap() {
            let message: serde_json::Value = serde_json::from_str(&line).unwrap();
            if message["id"] == id {
                return message;
            }
        }
        panic!("connection closed before response {}", id);
    }

    #[tokio::test]
    async fn test_client_cancel_stops_running_tool() {
        let runner = Arc::new(BlockingRunner::default());
        let (tools, audit) = context_with_runner(runner.clone());
        let server = McpServer::with_context(Config::default(), tools);

        let (client, server_io) = tokio::io::duplex(64 * 1024);
        tokio::spawn(async move {
            if let Ok(service) = server.serve(server_io).await {
                let _ = service.waiting().await;
            }
        });

        let (read, mut write) = tokio::io::split(client);
        let mut lines = BufReader::new(read).lines();

        let session = async {
            send(
                &mut write,
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "method": "initialize",
                    "params": {
                        "protocolVersion": "2024-11-05",
                        "capabilities": {},
                        "clientInfo": { "name": "test-client", "version": "0.0.0" }
                    }
                }),
            )
            .await;
            let initialized = response_to(&mut lines, 1).await;
            assert_eq!(initialized["result"]["serverInfo"]["name"], "mcp-toolbox");

            send(
                &mut write,
                serde_json::json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
            )
            .await;
            send(
                &mut write,
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "id": 2,
                    "method": "tools/call",
                    "params": { "name": "use_curl", "arguments": { "url": "http://example.test" } }
                }),
            )
            .await;

            runner.started().await;
            send(
                &mut write,
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "method": "notifications/cancelled",
                    "params": { "requestId": 2, "reason": "user abort" }
                }),
            )
            .await;

            response_to(&mut lines, 2).await
        };

        let response = tokio::time::timeout(Duration::from_secs(10), session)
            .await
            .expect("cancelled call never returned");

        assert_eq!(response["result"]["isError"], serde_json::json!(true));
        assert_eq!(
            response["result"]["content"][0]["text"],
            "operation cancelled"
        );

        let records = audit.lines();
        assert_eq!(records.len(), 2);
        assert!(records[0].starts_with("[REQUEST][use_curl]["));
        assert!(records[1].starts_with("[ERROR][use_curl]["));
        assert!(records[1].ends_with("operation cancelled"));
    }
}
