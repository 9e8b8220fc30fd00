//! Tool Registry - name-based dispatch for all tools.
//!
//! The rmcp router dispatches STDIO/TCP calls itself; the registry serves
//! transports that receive a tool name and a raw argument value (HTTP).

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use rmcp::model::{JsonObject, Tool};

use super::definitions::{CurlTool, IpInfoTool, RandomTool, TimeTool, WeatherTool};
use super::error::ToolError;
use super::pipeline::{PipelineTool, ToolContext, run_pipeline};
use super::result::ToolResult;
use super::toolset::Toolset;

/// Tool registry - the tools of one toolset.
pub struct ToolRegistry {
    ctx: Arc<ToolContext>,
    toolset: Toolset,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(ctx: Arc<ToolContext>, toolset: Toolset) -> Self {
        Self { ctx, toolset }
    }

    /// Names of the tools served.
    pub fn tool_names(&self) -> &'static [&'static str] {
        self.toolset.tool_names()
    }

    /// Metadata of the tools served.
    pub fn tools(&self) -> Vec<Tool> {
        [
            CurlTool::to_tool(),
            IpInfoTool::to_tool(),
            RandomTool::to_tool(),
            TimeTool::to_tool(),
            WeatherTool::to_tool(),
        ]
        .into_iter()
        .filter(|tool| self.toolset.includes(&tool.name))
        .collect()
    }

    /// Run the named tool.
    ///
    /// Arguments other than a JSON object (or null) are treated as an empty
    /// object, so each tool reports its own missing parameters.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
        cancel: &CancellationToken,
    ) -> Result<ToolResult, ToolError> {
        if !self.toolset.includes(name) {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        }

        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            _ => JsonObject::new(),
        };
        let ctx = &self.ctx;

        let result = match name {
            CurlTool::NAME => run_pipeline::<CurlTool>(arguments, ctx, cancel).await,
            IpInfoTool::NAME => run_pipeline::<IpInfoTool>(arguments, ctx, cancel).await,
            RandomTool::NAME => run_pipeline::<RandomTool>(arguments, ctx, cancel).await,
            TimeTool::NAME => run_pipeline::<TimeTool>(arguments, ctx, cancel).await,
            WeatherTool::NAME => run_pipeline::<WeatherTool>(arguments, ctx, cancel).await,
            _ => return Err(ToolError::not_found(name)),
        };
        Ok(result)
    }
}
