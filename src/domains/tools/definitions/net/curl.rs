//! Fetch URL tool definition.
//!
//! Fetches a URL with the configured fetch program (`curl -s <url>`) and
//! returns the body as text.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::domains::tools::{PipelineTool, ToolArguments, ToolContext, ToolError};

/// Parameters for the fetch URL tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CurlParams {
    /// url of the webpage to fetch
    pub url: String,
}

/// Fetch URL tool - returns the raw body of a webpage.
pub struct CurlTool;

#[async_trait]
impl PipelineTool for CurlTool {
    const NAME: &'static str = "use_curl";
    const DESCRIPTION: &'static str = "fetch this url or webpage";
    type Params = CurlParams;

    fn parse(args: ToolArguments<'_>) -> Result<Self::Params, ToolError> {
        Ok(CurlParams {
            url: args.require_str("url")?.to_string(),
        })
    }

    async fn invoke(
        params: Self::Params,
        ctx: &ToolContext,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ToolError> {
        ctx.run(&ctx.fetch_command(params.url), cancel).await
    }
}
