//! Weather tool definition.
//!
//! Fetches a one-line weather report from wttr.in. An empty location lets
//! wttr.in infer it from the caller's network address.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::domains::tools::{PipelineTool, ToolArguments, ToolContext, ToolError};

const WTTR_BASE_URL: &str = "http://wttr.in";

/// Parameters for the weather tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WeatherParams {
    /// location for weather to fetch
    #[serde(default)]
    pub location: String,
}

/// Weather tool.
pub struct WeatherTool;

impl WeatherTool {
    /// wttr.in URL for `location` in its one-line format.
    pub fn url(location: &str) -> String {
        format!("{}/{}?format=3", WTTR_BASE_URL, location)
    }
}

#[async_trait]
impl PipelineTool for WeatherTool {
    const NAME: &'static str = "weather_info";
    const DESCRIPTION: &'static str = "get the current weather for the specified location";
    type Params = WeatherParams;

    fn parse(args: ToolArguments<'_>) -> Result<Self::Params, ToolError> {
        Ok(WeatherParams {
            location: args.str_or("location", "")?.to_string(),
        })
    }

    async fn invoke(
        params: Self::Params,
        ctx: &ToolContext,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ToolError> {
        ctx.run(&ctx.fetch_command(Self::url(&params.location)), cancel)
            .await
    }
}
