//! IP information tool definition.
//!
//! Looks up one attribute of the caller's public IP address at ipinfo.io.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::domains::tools::{AllowList, PipelineTool, ToolArguments, ToolContext, ToolError};

const IPINFO_BASE_URL: &str = "https://ipinfo.io";

const DEFAULT_ATTRIBUTE: &str = "ip";

/// Attributes ipinfo.io serves as plain text. Matched case-sensitively.
pub const ATTRIBUTES: AllowList = AllowList::case_sensitive(&[
    "city", "region", "country", "ip", "hostname", "loc", "org", "postal", "timezone",
]);

/// Parameters for the IP information tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IpInfoParams {
    /// attribute to fetch from https://ipinfo.io/, e.g. city, region, country, loc, org, postal, timezone
    #[serde(default = "default_attribute")]
    pub attribute: String,
}

fn default_attribute() -> String {
    DEFAULT_ATTRIBUTE.to_string()
}

/// IP information tool.
pub struct IpInfoTool;

#[async_trait]
impl PipelineTool for IpInfoTool {
    const NAME: &'static str = "use_ipinfo";
    const DESCRIPTION: &'static str = "fetch information for the current Internet IP Address";
    type Params = IpInfoParams;

    fn parse(args: ToolArguments<'_>) -> Result<Self::Params, ToolError> {
        let attribute = args.str_or("attribute", DEFAULT_ATTRIBUTE)?;
        let attribute = ATTRIBUTES.find(attribute).ok_or_else(|| {
            ToolError::invalid_argument(format!(
                "invalid attribute: must be one of {}",
                ATTRIBUTES.joined()
            ))
        })?;
        Ok(IpInfoParams {
            attribute: attribute.to_string(),
        })
    }

    async fn invoke(
        params: Self::Params,
        ctx: &ToolContext,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ToolError> {
        let url = format!("{}/{}", IPINFO_BASE_URL, params.attribute);
        ctx.run(&ctx.fetch_command(url), cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::{RecordingRunner, object, test_context};
    use crate::domains::tools::{CommandLine, ToolResult, run_pipeline};

    async fn call(args: serde_json::Value) -> (ToolResult, Vec<CommandLine>) {
        let (ctx, runner, _audit) = test_context(RecordingRunner::succeeding("203.0.113.7\n"));
        let result =
            run_pipeline::<IpInfoTool>(object(args), &ctx, &CancellationToken::new()).await;
        (result, runner.calls())
    }

    #[tokio::test]
    async fn test_absent_attribute_defaults_to_ip() {
        let (default_result, default_calls) = call(serde_json::json!({})).await;
        let (explicit_result, explicit_calls) =
            call(serde_json::json!({ "attribute": "ip" })).await;

        assert_eq!(default_result, ToolResult::success("203.0.113.7\n"));
        assert_eq!(default_result, explicit_result);
        assert_eq!(default_calls, explicit_calls);
        assert_eq!(default_calls[0].args, vec!["-s", "https://ipinfo.io/ip"]);
    }

    #[tokio::test]
    async fn test_every_allowed_attribute_builds_its_url() {
        for attribute in [
            "city", "region", "country", "hostname", "loc", "org", "postal", "timezone",
        ] {
            let (result, calls) = call(serde_json::json!({ "attribute": attribute })).await;
            assert!(!result.is_failure());
            assert_eq!(calls[0].args[1], format!("https://ipinfo.io/{}", attribute));
        }
    }

    #[tokio::test]
    async fn test_rejects_attributes_outside_allow_list() {
        for attribute in ["moon", "City", "", "ip/../json"] {
            let (result, calls) = call(serde_json::json!({ "attribute": attribute })).await;
            assert!(calls.is_empty());
            assert_eq!(
                result,
                ToolResult::failure(
                    "invalid attribute: must be one of city, region, country, ip, hostname, loc, org, postal, timezone"
                )
            );
        }
    }

    #[tokio::test]
    async fn test_attribute_must_be_a_string() {
        let (result, calls) = call(serde_json::json!({ "attribute": 3 })).await;
        assert!(calls.is_empty());
        assert_eq!(result, ToolResult::failure("attribute must be a string"));
    }
}
