//! Tool Router - builds the rmcp ToolRouter for a toolset.
//!
//! Each tool knows how to create its own route; this module only decides
//! which tools the configured toolset exposes.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{CurlTool, IpInfoTool, RandomTool, TimeTool, WeatherTool};
use super::pipeline::{PipelineTool, ToolContext};
use super::toolset::Toolset;

/// Build the tool router with the tools of `toolset`.
pub fn build_tool_router<S>(ctx: Arc<ToolContext>, toolset: Toolset) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();
    if toolset.includes(CurlTool::NAME) {
        router = router.with_route(CurlTool::create_route(ctx.clone()));
    }
    if toolset.includes(IpInfoTool::NAME) {
        router = router.with_route(IpInfoTool::create_route(ctx.clone()));
    }
    if toolset.includes(RandomTool::NAME) {
        router = router.with_route(RandomTool::create_route(ctx.clone()));
    }
    if toolset.includes(TimeTool::NAME) {
        router = router.with_route(TimeTool::create_route(ctx.clone()));
    }
    if toolset.includes(WeatherTool::NAME) {
        router = router.with_route(WeatherTool::create_route(ctx));
    }
    router
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::super::testing::{RecordingRunner, test_context};
    use super::*;

    struct TestServer {}

    fn router_names(toolset: Toolset) -> Vec<String> {
        let (ctx, _runner, _audit) = test_context(RecordingRunner::succeeding(""));
        let router: ToolRouter<TestServer> = build_tool_router(ctx, toolset);
        router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }

    #[test]
    fn test_build_router_all() {
        let names = router_names(Toolset::All);
        assert_eq!(names.len(), 5);
        for name in [
            "use_curl",
            "use_ipinfo",
            "use_random",
            "use_time",
            "weather_info",
        ] {
            assert!(names.contains(&name.to_string()), "missing {}", name);
        }
    }

    #[test]
    fn test_build_router_single_toolsets() {
        assert_eq!(router_names(Toolset::Random), vec!["use_random"]);
        assert_eq!(router_names(Toolset::Time), vec!["use_time"]);
        assert_eq!(router_names(Toolset::Weather), vec!["weather_info"]);
        assert_eq!(router_names(Toolset::Curl).len(), 2);
    }

    #[test]
    fn test_registry_matches_router() {
        for toolset in [
            Toolset::All,
            Toolset::Curl,
            Toolset::Random,
            Toolset::Time,
            Toolset::Weather,
        ] {
            let (ctx, _runner, _audit) = test_context(RecordingRunner::succeeding(""));
            let registry = ToolRegistry::new(ctx, toolset);
            let names = router_names(toolset);
            assert_eq!(registry.tool_names().len(), names.len());
            for name in registry.tool_names() {
                assert!(names.contains(&name.to_string()));
            }
        }
    }
}
