//! The tool invocation pipeline shared by every tool.
//!
//! [`run_pipeline`] is the only entry point transports use:
//!
//! ```text
//! record REQUEST → parse params ──err──────────────→ record ERROR → Failure
//!                      │ok
//!                      ▼
//!                   invoke ──err─→ record ERROR → Failure
//!                      │ok
//!                      ▼
//!               record RESPONSE → Success
//! ```
//!
//! Exactly one request record and one outcome record are written per call,
//! and nothing is retried.

use async_trait::async_trait;
use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use super::args::ToolArguments;
use super::error::ToolError;
use super::invoker::{CommandLine, CommandRunner};
use super::result::ToolResult;
use crate::core::audit::AuditLog;

/// Shared collaborators handed to every tool.
pub struct ToolContext {
    audit: Arc<AuditLog>,
    runner: Arc<dyn CommandRunner>,
    fetch_program: String,
}

impl ToolContext {
    pub fn new(
        audit: Arc<AuditLog>,
        runner: Arc<dyn CommandRunner>,
        fetch_program: impl Into<String>,
    ) -> Self {
        Self {
            audit,
            runner,
            fetch_program: fetch_program.into(),
        }
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Silent fetch of `url` with the configured fetch program.
    pub fn fetch_command(&self, url: impl Into<String>) -> CommandLine {
        CommandLine::fetch(&self.fetch_program, url)
    }

    /// Run `command` through the configured runner.
    pub async fn run(
        &self,
        command: &CommandLine,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ToolError> {
        self.runner.run(command, cancel).await
    }
}

/// A tool that can be driven by [`run_pipeline`].
#[async_trait]
pub trait PipelineTool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Typed parameters; also the source of the tool's input schema.
    type Params: JsonSchema + Send + 'static;

    /// Decode and validate the raw arguments.
    fn parse(args: ToolArguments<'_>) -> Result<Self::Params, ToolError>;

    /// Perform the operation and return its raw output.
    async fn invoke(
        params: Self::Params,
        ctx: &ToolContext,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ToolError>;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    ///
    /// The request's cancellation token becomes the invocation's token, so a
    /// client-side cancel stops any running command.
    fn create_route<S>(ctx: Arc<ToolContext>) -> ToolRoute<S>
    where
        Self: Sized,
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |call: ToolCallContext<'_, S>| {
            let args = call.arguments.clone().unwrap_or_default();
            let cancel = call.request_context.ct.clone();
            let ctx = ctx.clone();
            async move {
                let result = run_pipeline::<Self>(args, &ctx, &cancel).await;
                Ok::<_, rmcp::ErrorData>(CallToolResult::from(result))
            }
            .boxed()
        })
    }
}

/// Run one invocation of `T` end to end.
///
/// Never fails: every error becomes a [`ToolResult::Failure`].
#[instrument(skip_all, fields(tool = T::NAME))]
pub async fn run_pipeline<T: PipelineTool>(
    arguments: JsonObject,
    ctx: &ToolContext,
    cancel: &CancellationToken,
) -> ToolResult {
    ctx.audit().record_request(
        T::NAME,
        &serde_json::json!({ "name": T::NAME, "arguments": &arguments }),
    );

    let outcome = match T::parse(ToolArguments::new(&arguments)) {
        Ok(params) => T::invoke(params, ctx, cancel).await,
        Err(e) => {
            warn!("Rejected arguments: {}", e);
            Err(e)
        }
    };

    if let Err(e) = &outcome {
        ctx.audit().record_error(T::NAME, e);
    }

    let result = ToolResult::from_outcome(outcome);
    match &result {
        ToolResult::Success { .. } => {
            ctx.audit()
                .record_response(T::NAME, &CallToolResult::from(result.clone()));
            info!("{} succeeded", T::NAME);
        }
        ToolResult::Failure { message } => info!("{} failed: {}", T::NAME, message),
    }
    result
}
