//! Tools domain module.
//!
//! Tools are executable functions that MCP clients call. Every tool runs
//! through one pipeline:
//!
//! 1. the raw argument map is decoded into the tool's typed parameters
//!    (`args.rs`), rejecting missing, mistyped or out-of-range values;
//! 2. the tool's operation runs, usually an external command bound to the
//!    request's cancellation token (`invoker.rs`);
//! 3. the outcome becomes a [`ToolResult`] (`result.rs`);
//!
//! with the request and the outcome recorded in the audit log around it
//! (`pipeline.rs`).
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Name-based dispatch for HTTP transport
//! - `toolset.rs` - Which tools a process exposes
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing [`PipelineTool`]
//! 2. Export it in `definitions/mod.rs`
//! 3. Add it to a toolset in `toolset.rs`
//! 4. Add a route in `router.rs` and a dispatch arm in `registry.rs`

pub mod args;
pub mod definitions;
mod error;
pub mod invoker;
pub mod pipeline;
mod registry;
pub mod result;
pub mod router;
mod toolset;

#[cfg(test)]
pub(crate) mod testing;

pub use args::{AllowList, ToolArguments};
pub use error::ToolError;
pub use invoker::{CommandLine, CommandRunner, ProcessRunner};
pub use pipeline::{PipelineTool, ToolContext, run_pipeline};
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use router::build_tool_router;
pub use toolset::Toolset;
