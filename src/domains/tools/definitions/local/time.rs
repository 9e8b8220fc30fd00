//! Current time tool definition.
//!
//! Reports the local date and time together with the host name.

use async_trait::async_trait;
use chrono::{DateTime, Local, Offset, TimeZone};
use schemars::JsonSchema;
use serde::Deserialize;
use std::fmt::Display;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::domains::tools::{PipelineTool, ToolArguments, ToolContext, ToolError};

/// e.g. `Monday, 02 Jan 2006, 15:04:05`
const TIME_FORMAT: &str = "%A, %d %b %Y, %H:%M:%S";

/// The time tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TimeParams {}

/// Current time tool.
pub struct TimeTool;

impl TimeTool {
    /// `It's now <time> <zone> on <host>`.
    pub fn describe<Tz>(now: &DateTime<Tz>, host: &str) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        format!(
            "It's now {} {} on {}",
            now.format(TIME_FORMAT),
            Self::zone(now),
            host
        )
    }

    /// `UTC` for a zero offset, otherwise the numeric offset (`+01:00`).
    ///
    /// The local offset carries no zone abbreviation.
    fn zone<Tz>(now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match now.offset().fix().local_minus_utc() {
            0 => "UTC".to_string(),
            _ => now.format("%:z").to_string(),
        }
    }

    /// Host name, or empty when it can't be determined.
    fn host_name() -> String {
        match hostname::get() {
            Ok(name) => name.to_string_lossy().into_owned(),
            Err(e) => {
                warn!("Could not determine host name: {}", e);
                String::new()
            }
        }
    }
}

#[async_trait]
impl PipelineTool for TimeTool {
    const NAME: &'static str = "use_time";
    const DESCRIPTION: &'static str = "fetch the current date and time";
    type Params = TimeParams;

    fn parse(_args: ToolArguments<'_>) -> Result<Self::Params, ToolError> {
        Ok(TimeParams::default())
    }

    async fn invoke(
        _params: Self::Params,
        _ctx: &ToolContext,
        _cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ToolError> {
        Ok(Self::describe(&Local::now(), &Self::host_name()).into_bytes())
    }
}
