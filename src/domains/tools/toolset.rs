//! Toolsets: which tools one server process exposes.
//!
//! The tools can be deployed as separate single-purpose servers (one per
//! toolset) or together in one process (`all`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::definitions::{CurlTool, IpInfoTool, RandomTool, TimeTool, WeatherTool};
use super::pipeline::PipelineTool;
use crate::core::{Error, Result};

/// A named group of tools served together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toolset {
    /// Every tool in one process.
    #[default]
    All,
    /// URL fetching and IP information.
    Curl,
    /// Random beers, jobs, foods and hobbies.
    Random,
    /// Current date and time.
    Time,
    /// Weather reports.
    Weather,
}

impl Toolset {
    /// Conventional server name reported to clients.
    pub fn server_name(self) -> &'static str {
        match self {
            Self::All => "mcp-toolbox",
            Self::Curl => "mcp-curl",
            Self::Random => "mcp-random",
            Self::Time => "mcp-time",
            Self::Weather => "mcp-weather",
        }
    }

    /// Names of the tools in this toolset.
    pub fn tool_names(self) -> &'static [&'static str] {
        const CURL: &[&str] = &[CurlTool::NAME, IpInfoTool::NAME];
        const RANDOM: &[&str] = &[RandomTool::NAME];
        const TIME: &[&str] = &[TimeTool::NAME];
        const WEATHER: &[&str] = &[WeatherTool::NAME];
        const ALL: &[&str] = &[
            CurlTool::NAME,
            IpInfoTool::NAME,
            RandomTool::NAME,
            TimeTool::NAME,
            WeatherTool::NAME,
        ];

        match self {
            Self::All => ALL,
            Self::Curl => CURL,
            Self::Random => RANDOM,
            Self::Time => TIME,
            Self::Weather => WEATHER,
        }
    }

    pub fn includes(self, tool: &str) -> bool {
        self.tool_names().contains(&tool)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Curl => "curl",
            Self::Random => "random",
            Self::Time => "time",
            Self::Weather => "weather",
        }
    }
}

impl fmt::Display for Toolset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Toolset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "curl" => Ok(Self::Curl),
            "random" => Ok(Self::Random),
            "time" => Ok(Self::Time),
            "weather" => Ok(Self::Weather),
            other => Err(Error::config(format!(
                "unknown toolset {:?} (expected all, curl, random, time or weather)",
                other
            ))),
        }
    }
}
