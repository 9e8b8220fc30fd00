//! Argument extraction and validation.
//!
//! Tool arguments arrive as an untyped JSON object. Tools pull typed values
//! out of it through [`ToolArguments`] and check constrained values against
//! an [`AllowList`]. This is the only place where untyped input is accepted;
//! each tool turns it into its own parameters struct right away.

use rmcp::model::JsonObject;
use serde_json::Value;

use super::error::ToolError;

/// Read-only view over a tool call's argument map.
#[derive(Debug, Clone, Copy)]
pub struct ToolArguments<'a> {
    map: &'a JsonObject,
}

impl<'a> ToolArguments<'a> {
    pub fn new(map: &'a JsonObject) -> Self {
        Self { map }
    }

    /// A required string argument.
    ///
    /// Fails with `<name> must be a string` when the key is absent or holds
    /// anything other than a string (including `null`).
    pub fn require_str(&self, name: &str) -> Result<&'a str, ToolError> {
        match self.map.get(name) {
            Some(Value::String(value)) => Ok(value),
            _ => Err(ToolError::not_a_string(name)),
        }
    }

    /// An optional string argument with a default for an absent key.
    ///
    /// A present key of the wrong type is still rejected.
    pub fn str_or(&self, name: &str, default: &'a str) -> Result<&'a str, ToolError> {
        match self.map.get(name) {
            None => Ok(default),
            Some(Value::String(value)) => Ok(value),
            Some(_) => Err(ToolError::not_a_string(name)),
        }
    }
}

/// How an [`AllowList`] compares candidates to its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCase {
    Sensitive,
    /// The candidate is lower-cased before comparison; members are stored
    /// lower-case.
    Insensitive,
}

/// Fixed set of acceptable values for a constrained argument.
#[derive(Debug, Clone, Copy)]
pub struct AllowList {
    values: &'static [&'static str],
    case: MatchCase,
}

impl AllowList {
    pub const fn case_sensitive(values: &'static [&'static str]) -> Self {
        Self {
            values,
            case: MatchCase::Sensitive,
        }
    }

    pub const fn case_insensitive(values: &'static [&'static str]) -> Self {
        Self {
            values,
            case: MatchCase::Insensitive,
        }
    }

    /// The canonical member matching `candidate`, if any.
    pub fn find(&self, candidate: &str) -> Option<&'static str> {
        let candidate = match self.case {
            MatchCase::Sensitive => candidate.to_string(),
            MatchCase::Insensitive => candidate.to_lowercase(),
        };
        self.values
            .iter()
            .copied()
            .find(|value| *value == candidate)
    }

    /// Members joined with `", "`, for error messages.
    pub fn joined(&self) -> String {
        self.values.join(", ")
    }
}
