//! Append-only audit log of tool traffic.
//!
//! Every tool invocation writes one `REQUEST` record and one outcome record
//! (`RESPONSE` or `ERROR`). Records are single lines:
//!
//! ```text
//! [REQUEST][use_curl][2025-01-01T12:00:00Z] {"name":"use_curl","arguments":{...}}
//! ```
//!
//! The sink is opened lazily on the first record, exactly once per
//! [`AuditLog`], no matter how many handlers race to write first. Writes are
//! serialized through a mutex so records never interleave. Audit failures are
//! reported through `tracing` and never reach the caller.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing::{debug, warn};

/// Writer the audit records end up in.
pub type AuditSink = Box<dyn Write + Send>;

type SinkOpener = dyn Fn() -> io::Result<AuditSink> + Send + Sync;

/// Direction tag of an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Request,
    Response,
    Error,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Request => "REQUEST",
            Self::Response => "RESPONSE",
            Self::Error => "ERROR",
        })
    }
}

/// Shared audit logger, constructed once at startup and handed to every tool.
pub struct AuditLog {
    target: String,
    opener: Box<SinkOpener>,
    sink: OnceLock<Option<Mutex<AuditSink>>>,
}

impl AuditLog {
    /// Audit log appending to the file at `path`, created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let target = path.display().to_string();
        let mut log = Self::with_opener(move || open_append(&path));
        log.target = target;
        log
    }

    /// Audit log writing to whatever `opener` produces.
    ///
    /// `opener` runs at most once, on the first record.
    pub fn with_opener<F>(opener: F) -> Self
    where
        F: Fn() -> io::Result<AuditSink> + Send + Sync + 'static,
    {
        Self {
            target: "custom sink".to_string(),
            opener: Box::new(opener),
            sink: OnceLock::new(),
        }
    }

    /// Record an inbound request payload.
    pub fn record_request<T: Serialize + ?Sized>(&self, tool: &str, payload: &T) {
        self.record_json(Direction::Request, tool, payload);
    }

    /// Record a successful response payload.
    pub fn record_response<T: Serialize + ?Sized>(&self, tool: &str, payload: &T) {
        self.record_json(Direction::Response, tool, payload);
    }

    /// Record a failure as plain text.
    pub fn record_error(&self, tool: &str, error: &dyn fmt::Display) {
        self.append(Direction::Error, tool, &error.to_string());
    }

    fn record_json<T: Serialize + ?Sized>(&self, direction: Direction, tool: &str, payload: &T) {
        match serde_json::to_string(payload) {
            Ok(json) => self.append(direction, tool, &json),
            Err(e) => self.append(direction, tool, &format!("Could not marshal value: {}", e)),
        }
    }

    fn sink(&self) -> Option<&Mutex<AuditSink>> {
        self.sink
            .get_or_init(|| match (self.opener)() {
                Ok(sink) => {
                    debug!("Audit log opened: {}", self.target);
                    Some(Mutex::new(sink))
                }
                Err(e) => {
                    warn!(
                        "Audit log {} unavailable, records dropped: {}",
                        self.target, e
                    );
                    None
                }
            })
            .as_ref()
    }

    fn append(&self, direction: Direction, tool: &str, payload: &str) {
        let Some(sink) = self.sink() else {
            return;
        };

        let line = format_record(direction, tool, &timestamp(), payload);

        let mut sink = sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = sink.write_all(line.as_bytes()).and_then(|_| sink.flush()) {
            warn!("Failed to write audit record for {}: {}", tool, e);
        }
    }
}

impl fmt::Debug for AuditLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLog")
            .field("target", &self.target)
            .field("opened", &self.sink.get().is_some())
            .finish()
    }
}

fn open_append(path: &Path) -> io::Result<AuditSink> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Box::new(file))
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// One record line. Embedded newlines are escaped to keep one record per line.
fn format_record(direction: Direction, tool: &str, timestamp: &str, payload: &str) -> String {
    format!(
        "[{}][{}][{}] {}\n",
        direction,
        tool,
        timestamp,
        payload.replace('\n', "\\n")
    )
}
