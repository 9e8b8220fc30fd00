//! Test doubles shared by the tool tests.

use async_trait::async_trait;
use rmcp::model::JsonObject;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use super::error::ToolError;
use super::invoker::{CommandLine, CommandRunner};
use super::pipeline::ToolContext;
use crate::core::audit::{AuditLog, AuditSink};

/// Runner that records every command and answers with a canned outcome.
///
/// When watching an [`AuditBuffer`], it also keeps the audit lines present
/// at the moment of each call.
pub struct RecordingRunner {
    outcome: Result<Vec<u8>, ToolError>,
    calls: Mutex<Vec<CommandLine>>,
    audit: OnceLock<AuditBuffer>,
    audit_at_calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingRunner {
    pub fn succeeding(output: &str) -> Self {
        Self::with_outcome(Ok(output.as_bytes().to_vec()))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_outcome(Err(ToolError::external(message)))
    }

    fn with_outcome(outcome: Result<Vec<u8>, ToolError>) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
            audit: OnceLock::new(),
            audit_at_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn watch_audit(&self, audit: AuditBuffer) {
        let _ = self.audit.set(audit);
    }

    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.lock().unwrap().clone()
    }

    /// Audit lines already written when each command started.
    pub fn audit_at_calls(&self) -> Vec<Vec<String>> {
        self.audit_at_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(
        &self,
        command: &CommandLine,
        _cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ToolError> {
        self.calls.lock().unwrap().push(command.clone());
        if let Some(audit) = self.audit.get() {
            self.audit_at_calls.lock().unwrap().push(audit.lines());
        }
        self.outcome.clone()
    }
}

/// Runner whose commands only end when their request is cancelled.
#[derive(Default)]
pub struct BlockingRunner {
    started: Notify,
}

impl BlockingRunner {
    /// Resolves once a command has started.
    pub async fn started(&self) {
        self.started.notified().await;
    }
}

#[async_trait]
impl CommandRunner for BlockingRunner {
    async fn run(
        &self,
        _command: &CommandLine,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ToolError> {
        self.started.notify_one();
        cancel.cancelled().await;
        Err(ToolError::Cancelled)
    }
}

/// In-memory audit sink.
#[derive(Clone, Default)]
pub struct AuditBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for AuditBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AuditBuffer {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Tool context around any runner, auditing into memory. Fetches use `curl`.
pub fn context_with_runner(runner: Arc<dyn CommandRunner>) -> (Arc<ToolContext>, AuditBuffer) {
    context_with_program(runner, "curl")
}

/// Tool context whose fetches run `program` instead of curl.
pub fn context_with_program(
    runner: Arc<dyn CommandRunner>,
    program: &str,
) -> (Arc<ToolContext>, AuditBuffer) {
    let buffer = AuditBuffer::default();
    let sink = buffer.clone();
    let audit = AuditLog::with_opener(move || Ok(Box::new(sink.clone()) as AuditSink));
    let ctx = ToolContext::new(Arc::new(audit), runner, program);
    (Arc::new(ctx), buffer)
}

/// Tool context around a [`RecordingRunner`], auditing into memory.
pub fn test_context(
    runner: RecordingRunner,
) -> (Arc<ToolContext>, Arc<RecordingRunner>, AuditBuffer) {
    let runner = Arc::new(runner);
    let (ctx, buffer) = context_with_runner(runner.clone());
    runner.watch_audit(buffer.clone());
    (ctx, runner, buffer)
}

/// Unwrap a JSON object literal into an argument map.
pub fn object(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}
