//! External command invocation.
//!
//! A [`CommandLine`] is a program plus discrete arguments; user input is
//! always one whole argument and never passes through a shell. A
//! [`CommandRunner`] executes it against the request's cancellation token and
//! returns the captured stdout.
//!
//! [`ProcessRunner`] is the real implementation. Only stdout is captured;
//! stderr is discarded and stdin is closed. A non-zero exit or a failed spawn
//! surfaces as [`ToolError::ExternalOperation`] with the underlying
//! diagnostic as its text. Cancellation or timeout kills the child and waits
//! for it, so no process outlives the request.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use super::error::ToolError;

/// A fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument, passed to the program as-is.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// `<program> -s <url>`: silent fetch of a single URL.
    pub fn fetch(program: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(program).arg("-s").arg(url)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Executes external commands on behalf of tools.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` to completion and return its stdout.
    ///
    /// Must stop the command and return promptly once `cancel` fires.
    async fn run(
        &self,
        command: &CommandLine,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ToolError>;
}

/// Runs commands as child processes with `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// A runner bounded only by cancellation when `timeout` is `None`.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    async fn deadline(&self) {
        match self.timeout {
            Some(timeout) => tokio::time::sleep(timeout).await,
            None => std::future::pending().await,
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(program = %command.program))]
    async fn run(
        &self,
        command: &CommandLine,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ToolError> {
        debug!("Spawning {}", command);

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ToolError::external(e.to_string()))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| ToolError::external("failed to capture stdout"))?;

        let finished = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ToolError::Cancelled),
            _ = self.deadline() => Err(ToolError::TimedOut(self.timeout.unwrap_or_default())),
            collected = async {
                let mut output = Vec::new();
                stdout.read_to_end(&mut output).await?;
                let status = child.wait().await?;
                Ok::<_, std::io::Error>((status, output))
            } => Ok(collected),
        };

        match finished {
            Ok(Ok((status, output))) if status.success() => Ok(output),
            Ok(Ok((status, _))) => {
                debug!("{} failed: {}", command.program, status);
                Err(ToolError::external(status.to_string()))
            }
            Ok(Err(e)) => Err(ToolError::external(e.to_string())),
            Err(interrupted) => {
                // kill() also reaps the child
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill {}: {}", command.program, e);
                }
                Err(interrupted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn available(program: &str) -> bool {
        std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("command -v {}", program))
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_fetch_command_line() {
        let command = CommandLine::fetch("curl", "http://wttr.in/Berlin?format=3");
        assert_eq!(command.program, "curl");
        assert_eq!(command.args, vec!["-s", "http://wttr.in/Berlin?format=3"]);
        assert_eq!(
            command.to_string(),
            "curl -s http://wttr.in/Berlin?format=3"
        );
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        if !available("echo") {
            return;
        }
        let runner = ProcessRunner::default();
        let output = runner
            .run(
                &CommandLine::new("echo").arg("hello world"),
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(output, b"hello world\n");
    }

    #[tokio::test]
    async fn test_argument_is_not_shell_interpreted() {
        if !available("echo") {
            return;
        }
        let runner = ProcessRunner::default();
        let output = runner
            .run(
                &CommandLine::new("echo").arg("$HOME; rm -rf /"),
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(output, b"$HOME; rm -rf /\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_reports_exit_status() {
        if !available("false") {
            return;
        }
        let runner = ProcessRunner::default();
        let err = runner
            .run(&CommandLine::new("false"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ExternalOperation(_)));
        assert!(err.to_string().contains("exit status"), "got: {}", err);
    }

    #[tokio::test]
    async fn test_missing_program_is_external_failure() {
        let runner = ProcessRunner::default();
        let err = runner
            .run(
                &CommandLine::new("definitely-not-a-real-program-4711"),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ExternalOperation(_)));
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_empty_output_is_success() {
        if !available("true") {
            return;
        }
        let runner = ProcessRunner::default();
        let output = runner
            .run(&CommandLine::new("true"), &CancellationToken::new())
            .await
            .unwrap();
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_kills_child_promptly() {
        if !available("sleep") {
            return;
        }
        let runner = ProcessRunner::default();
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let err = runner
            .run(&CommandLine::new("sleep").arg("30"), &cancel)
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_already_cancelled_token() {
        if !available("sleep") {
            return;
        }
        let runner = ProcessRunner::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = runner
            .run(&CommandLine::new("sleep").arg("30"), &cancel)
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::Cancelled);
    }

    #[tokio::test]
    async fn test_timeout_kills_child() {
        if !available("sleep") {
            return;
        }
        let runner = ProcessRunner::new(Some(Duration::from_millis(100)));
        let started = Instant::now();
        let err = runner
            .run(
                &CommandLine::new("sleep").arg("30"),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::TimedOut(Duration::from_millis(100)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
