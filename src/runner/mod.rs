//! External command execution
//!
//! The status service never spawns processes directly; it goes through the
//! [`CommandRunner`] trait so tests can substitute canned output.

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Errors raised when a program cannot be run to completion
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, or -1 when the process was terminated by a signal
    pub exit_status: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_status == 0
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, RunnerError>;
}

/// Runs programs on the host with `tokio::process`
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    timeout: Option<Duration>,
}

impl SystemCommandRunner {
    /// Create a runner that waits for every command to finish
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Bound each command; the child is killed once the limit passes
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, RunnerError> {
        debug!(program = program, args = ?args, "Running external command");

        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::null()).kill_on_drop(true);
        let child = command.output();

        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child).await.map_err(|_| {
                RunnerError::Timeout {
                    program: program.to_string(),
                    timeout,
                }
            })?,
            None => child.await,
        };

        let output = result.map_err(|source| RunnerError::Spawn {
            program: program.to_string(),
            source,
        })?;

        let exit_status = output.status.code().unwrap_or(-1);
        debug!(program = program, exit_status, "External command finished");

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_status,
        })
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
