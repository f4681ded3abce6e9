//! Canned command runner for unit tests

#![allow(clippy::unwrap_used)] // Test helper can use unwrap

use super::{CommandOutput, CommandRunner, RunnerError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

enum Reply {
    Output(CommandOutput),
    SpawnFailure(String),
}

/// Returns the same reply for every call and records invocations
#[derive(Clone)]
pub struct MockRunner {
    reply: Arc<Reply>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockRunner {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply: Arc::new(reply),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Successful run printing `stdout`
    pub fn stdout(stdout: &str) -> Self {
        Self::with_reply(Reply::Output(CommandOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_status: 0,
        }))
    }

    /// Completed run with a non-zero exit status
    pub fn exit(exit_status: i32, stderr: &str) -> Self {
        Self::with_reply(Reply::Output(CommandOutput {
            stdout: String::new(),
            stderr: stderr.to_string(),
            exit_status,
        }))
    }

    /// Program could not be started at all
    pub fn spawn_failure(message: &str) -> Self {
        Self::with_reply(Reply::SpawnFailure(message.to_string()))
    }

    /// Every invocation so far, program first
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, RunnerError> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(|a| a.to_string()));
        self.calls.lock().unwrap().push(call);

        match self.reply.as_ref() {
            Reply::Output(output) => Ok(output.clone()),
            Reply::SpawnFailure(message) => Err(RunnerError::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, message.clone()),
            }),
        }
    }
}
