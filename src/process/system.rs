use super::runner::{CommandOutcome, CommandOutput, CommandRunner};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs real processes with a per-invocation time budget
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    fn lookup(&self, executable: &str) -> Option<PathBuf> {
        which::which(executable).ok()
    }

    async fn run(&self, program: &str, args: &[&str]) -> CommandOutcome {
        debug!(program, ?args, "Running command");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(program, "Executable not found");
                return CommandOutcome::NotFound;
            }
            Err(e) => {
                warn!(program, error = %e, "Failed to spawn command");
                return CommandOutcome::Failed(e.to_string());
            }
        };

        // Dropping the wait future on timeout drops the child, which kills it.
        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                debug!(program, status = %output.status, "Command exited");
                CommandOutcome::Exited(CommandOutput {
                    stdout: output.stdout,
                    stderr: output.stderr,
                    success: output.status.success(),
                })
            }
            Ok(Err(e)) => {
                warn!(program, error = %e, "Failed to collect command output");
                CommandOutcome::Failed(e.to_string())
            }
            Err(_) => {
                warn!(
                    program,
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Command timed out"
                );
                CommandOutcome::TimedOut
            }
        }
    }
}
