use async_trait::async_trait;
use std::path::PathBuf;

/// Captured result of a process that ran to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub success: bool,
}

impl CommandOutput {
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Stdout followed by stderr, for tools that report on the error stream
    pub fn combined_text(&self) -> String {
        let mut combined = self.stdout.clone();
        combined.extend_from_slice(&self.stderr);
        String::from_utf8_lossy(&combined).into_owned()
    }
}

/// Outcome of invoking an external executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The executable does not exist on this host
    NotFound,
    /// The process exceeded the per-call time budget and was killed
    TimedOut,
    /// The process could not be spawned or awaited
    Failed(String),
    /// The process exited, successfully or not
    Exited(CommandOutput),
}

impl CommandOutcome {
    pub fn output(&self) -> Option<&CommandOutput> {
        match self {
            CommandOutcome::Exited(output) => Some(output),
            _ => None,
        }
    }

    /// Output of a process that exited with status zero
    pub fn successful(&self) -> Option<&CommandOutput> {
        self.output().filter(|o| o.success)
    }

    pub fn succeeded(&self) -> bool {
        self.successful().is_some()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CommandOutcome::NotFound)
    }
}

/// The engine's only door to external processes
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Resolve an executable name against the search path
    fn lookup(&self, executable: &str) -> Option<PathBuf>;

    /// Run an executable to completion; never fails for a missing binary
    async fn run(&self, program: &str, args: &[&str]) -> CommandOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exited(stdout: &str, stderr: &str, success: bool) -> CommandOutcome {
        CommandOutcome::Exited(CommandOutput {
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
            success,
        })
    }

    #[test]
    fn test_combined_text_appends_stderr() {
        let outcome = exited("out\n", "err\n", true);
        let output = outcome.output().unwrap();
        assert_eq!(output.stdout_text(), "out\n");
        assert_eq!(output.combined_text(), "out\nerr\n");
    }

    #[test]
    fn test_successful_filters_failed_exit() {
        assert!(exited("", "", true).succeeded());
        assert!(!exited("", "", false).succeeded());
        assert!(exited("", "", false).output().is_some());
    }

    #[test]
    fn test_non_exit_outcomes_have_no_output() {
        for outcome in [
            CommandOutcome::NotFound,
            CommandOutcome::TimedOut,
            CommandOutcome::Failed("spawn".into()),
        ] {
            assert!(outcome.output().is_none());
            assert!(!outcome.succeeded());
        }
        assert!(CommandOutcome::NotFound.is_not_found());
        assert!(!CommandOutcome::TimedOut.is_not_found());
    }
}
