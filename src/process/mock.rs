use super::runner::{CommandOutcome, CommandOutput, CommandRunner};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Command runner returning canned outcomes keyed by full command line.
///
/// Commands without a canned outcome exit with a failure status when the
/// program was registered as installed, and are `NotFound` otherwise.
pub struct MockCommandRunner {
    executables: Mutex<HashMap<String, PathBuf>>,
    responses: Mutex<HashMap<String, CommandOutcome>>,
    invocations: Mutex<Vec<String>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self {
            executables: Mutex::new(HashMap::new()),
            responses: Mutex::new(HashMap::new()),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Register an executable as present on the search path
    pub fn add_executable(&self, name: impl Into<String>) {
        let name = name.into();
        let path = PathBuf::from("/usr/bin").join(&name);
        self.executables.lock().unwrap().insert(name, path);
    }

    pub fn add_response(&self, command_line: impl Into<String>, outcome: CommandOutcome) {
        let command_line = command_line.into();
        if let Some(program) = command_line.split_whitespace().next() {
            self.add_executable(program);
        }
        self.responses.lock().unwrap().insert(command_line, outcome);
    }

    /// Command lines passed to `run`, in call order
    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn was_invoked(&self, command_line: &str) -> bool {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .any(|c| c == command_line)
    }

    pub fn success(stdout: &str) -> CommandOutcome {
        Self::exit(stdout, "", true)
    }

    pub fn failure(stderr: &str) -> CommandOutcome {
        Self::exit("", stderr, false)
    }

    pub fn exit(stdout: &str, stderr: &str, success: bool) -> CommandOutcome {
        CommandOutcome::Exited(CommandOutput {
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
            success,
        })
    }

    fn command_line(program: &str, args: &[&str]) -> String {
        std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for MockCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    fn lookup(&self, executable: &str) -> Option<PathBuf> {
        self.executables.lock().unwrap().get(executable).cloned()
    }

    async fn run(&self, program: &str, args: &[&str]) -> CommandOutcome {
        let command_line = Self::command_line(program, args);
        self.invocations.lock().unwrap().push(command_line.clone());

        if let Some(outcome) = self.responses.lock().unwrap().get(&command_line) {
            return outcome.clone();
        }

        if self.lookup(program).is_some() {
            Self::failure("")
        } else {
            CommandOutcome::NotFound
        }
    }
}
