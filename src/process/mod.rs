//! Process probe: the single narrow interface to external executables

mod mock;
mod runner;
mod system;

pub use mock::MockCommandRunner;
pub use runner::{CommandOutcome, CommandOutput, CommandRunner};
pub use system::{SystemCommandRunner, DEFAULT_COMMAND_TIMEOUT};
