pub mod commands;
pub mod output;

pub use commands::{CliArgs, OutputFormatArg};
pub use output::{write_report, OutputFormat, OutputFormatter, ReportError};
