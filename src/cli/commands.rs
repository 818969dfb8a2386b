use crate::cli::output::OutputFormat;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "system_discovery.log";
const DEFAULT_REPORT_STEM: &str = "system_discovery_report";

/// Host inventory probe for web servers, databases and container workloads
#[derive(Parser, Debug)]
#[command(
    name = "hostprobe",
    about = "Host inventory probe for web servers, databases and container workloads",
    version,
    author,
    long_about = "hostprobe inspects the local host for installed web servers (Apache, Nginx, \
                  Lighttpd, Caddy), databases (MySQL, PostgreSQL) and Docker workloads, \
                  resolves their configuration files and content roots, and writes a \
                  structured report.\n\n\
                  Examples:\n  \
                  hostprobe\n  \
                  hostprobe --format json --output report.json\n  \
                  hostprobe --log /var/log/hostprobe.log --stdout false"
)]
pub struct CliArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "yaml",
        help = "Report format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Report file (default: system_discovery_report.<format>)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long = "log",
        value_name = "FILE",
        default_value = DEFAULT_LOG_FILE,
        help = "Log file"
    )]
    pub log_file: PathBuf,

    #[arg(
        long = "stdout",
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        help = "Log to stdout as well as the log file"
    )]
    pub log_to_stdout: bool,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Time budget for each external command (overrides HOSTPROBE_COMMAND_TIMEOUT)"
    )]
    pub timeout: Option<u64>,
}

impl CliArgs {
    /// Report path, derived from the format when not given
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let format = OutputFormat::from(self.format);
            PathBuf::from(format!("{}.{}", DEFAULT_REPORT_STEM, format.extension()))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Yaml,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}
