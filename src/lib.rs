//! hostprobe - host inventory probe
//!
//! Inspects the local host for installed web servers, databases and container
//! workloads, resolves where each service keeps its configuration and content,
//! and produces a structured [`DiscoveryReport`].
//!
//! # Core Concepts
//!
//! - **Process probe**: every external command goes through [`CommandRunner`],
//!   which turns missing programs, timeouts and failures into values instead
//!   of errors
//! - **Dialects**: each configuration language is a declarative
//!   [`resolve::Dialect`] read by one shared extractor
//! - **Detectors**: per-service components that combine executable lookup,
//!   status, config location and extraction into a descriptor
//! - **Discovery**: the ordered phases that fill a report
//!
//! # Example Usage
//!
//! ```no_run
//! use hostprobe::{Discovery, HostprobeConfig, Platform, ProbeContext};
//! use hostprobe::fs::RealFileSystem;
//! use hostprobe::process::SystemCommandRunner;
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let config = HostprobeConfig::builtin();
//! let context = ProbeContext::new(
//!     Arc::new(SystemCommandRunner::new(config.command_timeout())),
//!     Arc::new(RealFileSystem::new()),
//!     Platform::current(),
//! );
//!
//! let report = Discovery::new(context, &config).run().await;
//! println!("{} web servers found", report.web_servers.len());
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`process`]: command execution with time budgets
//! - [`fs`]: file system abstraction with a mock for tests
//! - [`resolve`]: dialects, extraction, includes, config location and status
//! - [`detection`]: per-service detectors and result types
//! - [`discovery`]: phase orchestration and the report
//! - [`cli`]: argument parsing and report output

pub mod cli;
pub mod config;
pub mod detection;
pub mod discovery;
pub mod fs;
pub mod platform;
pub mod process;
pub mod resolve;
pub mod util;

pub use config::{ConfigError, HostprobeConfig};
pub use detection::{
    ContainerRecord, DatabaseDescriptor, Detector, ProbeContext, ServiceDescriptor, ServiceKind,
    ServiceStatus, SystemInfo,
};
pub use discovery::{Discovery, DiscoveryReport};
pub use platform::Platform;
pub use process::{CommandOutcome, CommandRunner};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "hostprobe");
    }
}
