//! Per-platform service status resolution
//!
//! Each strategy walks a fixed fallback chain of service-manager queries and
//! stops at the first one that confirms the service is running. Strategies are
//! only consulted for services already known to be installed.

use crate::detection::ServiceStatus;
use crate::platform::Platform;
use crate::process::CommandRunner;
use async_trait::async_trait;
use tracing::debug;

/// Service unit names to query, primary first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceNames {
    pub primary: &'static str,
    pub alternate: Option<&'static str>,
}

impl ServiceNames {
    pub const fn new(primary: &'static str) -> Self {
        Self {
            primary,
            alternate: None,
        }
    }

    pub const fn with_alternate(primary: &'static str, alternate: &'static str) -> Self {
        Self {
            primary,
            alternate: Some(alternate),
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.primary).chain(self.alternate)
    }
}

#[async_trait]
pub trait StatusStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn resolve(&self, runner: &dyn CommandRunner, names: &ServiceNames) -> ServiceStatus;
}

pub fn strategy_for(platform: &Platform) -> Box<dyn StatusStrategy> {
    match platform {
        Platform::Linux => Box::new(LinuxStatus),
        Platform::MacOs => Box::new(MacOsStatus),
        Platform::Windows => Box::new(WindowsStatus),
        Platform::Other(_) => Box::new(UnsupportedStatus),
    }
}

async fn process_running(runner: &dyn CommandRunner, name: &str) -> bool {
    runner.run("pgrep", &["-x", name]).await.succeeded()
}

/// systemd, then SysV `service`, then the process table
pub struct LinuxStatus;

#[async_trait]
impl StatusStrategy for LinuxStatus {
    fn name(&self) -> &'static str {
        "linux"
    }

    async fn resolve(&self, runner: &dyn CommandRunner, names: &ServiceNames) -> ServiceStatus {
        for name in names.all() {
            if runner.run("systemctl", &["is-active", name]).await.succeeded() {
                debug!(service = name, "systemd reports service active");
                return ServiceStatus::Running;
            }
        }

        if runner
            .run("service", &[names.primary, "status"])
            .await
            .succeeded()
        {
            debug!(service = names.primary, "service(8) reports service running");
            return ServiceStatus::Running;
        }

        for name in names.all() {
            if process_running(runner, name).await {
                debug!(service = name, "Found matching process");
                return ServiceStatus::Running;
            }
        }

        ServiceStatus::InstalledNotRunning
    }
}

/// launchd, then Homebrew services, then the process table
pub struct MacOsStatus;

#[async_trait]
impl StatusStrategy for MacOsStatus {
    fn name(&self) -> &'static str {
        "macos"
    }

    async fn resolve(&self, runner: &dyn CommandRunner, names: &ServiceNames) -> ServiceStatus {
        if let Some(output) = runner.run("launchctl", &["list"]).await.successful() {
            let listing = output.stdout_text();
            if names.all().any(|name| listing.contains(name)) {
                debug!(service = names.primary, "launchctl lists service");
                return ServiceStatus::Running;
            }
        }

        if let Some(output) = runner.run("brew", &["services", "list"]).await.successful() {
            let listing = output.stdout_text();
            if names.all().any(|name| brew_service_started(&listing, name)) {
                debug!(service = names.primary, "Homebrew reports service started");
                return ServiceStatus::Running;
            }
        }

        for name in names.all() {
            if process_running(runner, name).await {
                debug!(service = name, "Found matching process");
                return ServiceStatus::Running;
            }
        }

        ServiceStatus::InstalledNotRunning
    }
}

/// `brew services list` rows are `<name> <status> <user> <file>`
fn brew_service_started(listing: &str, name: &str) -> bool {
    listing.lines().any(|line| {
        let mut columns = line.split_whitespace();
        columns.next() == Some(name) && columns.next() == Some("started")
    })
}

/// Service Control Manager query per candidate name
pub struct WindowsStatus;

#[async_trait]
impl StatusStrategy for WindowsStatus {
    fn name(&self) -> &'static str {
        "windows"
    }

    async fn resolve(&self, runner: &dyn CommandRunner, names: &ServiceNames) -> ServiceStatus {
        for name in names.all() {
            if let Some(output) = runner.run("sc", &["query", name]).await.successful() {
                if output.stdout_text().contains("RUNNING") {
                    debug!(service = name, "SCM reports service running");
                    return ServiceStatus::Running;
                }
            }
        }

        ServiceStatus::InstalledNotRunning
    }
}

pub struct UnsupportedStatus;

#[async_trait]
impl StatusStrategy for UnsupportedStatus {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    async fn resolve(&self, _runner: &dyn CommandRunner, _names: &ServiceNames) -> ServiceStatus {
        ServiceStatus::Unknown
    }
}
