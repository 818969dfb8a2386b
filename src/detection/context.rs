//! Probe context for managing detector dependencies

use std::path::PathBuf;
use std::sync::Arc;

use crate::fs::FileSystem;
use crate::platform::Platform;
use crate::process::CommandRunner;
use crate::resolve::{strategy_for, ConfigLocator, ServiceNames, StatusStrategy};

use super::types::ServiceStatus;

/// Context that owns the host-facing dependencies shared by every detector
pub struct ProbeContext {
    /// Process probe
    pub runner: Arc<dyn CommandRunner>,

    /// File system abstraction
    pub file_system: Arc<dyn FileSystem>,

    /// Platform the probe runs on
    pub platform: Platform,

    status_strategy: Box<dyn StatusStrategy>,
}

impl ProbeContext {
    /// Create a context whose status strategy matches `platform`
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        file_system: Arc<dyn FileSystem>,
        platform: Platform,
    ) -> Self {
        let status_strategy = strategy_for(&platform);
        Self {
            runner,
            file_system,
            platform,
            status_strategy,
        }
    }

    pub fn with_status_strategy(mut self, strategy: Box<dyn StatusStrategy>) -> Self {
        self.status_strategy = strategy;
        self
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.file_system.as_ref()
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    pub fn status_strategy(&self) -> &dyn StatusStrategy {
        self.status_strategy.as_ref()
    }

    pub fn locator(&self) -> ConfigLocator<'_> {
        ConfigLocator::new(self.runner(), self.fs(), &self.platform)
    }

    /// First of `executables` found on the search path
    pub fn find_executable(&self, executables: &[&str]) -> Option<PathBuf> {
        executables
            .iter()
            .find_map(|executable| self.runner.lookup(executable))
    }

    pub async fn service_status(&self, names: &ServiceNames) -> ServiceStatus {
        self.status_strategy.resolve(self.runner(), names).await
    }
}
