use super::report::DiscoveryReport;
use crate::detection::{
    hostname, DatabaseDetector, Detector, DockerDetector, ProbeContext, SystemInfoDetector,
    WebServerDetector,
};
use async_trait::async_trait;
use tracing::info;

#[async_trait]
pub trait DiscoveryPhase: Send + Sync {
    fn name(&self) -> &'static str;

    async fn execute(&self, ctx: &ProbeContext, report: &mut DiscoveryReport);
}

pub struct SystemInfoPhase;

#[async_trait]
impl DiscoveryPhase for SystemInfoPhase {
    fn name(&self) -> &'static str {
        "SystemInfoPhase"
    }

    async fn execute(&self, ctx: &ProbeContext, report: &mut DiscoveryReport) {
        report.hostname = hostname();
        report.system_info = SystemInfoDetector.detect(ctx).await;
    }
}

pub struct WebServerPhase {
    detectors: Vec<WebServerDetector>,
}

impl WebServerPhase {
    pub fn new(detectors: Vec<WebServerDetector>) -> Self {
        Self { detectors }
    }
}

impl Default for WebServerPhase {
    fn default() -> Self {
        Self::new(WebServerDetector::all())
    }
}

#[async_trait]
impl DiscoveryPhase for WebServerPhase {
    fn name(&self) -> &'static str {
        "WebServerPhase"
    }

    async fn execute(&self, ctx: &ProbeContext, report: &mut DiscoveryReport) {
        for detector in &self.detectors {
            let descriptor = detector.detect(ctx).await;
            if descriptor.installed {
                report.web_servers.push(descriptor);
            }
        }
        info!(count = report.web_servers.len(), "Detected web servers");
    }
}

pub struct DatabasePhase {
    detectors: Vec<DatabaseDetector>,
}

impl DatabasePhase {
    pub fn new(detectors: Vec<DatabaseDetector>) -> Self {
        Self { detectors }
    }
}

impl Default for DatabasePhase {
    fn default() -> Self {
        Self::new(DatabaseDetector::all())
    }
}

#[async_trait]
impl DiscoveryPhase for DatabasePhase {
    fn name(&self) -> &'static str {
        "DatabasePhase"
    }

    async fn execute(&self, ctx: &ProbeContext, report: &mut DiscoveryReport) {
        for detector in &self.detectors {
            let descriptor = detector.detect(ctx).await;
            if descriptor.installed {
                report.databases.push(descriptor);
            }
        }
        info!(count = report.databases.len(), "Detected databases");
    }
}

pub struct ContainerPhase {
    detector: DockerDetector,
}

impl ContainerPhase {
    pub fn new(detector: DockerDetector) -> Self {
        Self { detector }
    }
}

#[async_trait]
impl DiscoveryPhase for ContainerPhase {
    fn name(&self) -> &'static str {
        "ContainerPhase"
    }

    async fn execute(&self, ctx: &ProbeContext, report: &mut DiscoveryReport) {
        let inventory = self.detector.detect(ctx).await;
        if inventory.runtime.installed {
            report.container_runtime = Some(inventory.runtime);
        }
        report.docker_containers.extend(inventory.containers);
        report.compose_files.extend(inventory.compose_files);
    }
}
