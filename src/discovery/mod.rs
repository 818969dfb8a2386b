//! Discovery orchestration
//!
//! Runs the discovery phases one after another against a shared
//! [`ProbeContext`] and collects their results into a [`DiscoveryReport`].

mod phases;
mod report;

pub use phases::{ContainerPhase, DatabasePhase, DiscoveryPhase, SystemInfoPhase, WebServerPhase};
pub use report::DiscoveryReport;

use crate::config::HostprobeConfig;
use crate::detection::{DockerDetector, ProbeContext};
use std::time::Instant;
use tracing::{debug, info};

pub struct Discovery {
    context: ProbeContext,
    phases: Vec<Box<dyn DiscoveryPhase>>,
}

impl Discovery {
    /// Standard phase order: system info, web servers, databases, containers
    pub fn new(context: ProbeContext, config: &HostprobeConfig) -> Self {
        let phases: Vec<Box<dyn DiscoveryPhase>> = vec![
            Box::new(SystemInfoPhase),
            Box::new(WebServerPhase::default()),
            Box::new(DatabasePhase::default()),
            Box::new(ContainerPhase::new(DockerDetector::new(
                config.compose_roots.clone(),
                config.compose_max_depth,
            ))),
        ];
        Self::with_phases(context, phases)
    }

    pub fn with_phases(context: ProbeContext, phases: Vec<Box<dyn DiscoveryPhase>>) -> Self {
        Self { context, phases }
    }

    pub fn context(&self) -> &ProbeContext {
        &self.context
    }

    pub async fn run(&self) -> DiscoveryReport {
        let start = Instant::now();
        info!(platform = %self.context.platform, "Starting system discovery");

        let mut report = DiscoveryReport::new();
        for phase in &self.phases {
            info!("Phase: {}", phase.name());
            let phase_start = Instant::now();
            phase.execute(&self.context, &mut report).await;
            debug!(
                "Phase {} complete in {:?}",
                phase.name(),
                phase_start.elapsed()
            );
        }

        info!(
            web_servers = report.web_servers.len(),
            databases = report.databases.len(),
            containers = report.docker_containers.len(),
            elapsed = ?start.elapsed(),
            "System discovery complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::platform::Platform;
    use crate::process::MockCommandRunner;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct RecordingPhase {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl DiscoveryPhase for RecordingPhase {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn execute(&self, _ctx: &ProbeContext, report: &mut DiscoveryReport) {
            self.log.lock().unwrap().push(self.name);
            report.hostname = self.name.to_string();
        }
    }

    fn empty_context() -> ProbeContext {
        ProbeContext::new(
            Arc::new(MockCommandRunner::new()),
            Arc::new(MockFileSystem::new()),
            Platform::Linux,
        )
    }

    #[tokio::test]
    async fn test_phases_run_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let phases: Vec<Box<dyn DiscoveryPhase>> = ["first", "second", "third"]
            .into_iter()
            .map(|name| {
                Box::new(RecordingPhase {
                    name,
                    log: log.clone(),
                }) as Box<dyn DiscoveryPhase>
            })
            .collect();

        let report = Discovery::with_phases(empty_context(), phases).run().await;

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
        assert_eq!(report.hostname, "third");
    }

    #[tokio::test]
    async fn test_empty_host_reports_nothing_installed() {
        let discovery = Discovery::new(empty_context(), &HostprobeConfig::builtin());
        let report = discovery.run().await;

        assert!(report.web_servers.is_empty());
        assert!(report.databases.is_empty());
        assert!(report.container_runtime.is_none());
        assert!(report.docker_containers.is_empty());
        assert_eq!(report.system_info.os_name, "Linux");
    }
}
