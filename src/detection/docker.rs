use super::compose::discover_compose_files;
use super::context::ProbeContext;
use super::types::{
    ContainerRecord, ManagedBy, ServiceDescriptor, ServiceKind, ServiceStatus, NOT_APPLICABLE,
    UNKNOWN,
};
use super::Detector;
use crate::fs::FileSystem;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const COMPOSE_PROJECT_LABEL: &str = "com.docker.compose.project";
const COMPOSE_SERVICE_LABEL: &str = "com.docker.compose.service";
const COMPOSE_WORKING_DIR_LABEL: &str = "com.docker.compose.project.working_dir";
const COMPOSE_CONFIG_FILES_LABEL: &str = "com.docker.compose.project.config_files";

/// Runtime state, running containers and compose files found on disk
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerInventory {
    pub runtime: ServiceDescriptor,
    pub containers: Vec<ContainerRecord>,
    pub compose_available: bool,
    pub compose_files: Vec<PathBuf>,
}

impl ContainerInventory {
    fn not_installed() -> Self {
        Self {
            runtime: ServiceDescriptor::not_installed(ServiceKind::Docker),
            containers: Vec::new(),
            compose_available: false,
            compose_files: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct InspectedContainer {
    name: String,
    config: InspectedConfig,
    network_settings: InspectedNetworkSettings,
    mounts: Vec<InspectedMount>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct InspectedConfig {
    image: String,
    labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct InspectedNetworkSettings {
    ports: Option<BTreeMap<String, Option<Vec<PortBinding>>>>,
    networks: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct PortBinding {
    host_port: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct InspectedMount {
    source: String,
    destination: String,
}

pub struct DockerDetector {
    compose_roots: Vec<PathBuf>,
    compose_max_depth: usize,
}

impl DockerDetector {
    pub fn new(compose_roots: Vec<PathBuf>, compose_max_depth: usize) -> Self {
        Self {
            compose_roots,
            compose_max_depth,
        }
    }

    async fn list_containers(&self, ctx: &ProbeContext) -> Vec<ContainerRecord> {
        let listing = ctx.runner().run("docker", &["ps", "--format", "{{.ID}}"]).await;
        let Some(output) = listing.successful() else {
            warn!(outcome = ?listing, "Failed to list running containers");
            return Vec::new();
        };

        let mut containers = Vec::new();
        for id in output.stdout_text().split_whitespace() {
            containers.push(self.inspect(ctx, id).await);
        }
        containers
    }

    async fn inspect(&self, ctx: &ProbeContext, id: &str) -> ContainerRecord {
        let outcome = ctx.runner().run("docker", &["inspect", id]).await;
        let parsed = outcome.successful().and_then(|output| {
            serde_json::from_slice::<Vec<InspectedContainer>>(&output.stdout)
                .map_err(|e| warn!(container = id, error = %e, "Failed to parse container inspect output"))
                .ok()
        });

        match parsed.and_then(|mut list| list.pop()) {
            Some(inspected) => container_record(ctx.fs(), id, inspected),
            None => {
                warn!(container = id, "Failed to inspect container");
                ContainerRecord {
                    container_id: id.to_string(),
                    name: UNKNOWN.to_string(),
                    image: UNKNOWN.to_string(),
                    ports: Vec::new(),
                    volumes: Vec::new(),
                    networks: Vec::new(),
                    managed_by: ManagedBy::Standalone,
                    compose_project: NOT_APPLICABLE.to_string(),
                    compose_service: NOT_APPLICABLE.to_string(),
                    compose_file: NOT_APPLICABLE.to_string(),
                }
            }
        }
    }

    async fn compose_available(&self, ctx: &ProbeContext) -> bool {
        ctx.runner().lookup("docker-compose").is_some()
            || ctx
                .runner()
                .run("docker", &["compose", "version"])
                .await
                .succeeded()
    }
}

fn container_record(fs: &dyn FileSystem, id: &str, inspected: InspectedContainer) -> ContainerRecord {
    let ports = inspected
        .network_settings
        .ports
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(port, bindings)| {
            let binding = bindings?.into_iter().next()?;
            Some(format!("{}->{}", port, binding.host_port))
        })
        .collect();

    let volumes = inspected
        .mounts
        .iter()
        .map(|m| format!("{}:{}", m.source, m.destination))
        .collect();

    let networks = inspected
        .network_settings
        .networks
        .unwrap_or_default()
        .into_keys()
        .collect();

    let labels = inspected.config.labels.unwrap_or_default();
    let label = |key: &str| labels.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    let (managed_by, compose_project, compose_service, compose_file) =
        match (label(COMPOSE_PROJECT_LABEL), label(COMPOSE_SERVICE_LABEL)) {
            (None, None) => (
                ManagedBy::Standalone,
                NOT_APPLICABLE.to_string(),
                NOT_APPLICABLE.to_string(),
                NOT_APPLICABLE.to_string(),
            ),
            (project, service) => (
                ManagedBy::Compose,
                project.unwrap_or_default().to_string(),
                service.unwrap_or_default().to_string(),
                compose_file(
                    fs,
                    label(COMPOSE_CONFIG_FILES_LABEL),
                    label(COMPOSE_WORKING_DIR_LABEL),
                ),
            ),
        };

    ContainerRecord {
        container_id: id.to_string(),
        name: inspected.name.trim_start_matches('/').to_string(),
        image: inspected.config.image,
        ports,
        volumes,
        networks,
        managed_by,
        compose_project,
        compose_service,
        compose_file,
    }
}

fn compose_file(fs: &dyn FileSystem, config_files: Option<&str>, working_dir: Option<&str>) -> String {
    if let Some(first) = config_files
        .and_then(|files| files.split(',').map(str::trim).find(|f| !f.is_empty()))
    {
        return first.to_string();
    }

    let Some(dir) = working_dir else {
        return UNKNOWN.to_string();
    };
    let dir = Path::new(dir);
    let default = dir.join("docker-compose.yml");
    if !fs.exists(&default) {
        let yaml = dir.join("docker-compose.yaml");
        if fs.exists(&yaml) {
            return yaml.display().to_string();
        }
    }
    default.display().to_string()
}

#[async_trait]
impl Detector for DockerDetector {
    type Output = ContainerInventory;

    fn name(&self) -> &'static str {
        ServiceKind::Docker.name()
    }

    async fn detect(&self, ctx: &ProbeContext) -> ContainerInventory {
        let Some(executable) = ctx.find_executable(&["docker"]) else {
            info!("Docker is not installed or not in PATH");
            return ContainerInventory::not_installed();
        };
        info!(path = %executable.display(), "Found executable");

        let daemon_up = ctx.runner().run("docker", &["info"]).await.succeeded();
        let status = if daemon_up {
            ServiceStatus::Running
        } else {
            info!("Docker is installed but daemon is not running");
            ServiceStatus::InstalledNotRunning
        };

        let runtime = ServiceDescriptor {
            kind: ServiceKind::Docker,
            installed: true,
            status,
            config_file: ctx.locator().locate(ServiceKind::Docker).await,
            document_roots: Vec::new(),
        };

        let containers = if daemon_up {
            self.list_containers(ctx).await
        } else {
            Vec::new()
        };
        info!(count = containers.len(), "Detected Docker containers");

        let compose_available = self.compose_available(ctx).await;
        let compose_files = if compose_available {
            info!("Docker Compose is installed");
            discover_compose_files(ctx.fs(), &self.compose_roots, self.compose_max_depth)
        } else {
            debug!("Docker Compose not available, skipping compose file discovery");
            Vec::new()
        };

        ContainerInventory {
            runtime,
            containers,
            compose_available,
            compose_files,
        }
    }
}
