use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Placeholder for compose fields of standalone containers
pub const NOT_APPLICABLE: &str = "-";
/// Placeholder for facts that could not be determined
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    Apache,
    Nginx,
    Lighttpd,
    Caddy,
    #[serde(rename = "MySQL")]
    MySql,
    #[serde(rename = "PostgreSQL")]
    PostgreSql,
    Docker,
}

impl ServiceKind {
    pub const WEB_SERVERS: [ServiceKind; 4] = [
        ServiceKind::Apache,
        ServiceKind::Nginx,
        ServiceKind::Lighttpd,
        ServiceKind::Caddy,
    ];

    pub const DATABASES: [ServiceKind; 2] = [ServiceKind::MySql, ServiceKind::PostgreSql];

    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Apache => "Apache",
            ServiceKind::Nginx => "Nginx",
            ServiceKind::Lighttpd => "Lighttpd",
            ServiceKind::Caddy => "Caddy",
            ServiceKind::MySql => "MySQL",
            ServiceKind::PostgreSql => "PostgreSQL",
            ServiceKind::Docker => "Docker",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    #[serde(rename = "Running")]
    Running,
    #[serde(rename = "Installed but not running")]
    InstalledNotRunning,
    #[serde(rename = "Not Installed")]
    NotInstalled,
    #[serde(rename = "Unknown status")]
    Unknown,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ServiceStatus::Running => "Running",
            ServiceStatus::InstalledNotRunning => "Installed but not running",
            ServiceStatus::NotInstalled => "Not Installed",
            ServiceStatus::Unknown => "Unknown status",
        };
        f.write_str(label)
    }
}

/// Detection result for a web server or the container runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    #[serde(skip)]
    pub installed: bool,
    pub status: ServiceStatus,
    pub config_file: Option<PathBuf>,
    #[serde(default)]
    pub document_roots: Vec<String>,
}

impl ServiceDescriptor {
    pub fn not_installed(kind: ServiceKind) -> Self {
        Self {
            kind,
            installed: false,
            status: ServiceStatus::NotInstalled,
            config_file: None,
            document_roots: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseDescriptor {
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    /// Service unit name the status was resolved against
    pub service: String,
    #[serde(skip)]
    pub installed: bool,
    pub status: ServiceStatus,
    pub config_file: Option<PathBuf>,
    pub data_directory: Option<String>,
}

impl DatabaseDescriptor {
    pub fn not_installed(kind: ServiceKind, service: &str) -> Self {
        Self {
            kind,
            service: service.to_string(),
            installed: false,
            status: ServiceStatus::NotInstalled,
            config_file: None,
            data_directory: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagedBy {
    #[serde(rename = "standalone")]
    Standalone,
    #[serde(rename = "docker-compose")]
    Compose,
}

/// One running container. Compose fields hold [`NOT_APPLICABLE`] for
/// standalone containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub container_id: String,
    pub name: String,
    pub image: String,
    pub ports: Vec<String>,
    pub volumes: Vec<String>,
    pub networks: Vec<String>,
    pub managed_by: ManagedBy,
    pub compose_project: String,
    pub compose_service: String,
    pub compose_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os_name: String,
    pub os_version: String,
    pub kernel: String,
}

impl SystemInfo {
    pub fn unknown() -> Self {
        Self {
            os_name: UNKNOWN.to_string(),
            os_version: UNKNOWN.to_string(),
            kernel: UNKNOWN.to_string(),
        }
    }
}
