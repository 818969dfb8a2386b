use crate::detection::{ContainerRecord, DatabaseDescriptor, ServiceDescriptor, SystemInfo};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One scan of the host. Only installed services are listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    /// RFC 3339 local time at scan start
    pub timestamp: String,
    pub hostname: String,
    pub system_info: SystemInfo,
    pub web_servers: Vec<ServiceDescriptor>,
    pub databases: Vec<DatabaseDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_runtime: Option<ServiceDescriptor>,
    pub docker_containers: Vec<ContainerRecord>,
    #[serde(default)]
    pub compose_files: Vec<PathBuf>,
}

impl DiscoveryReport {
    pub fn new() -> Self {
        Self::with_timestamp(chrono::Local::now().to_rfc3339())
    }

    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            hostname: String::new(),
            system_info: SystemInfo::unknown(),
            web_servers: Vec::new(),
            databases: Vec::new(),
            container_runtime: None,
            docker_containers: Vec::new(),
            compose_files: Vec::new(),
        }
    }
}

impl Default for DiscoveryReport {
    fn default() -> Self {
        Self::new()
    }
}
