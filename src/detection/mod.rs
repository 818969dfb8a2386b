//! Per-service detectors
//!
//! A detector composes the process probe, the config locator, the extractor
//! and the status strategy into one structured result for a service kind.
//! Detectors never fail: anything that cannot be determined collapses into
//! `None`, an empty list, or a sentinel value.

pub mod compose;
pub mod context;
pub mod database;
pub mod docker;
pub mod service;
pub mod system;
pub mod types;
pub mod web_server;

use async_trait::async_trait;

pub use context::ProbeContext;
pub use database::DatabaseDetector;
pub use docker::{ContainerInventory, DockerDetector};
pub use service::{ProbedService, ServiceSpec};
pub use system::{hostname, SystemInfoDetector};
pub use types::{
    ContainerRecord, DatabaseDescriptor, ManagedBy, ServiceDescriptor,
    ServiceKind, ServiceStatus, SystemInfo, NOT_APPLICABLE, UNKNOWN,
};
pub use web_server::WebServerDetector;

#[async_trait]
pub trait Detector: Send + Sync {
    type Output: Send;

    fn name(&self) -> &'static str;

    async fn detect(&self, ctx: &ProbeContext) -> Self::Output;
}
