use super::context::ProbeContext;
use super::service::{probe_service, ServiceSpec};
use super::types::{DatabaseDescriptor, ServiceKind};
use super::Detector;
use crate::resolve::dialect;
use crate::resolve::ServiceNames;
use async_trait::async_trait;

pub static MYSQL: ServiceSpec = ServiceSpec {
    kind: ServiceKind::MySql,
    executables: &["mysqld", "mysql", "mariadbd"],
    service_names: ServiceNames::with_alternate("mysql", "mysqld"),
    dialect: &dialect::MYSQL,
};

pub static POSTGRESQL: ServiceSpec = ServiceSpec {
    kind: ServiceKind::PostgreSql,
    executables: &["postgres", "psql", "pg_ctl"],
    service_names: ServiceNames::with_alternate("postgresql", "postgres"),
    dialect: &dialect::POSTGRESQL,
};

pub struct DatabaseDetector {
    spec: &'static ServiceSpec,
}

impl DatabaseDetector {
    pub fn new(spec: &'static ServiceSpec) -> Self {
        Self { spec }
    }

    pub fn all() -> Vec<Self> {
        [&MYSQL, &POSTGRESQL].into_iter().map(Self::new).collect()
    }

    pub fn kind(&self) -> ServiceKind {
        self.spec.kind
    }
}

#[async_trait]
impl Detector for DatabaseDetector {
    type Output = DatabaseDescriptor;

    fn name(&self) -> &'static str {
        self.spec.kind.name()
    }

    async fn detect(&self, ctx: &ProbeContext) -> DatabaseDescriptor {
        let service = self.spec.service_names.primary;
        match probe_service(ctx, self.spec).await {
            // Later declarations override earlier ones.
            Some(probed) => DatabaseDescriptor {
                kind: self.spec.kind,
                service: service.to_string(),
                installed: true,
                status: probed.status,
                config_file: probed.config_file,
                data_directory: probed.roots.into_iter().last(),
            },
            None => DatabaseDescriptor::not_installed(self.spec.kind, service),
        }
    }
}
