use super::context::ProbeContext;
use super::service::{probe_service, ServiceSpec};
use super::types::{ServiceDescriptor, ServiceKind};
use super::Detector;
use crate::resolve::dialect;
use crate::resolve::ServiceNames;
use async_trait::async_trait;

pub static APACHE: ServiceSpec = ServiceSpec {
    kind: ServiceKind::Apache,
    executables: &["apache2", "httpd", "apache2ctl", "apachectl"],
    service_names: ServiceNames::with_alternate("apache2", "httpd"),
    dialect: &dialect::APACHE,
};

pub static NGINX: ServiceSpec = ServiceSpec {
    kind: ServiceKind::Nginx,
    executables: &["nginx"],
    service_names: ServiceNames::new("nginx"),
    dialect: &dialect::NGINX,
};

pub static LIGHTTPD: ServiceSpec = ServiceSpec {
    kind: ServiceKind::Lighttpd,
    executables: &["lighttpd"],
    service_names: ServiceNames::new("lighttpd"),
    dialect: &dialect::LIGHTTPD,
};

pub static CADDY: ServiceSpec = ServiceSpec {
    kind: ServiceKind::Caddy,
    executables: &["caddy"],
    service_names: ServiceNames::new("caddy"),
    dialect: &dialect::CADDY,
};

/// Web server detection driven by a [`ServiceSpec`]
pub struct WebServerDetector {
    spec: &'static ServiceSpec,
}

impl WebServerDetector {
    pub fn new(spec: &'static ServiceSpec) -> Self {
        Self { spec }
    }

    /// One detector per supported web server, in report order
    pub fn all() -> Vec<Self> {
        [&APACHE, &NGINX, &LIGHTTPD, &CADDY]
            .into_iter()
            .map(Self::new)
            .collect()
    }

    pub fn kind(&self) -> ServiceKind {
        self.spec.kind
    }
}

#[async_trait]
impl Detector for WebServerDetector {
    type Output = ServiceDescriptor;

    fn name(&self) -> &'static str {
        self.spec.kind.name()
    }

    async fn detect(&self, ctx: &ProbeContext) -> ServiceDescriptor {
        match probe_service(ctx, self.spec).await {
            Some(probed) => ServiceDescriptor {
                kind: self.spec.kind,
                installed: true,
                status: probed.status,
                config_file: probed.config_file,
                document_roots: probed.roots,
            },
            None => ServiceDescriptor::not_installed(self.spec.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ServiceStatus;
    use crate::fs::MockFileSystem;
    use crate::platform::Platform;
    use crate::process::MockCommandRunner;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn context(runner: MockCommandRunner, fs: MockFileSystem) -> (ProbeContext, Arc<MockCommandRunner>) {
        let runner = Arc::new(runner);
        let ctx = ProbeContext::new(runner.clone(), Arc::new(fs), Platform::Linux);
        (ctx, runner)
    }

    #[tokio::test]
    async fn test_not_installed_runs_no_commands() {
        let (ctx, runner) = context(MockCommandRunner::new(), MockFileSystem::new());

        let descriptor = WebServerDetector::new(&NGINX).detect(&ctx).await;
        assert_eq!(descriptor, ServiceDescriptor::not_installed(ServiceKind::Nginx));
        assert!(runner.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_running_nginx_with_roots() {
        let runner = MockCommandRunner::new();
        runner.add_executable("nginx");
        runner.add_response("systemctl is-active nginx", MockCommandRunner::success("active\n"));
        let fs = MockFileSystem::new();
        fs.add_file(
            "/etc/nginx/nginx.conf",
            "http {\n    include /etc/nginx/conf.d/*.conf;\n}\n",
        );
        fs.add_file("/etc/nginx/conf.d/default.conf", "server {\n    root /usr/share/nginx/html;\n}\n");

        let (ctx, _) = context(runner, fs);
        let descriptor = WebServerDetector::new(&NGINX).detect(&ctx).await;

        assert!(descriptor.installed);
        assert_eq!(descriptor.status, ServiceStatus::Running);
        assert_eq!(descriptor.config_file, Some(PathBuf::from("/etc/nginx/nginx.conf")));
        assert_eq!(descriptor.document_roots, vec!["/usr/share/nginx/html"]);
    }

    #[tokio::test]
    async fn test_installed_without_config() {
        let runner = MockCommandRunner::new();
        runner.add_executable("caddy");
        let (ctx, _) = context(runner, MockFileSystem::new());

        let descriptor = WebServerDetector::new(&CADDY).detect(&ctx).await;
        assert!(descriptor.installed);
        assert_eq!(descriptor.status, ServiceStatus::InstalledNotRunning);
        assert_eq!(descriptor.config_file, None);
        assert!(descriptor.document_roots.is_empty());
    }

    #[test]
    fn test_all_in_report_order() {
        let kinds: Vec<ServiceKind> = WebServerDetector::all().iter().map(|d| d.kind()).collect();
        assert_eq!(kinds, ServiceKind::WEB_SERVERS.to_vec());
    }
}
