use super::context::ProbeContext;
use super::types::{ServiceKind, ServiceStatus};
use crate::fs::FileSystem;
use crate::resolve::{extract, resolve_includes, Dialect, ServiceNames};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Static description of how to find one service kind on a host
#[derive(Debug)]
pub struct ServiceSpec {
    pub kind: ServiceKind,
    /// Executable names whose presence means the service is installed
    pub executables: &'static [&'static str],
    pub service_names: ServiceNames,
    pub dialect: &'static Dialect,
}

/// Facts gathered for an installed service
#[derive(Debug, Clone, PartialEq)]
pub struct ProbedService {
    pub status: ServiceStatus,
    pub config_file: Option<PathBuf>,
    /// Root directive values from the config and its includes, in order
    pub roots: Vec<String>,
}

/// Installation, status, config location and root extraction for one service.
///
/// Returns `None` without running any command when no executable is present.
pub async fn probe_service(ctx: &ProbeContext, spec: &ServiceSpec) -> Option<ProbedService> {
    let Some(executable) = ctx.find_executable(spec.executables) else {
        info!(service = %spec.kind, "Not installed");
        return None;
    };
    info!(service = %spec.kind, path = %executable.display(), "Found executable");

    let status = ctx.service_status(&spec.service_names).await;
    info!(service = %spec.kind, %status, "Resolved service status");

    let config_file = ctx.locator().locate(spec.kind).await;
    let roots = config_file
        .as_deref()
        .map(|config| collect_roots(ctx.fs(), config, spec.dialect))
        .unwrap_or_default();

    Some(ProbedService {
        status,
        config_file,
        roots,
    })
}

/// Root values declared by `config` followed by those of its includes
pub fn collect_roots(fs: &dyn FileSystem, config: &Path, dialect: &Dialect) -> Vec<String> {
    if !fs.is_file(config) {
        warn!(path = %config.display(), "Configuration file is not a readable file");
        return Vec::new();
    }

    let mut roots = read_roots(fs, config, dialect);
    for include in resolve_includes(fs, config, dialect) {
        roots.extend(read_roots(fs, &include, dialect));
    }

    if !roots.is_empty() {
        info!(path = %config.display(), count = roots.len(), "Extracted root directives");
    }
    roots
}

fn read_roots(fs: &dyn FileSystem, path: &Path, dialect: &Dialect) -> Vec<String> {
    match fs.read_to_string(path) {
        Ok(contents) => extract(&contents, dialect, &dialect.root),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read configuration file");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::resolve::dialect::{APACHE, NGINX};

    #[test]
    fn test_roots_from_main_then_includes() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "/etc/nginx/nginx.conf",
            "root /usr/share/nginx/html;\ninclude sites/*.conf;\n",
        );
        fs.add_file("/etc/nginx/sites/a.conf", "server {\n  root /srv/a;\n}\n");
        fs.add_file("/etc/nginx/sites/b.conf", "server {\n  root /srv/b;\n}\n");

        assert_eq!(
            collect_roots(&fs, Path::new("/etc/nginx/nginx.conf"), &NGINX),
            vec!["/usr/share/nginx/html", "/srv/a", "/srv/b"]
        );
    }

    #[test]
    fn test_duplicate_roots_survive_in_order() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "/etc/apache2/apache2.conf",
            "DocumentRoot /var/www/html\nInclude sites.conf\n",
        );
        fs.add_file(
            "/etc/apache2/sites.conf",
            "DocumentRoot /var/www/html\nDocumentRoot /var/www/shop\n",
        );

        assert_eq!(
            collect_roots(&fs, Path::new("/etc/apache2/apache2.conf"), &APACHE),
            vec!["/var/www/html", "/var/www/html", "/var/www/shop"]
        );
    }

    #[test]
    fn test_missing_config_yields_no_roots() {
        let fs = MockFileSystem::new();
        fs.add_dir("/etc/apache2/apache2.conf");

        assert!(collect_roots(&fs, Path::new("/etc/apache2/apache2.conf"), &APACHE).is_empty());
        assert!(collect_roots(&fs, Path::new("/nowhere.conf"), &APACHE).is_empty());
    }

    #[test]
    fn test_unreadable_include_is_skipped() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "/etc/apache2/apache2.conf",
            "Include a.conf\nInclude b.conf\n",
        );
        fs.add_unreadable_file("/etc/apache2/a.conf");
        fs.add_file("/etc/apache2/b.conf", "DocumentRoot /var/www/b\n");

        assert_eq!(
            collect_roots(&fs, Path::new("/etc/apache2/apache2.conf"), &APACHE),
            vec!["/var/www/b"]
        );
    }
}
