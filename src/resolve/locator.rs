//! Configuration file location
//!
//! Installed services are asked for their own configuration path first.
//! When introspection yields nothing usable, a ranked list of conventional
//! paths for the current platform is probed in order.

use super::paths::first_existing;
use crate::detection::ServiceKind;
use crate::fs::FileSystem;
use crate::platform::Platform;
use crate::process::CommandRunner;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APACHE_CONTROLS: &[&str] = &["apache2ctl", "apachectl", "httpd", "apache2"];
const MYSQL_BINARIES: &[&str] = &["mysqld", "mariadbd", "mysql"];
const MYSQL_DEFAULTS_MARKER: &str =
    "Default options are read from the following files in the given order:";

struct ConventionPaths {
    linux: &'static [&'static str],
    macos: &'static [&'static str],
    windows: &'static [&'static str],
}

fn conventions(kind: ServiceKind) -> ConventionPaths {
    match kind {
        ServiceKind::Apache => ConventionPaths {
            linux: &[
                "/etc/apache2/apache2.conf",
                "/etc/apache2/httpd.conf",
                "/etc/httpd/conf/httpd.conf",
                "/usr/local/etc/apache24/httpd.conf",
            ],
            macos: &[
                "/opt/homebrew/etc/httpd/httpd.conf",
                "/usr/local/etc/httpd/httpd.conf",
                "/etc/apache2/httpd.conf",
            ],
            windows: &[
                r"C:\Apache24\conf\httpd.conf",
                r"C:\xampp\apache\conf\httpd.conf",
            ],
        },
        ServiceKind::Nginx => ConventionPaths {
            linux: &["/etc/nginx/nginx.conf", "/usr/local/etc/nginx/nginx.conf"],
            macos: &[
                "/opt/homebrew/etc/nginx/nginx.conf",
                "/usr/local/etc/nginx/nginx.conf",
            ],
            windows: &[r"C:\nginx\conf\nginx.conf"],
        },
        ServiceKind::Lighttpd => ConventionPaths {
            linux: &[
                "/etc/lighttpd/lighttpd.conf",
                "/usr/local/etc/lighttpd/lighttpd.conf",
            ],
            macos: &[
                "/opt/homebrew/etc/lighttpd/lighttpd.conf",
                "/usr/local/etc/lighttpd/lighttpd.conf",
            ],
            windows: &[],
        },
        ServiceKind::Caddy => ConventionPaths {
            linux: &[
                "/etc/caddy/Caddyfile",
                "/usr/local/etc/caddy/Caddyfile",
                "/etc/caddy/caddy.conf",
            ],
            macos: &["/opt/homebrew/etc/Caddyfile", "/usr/local/etc/Caddyfile"],
            windows: &[r"C:\caddy\Caddyfile"],
        },
        ServiceKind::MySql => ConventionPaths {
            linux: &["/etc/mysql/my.cnf", "/etc/my.cnf", "/usr/local/etc/my.cnf"],
            macos: &[
                "/opt/homebrew/etc/my.cnf",
                "/usr/local/etc/my.cnf",
                "/etc/my.cnf",
            ],
            windows: &[r"C:\ProgramData\MySQL\MySQL Server *\my.ini"],
        },
        ServiceKind::PostgreSql => ConventionPaths {
            linux: &[
                "/etc/postgresql/*/main/postgresql.conf",
                "/var/lib/pgsql/data/postgresql.conf",
                "/var/lib/postgresql/data/postgresql.conf",
                "/usr/local/pgsql/data/postgresql.conf",
            ],
            macos: &[
                "/opt/homebrew/var/postgresql@*/postgresql.conf",
                "/opt/homebrew/var/postgres/postgresql.conf",
                "/usr/local/var/postgres/postgresql.conf",
            ],
            windows: &[r"C:\Program Files\PostgreSQL\*\data\postgresql.conf"],
        },
        ServiceKind::Docker => ConventionPaths {
            linux: &["/etc/docker/daemon.json"],
            macos: &["~/.docker/daemon.json"],
            windows: &[r"C:\ProgramData\docker\config\daemon.json"],
        },
    }
}

/// Conventional config paths for `kind`, most likely on `platform` first
pub fn convention_paths(kind: ServiceKind, platform: &Platform) -> Vec<&'static str> {
    let table = conventions(kind);
    let ranked: Vec<&[&str]> = match platform {
        Platform::Linux | Platform::Other(_) => vec![table.linux, table.macos],
        Platform::MacOs => vec![table.macos, table.linux],
        Platform::Windows => vec![table.windows],
    };

    let mut paths: Vec<&'static str> = Vec::new();
    for path in ranked.into_iter().flatten() {
        if !paths.contains(path) {
            paths.push(path);
        }
    }
    paths
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn is_pattern(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

pub struct ConfigLocator<'a> {
    runner: &'a dyn CommandRunner,
    fs: &'a dyn FileSystem,
    platform: &'a Platform,
}

impl<'a> ConfigLocator<'a> {
    pub fn new(runner: &'a dyn CommandRunner, fs: &'a dyn FileSystem, platform: &'a Platform) -> Self {
        Self {
            runner,
            fs,
            platform,
        }
    }

    /// Resolve the main configuration file for an installed service
    pub async fn locate(&self, kind: ServiceKind) -> Option<PathBuf> {
        if let Some(path) = self.introspect(kind).await {
            info!(service = %kind, path = %path.display(), "Configuration path reported by service");
            return Some(path);
        }

        info!(service = %kind, "Could not determine config path from commands, trying predefined paths");
        first_existing(self.fs, &self.candidates(kind))
    }

    /// Convention paths with `~` and glob patterns expanded against the file system
    pub fn candidates(&self, kind: ServiceKind) -> Vec<PathBuf> {
        let mut expanded = Vec::new();
        for raw in convention_paths(kind, self.platform) {
            let path = expand_home(raw);
            let Some(text) = path.to_str().filter(|p| is_pattern(p)) else {
                expanded.push(path);
                continue;
            };
            match self.fs.glob(text) {
                Ok(matches) => expanded.extend(matches),
                Err(e) => debug!(pattern = text, error = %e, "Skipping invalid candidate pattern"),
            }
        }
        expanded
    }

    async fn introspect(&self, kind: ServiceKind) -> Option<PathBuf> {
        let reported = match kind {
            ServiceKind::Apache => self.apache().await,
            ServiceKind::Nginx => self.nginx().await,
            ServiceKind::Lighttpd => self.lighttpd().await,
            ServiceKind::Caddy => self.caddy().await,
            ServiceKind::MySql => self.mysql().await,
            ServiceKind::PostgreSql => self.postgresql().await,
            ServiceKind::Docker => None,
        }?;

        if self.fs.exists(&reported) {
            Some(reported)
        } else {
            debug!(service = %kind, path = %reported.display(), "Reported config path does not exist");
            None
        }
    }

    async fn apache(&self) -> Option<PathBuf> {
        for control in APACHE_CONTROLS {
            let outcome = self.runner.run(control, &["-V"]).await;
            let Some(output) = outcome.successful() else {
                debug!(program = control, ?outcome, "Apache control program unavailable");
                continue;
            };

            let text = output.stdout_text();
            let Some(config) = compile_define(&text, "SERVER_CONFIG_FILE") else {
                continue;
            };
            let config = PathBuf::from(config);
            if config.is_absolute() {
                return Some(config);
            }
            if let Some(root) = compile_define(&text, "HTTPD_ROOT") {
                return Some(Path::new(&root).join(config));
            }
            debug!(
                program = control,
                path = %config.display(),
                "Relative SERVER_CONFIG_FILE without HTTPD_ROOT"
            );
        }
        None
    }

    async fn nginx(&self) -> Option<PathBuf> {
        // `nginx -t` names the file it tested even when the test fails.
        if let Some(output) = self.runner.run("nginx", &["-t"]).await.output() {
            let text = output.combined_text();
            if let Some(path) = capture(&text, r"configuration file (\S+)") {
                return Some(PathBuf::from(path));
            }
        }

        let version = self.runner.run("nginx", &["-V"]).await;
        let text = version.output()?.combined_text();
        let conf = PathBuf::from(capture(&text, r"--conf-path=(\S+)")?);
        if conf.is_absolute() {
            return Some(conf);
        }
        capture(&text, r"--prefix=(\S+)").map(|prefix| Path::new(&prefix).join(conf))
    }

    async fn lighttpd(&self) -> Option<PathBuf> {
        for candidate in self.candidates(ServiceKind::Lighttpd) {
            if !self.fs.is_file(&candidate) {
                continue;
            }
            let Some(arg) = candidate.to_str() else {
                continue;
            };
            let outcome = self.runner.run("lighttpd", &["-p", "-f", arg]).await;
            if outcome.is_not_found() {
                return None;
            }
            if outcome.succeeded() {
                return Some(candidate);
            }
        }
        None
    }

    async fn caddy(&self) -> Option<PathBuf> {
        let version = self.runner.run("caddy", &["version"]).await;
        if !version.successful()?.stdout_text().contains("v2") {
            return None;
        }

        for candidate in self.candidates(ServiceKind::Caddy) {
            if !self.fs.is_file(&candidate) {
                continue;
            }
            let Some(arg) = candidate.to_str() else {
                continue;
            };
            let args = ["validate", "--adapter", "caddyfile", "--config", arg];
            if self.runner.run("caddy", &args).await.succeeded() {
                return Some(candidate);
            }
        }
        None
    }

    async fn mysql(&self) -> Option<PathBuf> {
        for binary in MYSQL_BINARIES {
            let outcome = self.runner.run(binary, &["--verbose", "--help"]).await;
            let Some(output) = outcome.output() else {
                continue;
            };

            let text = output.combined_text();
            let Some(files) = text
                .lines()
                .skip_while(|line| !line.contains(MYSQL_DEFAULTS_MARKER))
                .nth(1)
            else {
                continue;
            };

            let found = files
                .split_whitespace()
                .map(expand_home)
                .find(|path| self.fs.is_file(path));
            if found.is_some() {
                return found;
            }
        }
        None
    }

    async fn postgresql(&self) -> Option<PathBuf> {
        let outcome = self.runner.run("pg_lsclusters", &["-h"]).await;
        let text = outcome.successful()?.stdout_text();

        text.lines()
            .filter_map(|line| {
                let mut columns = line.split_whitespace();
                let version = columns.next()?;
                let cluster = columns.next()?;
                Some(
                    Path::new("/etc/postgresql")
                        .join(version)
                        .join(cluster)
                        .join("postgresql.conf"),
                )
            })
            .find(|path| self.fs.is_file(path))
    }
}

/// Value of `-D KEY="value"` in `apachectl -V` output
fn compile_define(text: &str, key: &str) -> Option<String> {
    capture(text, &format!(r#"-D {}="([^"]+)""#, regex::escape(key)))
}

fn capture(text: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
