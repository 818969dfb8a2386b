use super::context::ProbeContext;
use super::types::{SystemInfo, UNKNOWN};
use super::Detector;
use crate::platform::Platform;
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info, warn};

/// Host name as reported by the OS, `unknown` when unavailable
pub fn hostname() -> String {
    sysinfo::System::host_name().unwrap_or_else(|| {
        warn!("Failed to determine hostname");
        UNKNOWN.to_string()
    })
}

#[derive(Debug, Default, Clone, PartialEq)]
struct DistroInfo {
    name: Option<String>,
    version: Option<String>,
}

/// `KEY=value` lines with surrounding quotes trimmed from the value
fn key_values<'a>(content: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
    content.lines().filter_map(|line| {
        let (key, value) = line.split_once('=')?;
        Some((key.trim(), value.trim().trim_matches(|c| c == '"' || c == '\'')))
    })
}

fn parse_key_value_release(content: &str, name_key: &str, version_key: &str) -> DistroInfo {
    let mut info = DistroInfo::default();
    for (key, value) in key_values(content) {
        if key == name_key {
            info.name = Some(value.to_string());
        } else if key == version_key {
            info.version = Some(value.to_string());
        }
    }
    info
}

/// "CentOS Linux release 7.9.2009 (Core)" style banners
fn parse_redhat_release(content: &str) -> DistroInfo {
    let text = content.trim();
    match text.split_once("release") {
        Some((name, rest)) => DistroInfo {
            name: Some(name.trim().to_string()),
            version: rest.split_whitespace().next().map(str::to_string),
        },
        None => DistroInfo {
            name: Some(text.to_string()),
            version: None,
        },
    }
}

pub struct SystemInfoDetector;

impl SystemInfoDetector {
    async fn kernel(&self, ctx: &ProbeContext) -> String {
        let outcome = ctx.runner().run("uname", &["-r"]).await;
        match outcome.successful() {
            Some(output) => output.stdout_text().trim().to_string(),
            None => {
                warn!(?outcome, "Failed to get kernel version");
                UNKNOWN.to_string()
            }
        }
    }

    fn linux_distro(&self, ctx: &ProbeContext) -> DistroInfo {
        let fs = ctx.fs();
        let read = |path: &str| match fs.read_to_string(Path::new(path)) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!(path, error = %e, "Release file unavailable");
                None
            }
        };

        if let Some(content) = read("/etc/os-release") {
            return parse_key_value_release(&content, "NAME", "VERSION_ID");
        }

        if let Some(content) = read("/etc/lsb-release") {
            let info = parse_key_value_release(&content, "DISTRIB_ID", "DISTRIB_RELEASE");
            if info.name.is_some() {
                return info;
            }
        }

        if let Some(content) = read("/etc/redhat-release") {
            return parse_redhat_release(&content);
        }

        if let Some(content) = read("/etc/debian_version") {
            return DistroInfo {
                name: Some("Debian".to_string()),
                version: Some(content.trim().to_string()),
            };
        }

        if let Some(content) = read("/etc/issue") {
            return DistroInfo {
                name: content
                    .trim()
                    .lines()
                    .next()
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
                version: None,
            };
        }

        info!("Could not identify Linux distribution from standard files");
        DistroInfo::default()
    }

    async fn powershell(&self, ctx: &ProbeContext, property: &str) -> Option<String> {
        let query = format!("(Get-CimInstance Win32_OperatingSystem).{}", property);
        let outcome = ctx.runner().run("powershell", &["-Command", query.as_str()]).await;
        match outcome.successful() {
            Some(output) => Some(output.stdout_text().trim().to_string()),
            None => {
                warn!(property, ?outcome, "PowerShell query failed");
                None
            }
        }
    }
}

#[async_trait]
impl Detector for SystemInfoDetector {
    type Output = SystemInfo;

    fn name(&self) -> &'static str {
        "system"
    }

    async fn detect(&self, ctx: &ProbeContext) -> SystemInfo {
        let info = match &ctx.platform {
            Platform::Linux => {
                let distro = self.linux_distro(ctx);
                SystemInfo {
                    os_name: distro.name.unwrap_or_else(|| "Linux".to_string()),
                    os_version: distro.version.unwrap_or_else(|| UNKNOWN.to_string()),
                    kernel: self.kernel(ctx).await,
                }
            }
            Platform::MacOs => {
                let outcome = ctx.runner().run("sw_vers", &["-productVersion"]).await;
                let os_version = match outcome.successful() {
                    Some(output) => output.stdout_text().trim().to_string(),
                    None => {
                        warn!(?outcome, "Failed to get macOS version");
                        UNKNOWN.to_string()
                    }
                };
                SystemInfo {
                    os_name: "macOS".to_string(),
                    os_version,
                    kernel: self.kernel(ctx).await,
                }
            }
            Platform::Windows => SystemInfo {
                os_name: self
                    .powershell(ctx, "Caption")
                    .await
                    .unwrap_or_else(|| "Windows".to_string()),
                os_version: self
                    .powershell(ctx, "Version")
                    .await
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                kernel: self
                    .powershell(ctx, "BuildNumber")
                    .await
                    .unwrap_or_else(|| UNKNOWN.to_string()),
            },
            Platform::Other(os) => {
                warn!(os = %os, "Unsupported operating system");
                SystemInfo {
                    os_name: os.clone(),
                    os_version: UNKNOWN.to_string(),
                    kernel: std::env::consts::ARCH.to_string(),
                }
            }
        };

        info!(
            os = %info.os_name,
            version = %info.os_version,
            kernel = %info.kernel,
            "Collected system info"
        );
        info
    }
}
