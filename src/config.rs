//! Configuration management for hostprobe
//!
//! Settings are loaded from environment variables with sensible defaults and
//! can be overridden by command-line flags afterwards.
//!
//! # Environment Variables
//!
//! - `HOSTPROBE_COMMAND_TIMEOUT`: Seconds each external command may run - default: "5"
//! - `HOSTPROBE_LOG_LEVEL`: Logging level - default: "info"
//! - `HOSTPROBE_COMPOSE_ROOTS`: Directories searched for compose files, separated
//!   by the platform path separator - default: "/opt:/srv:/home"
//! - `HOSTPROBE_COMPOSE_MAX_DEPTH`: Deepest path (components below `/`) visited
//!   during compose discovery - default: "5"
//!
//! # Example
//!
//! ```no_run
//! use hostprobe::HostprobeConfig;
//!
//! let config = HostprobeConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 5;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_COMPOSE_ROOTS: &[&str] = &["/opt", "/srv", "/home"];
const DEFAULT_COMPOSE_MAX_DEPTH: usize = 5;

const MAX_COMMAND_TIMEOUT_SECS: u64 = 300;
const MAX_COMPOSE_DEPTH: usize = 32;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostprobeConfig {
    /// Time budget for each external command
    pub command_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Roots walked during compose file discovery
    pub compose_roots: Vec<PathBuf>,

    /// Maximum path depth visited during compose file discovery
    pub compose_max_depth: usize,
}

fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::ParseError {
                field: key.to_string(),
                error: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

impl Default for HostprobeConfig {
    /// Loads from environment variables; unparsable values fall back to defaults
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|_| Self::builtin())
    }
}

impl HostprobeConfig {
    /// Hard-coded defaults, ignoring the environment
    pub fn builtin() -> Self {
        Self {
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            compose_roots: DEFAULT_COMPOSE_ROOTS.iter().map(PathBuf::from).collect(),
            compose_max_depth: DEFAULT_COMPOSE_MAX_DEPTH,
        }
    }

    /// Load from `HOSTPROBE_*` environment variables, reporting unparsable values
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::builtin();

        let command_timeout_secs = parse_env::<u64>("HOSTPROBE_COMMAND_TIMEOUT")?
            .unwrap_or(defaults.command_timeout_secs);

        let log_level = env::var("HOSTPROBE_LOG_LEVEL")
            .unwrap_or(defaults.log_level)
            .to_lowercase();

        let compose_roots = match env::var_os("HOSTPROBE_COMPOSE_ROOTS") {
            Some(roots) => env::split_paths(&roots)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
            None => defaults.compose_roots,
        };

        let compose_max_depth = parse_env::<usize>("HOSTPROBE_COMPOSE_MAX_DEPTH")?
            .unwrap_or(defaults.compose_max_depth);

        Ok(Self {
            command_timeout_secs,
            log_level,
            compose_roots,
            compose_max_depth,
        })
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Command timeout must be at least 1 second".to_string(),
            ));
        }
        if self.command_timeout_secs > MAX_COMMAND_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(format!(
                "Command timeout cannot exceed {} seconds",
                MAX_COMMAND_TIMEOUT_SECS
            )));
        }

        if self.compose_max_depth == 0 || self.compose_max_depth > MAX_COMPOSE_DEPTH {
            return Err(ConfigError::ValidationFailed(format!(
                "Compose search depth must be between 1 and {}",
                MAX_COMPOSE_DEPTH
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

impl fmt::Display for HostprobeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hostprobe Configuration:")?;
        writeln!(f, "  Command Timeout: {}s", self.command_timeout_secs)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        let roots: Vec<String> = self
            .compose_roots
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        writeln!(f, "  Compose Roots: {}", roots.join(", "))?;
        writeln!(f, "  Compose Max Depth: {}", self.compose_max_depth)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = vec![
            EnvGuard::unset("HOSTPROBE_COMMAND_TIMEOUT"),
            EnvGuard::unset("HOSTPROBE_LOG_LEVEL"),
            EnvGuard::unset("HOSTPROBE_COMPOSE_ROOTS"),
            EnvGuard::unset("HOSTPROBE_COMPOSE_MAX_DEPTH"),
        ];

        let config = HostprobeConfig::default();

        assert_eq!(config, HostprobeConfig::builtin());
        assert_eq!(config.command_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.compose_roots,
            vec![
                PathBuf::from("/opt"),
                PathBuf::from("/srv"),
                PathBuf::from("/home")
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = vec![
            EnvGuard::set("HOSTPROBE_COMMAND_TIMEOUT", "12"),
            EnvGuard::set("HOSTPROBE_LOG_LEVEL", "DEBUG"),
            EnvGuard::set("HOSTPROBE_COMPOSE_ROOTS", "/data:/var/apps"),
            EnvGuard::set("HOSTPROBE_COMPOSE_MAX_DEPTH", "8"),
        ];

        let config = HostprobeConfig::from_env().unwrap();

        assert_eq!(config.command_timeout_secs, 12);
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.compose_roots,
            vec![PathBuf::from("/data"), PathBuf::from("/var/apps")]
        );
        assert_eq!(config.compose_max_depth, 8);
    }

    #[test]
    #[serial]
    fn test_unparsable_value_reported() {
        let _guard = EnvGuard::set("HOSTPROBE_COMMAND_TIMEOUT", "soon");

        let err = HostprobeConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { ref field, .. } if field == "HOSTPROBE_COMMAND_TIMEOUT"));
        assert_eq!(HostprobeConfig::default().command_timeout_secs, 5);
    }

    #[test]
    fn test_configuration_validation_invalid_timeout() {
        let mut config = HostprobeConfig::builtin();
        config.command_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.command_timeout_secs = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configuration_validation_invalid_depth() {
        let mut config = HostprobeConfig::builtin();
        config.compose_max_depth = 0;
        assert!(config.validate().is_err());

        config.compose_max_depth = 33;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configuration_validation_invalid_log_level() {
        let mut config = HostprobeConfig::builtin();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_display() {
        let display = format!("{}", HostprobeConfig::builtin());
        assert!(display.contains("Hostprobe Configuration:"));
        assert!(display.contains("Compose Roots: /opt, /srv, /home"));
    }
}
