//! Host platform identification
//!
//! The platform is detected once at startup and handed to the engine, so every
//! platform-dependent decision can be exercised in tests with a fixed value.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other(String),
}

impl Platform {
    /// Platform this binary is running on
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Maps an `std::env::consts::OS` style identifier to a platform
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Platform::Linux,
            "macos" | "darwin" => Platform::MacOs,
            "windows" => Platform::Windows,
            other => Platform::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => write!(f, "linux"),
            Platform::MacOs => write!(f, "macos"),
            Platform::Windows => write!(f, "windows"),
            Platform::Other(name) => write!(f, "{}", name),
        }
    }
}
