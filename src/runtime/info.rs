//! Runtime information snapshot.

use serde::Serialize;

use super::{arch, platform, runtime_name, runtime_version, Environment};

/// Snapshot of the host execution environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeInfo {
    pub runtime: &'static str,
    pub version: &'static str,
    pub platform: &'static str,
    pub arch: &'static str,
    pub pid: u32,
    pub environment: Environment,
    pub is_development: bool,
    pub is_production: bool,
    pub is_test: bool,
}

impl RuntimeInfo {
    /// Capture the current process, detecting the environment.
    pub fn detect() -> Self {
        Self::with_environment(Environment::detect())
    }

    /// Capture the current process with a known environment.
    pub fn with_environment(environment: Environment) -> Self {
        Self {
            runtime: runtime_name(),
            version: runtime_version(),
            platform: platform(),
            arch: arch(),
            pid: std::process::id(),
            environment,
            is_development: environment.is_development(),
            is_production: environment.is_production(),
            is_test: environment.is_test(),
        }
    }
}
