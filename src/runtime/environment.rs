//! Deployment mode detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Variables consulted, in order, when no explicit mode is configured.
const ENV_KEYS: [&str; 2] = ["LUMO_ENV", "APP_ENV"];

/// Deployment mode of the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    /// Detect the mode from the process environment.
    ///
    /// Unrecognised values are ignored and the next source is tried.
    /// Falls back to the build profile.
    pub fn detect() -> Self {
        Self::resolve(None, super::env_var)
    }

    /// Resolve the mode from an explicit override, then a variable lookup.
    pub fn resolve<F>(explicit: Option<&str>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = explicit.and_then(|value| value.parse().ok()) {
            return env;
        }

        ENV_KEYS
            .iter()
            .filter_map(|key| lookup(*key))
            .find_map(|value| value.parse().ok())
            .unwrap_or_else(Self::build_default)
    }

    fn build_default() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    pub fn is_development(&self) -> bool {
        *self == Environment::Development
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    pub fn is_test(&self) -> bool {
        *self == Environment::Test
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }
}

impl FromStr for Environment {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" | "testing" => Ok(Environment::Test),
            other => Err(RegistryError::Config {
                message: format!(
                    "Invalid environment '{}'. Valid environments: development, production, test",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
