//! Configuration settings for the command registry.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::RegistryError;
use crate::runtime::{env_var, Environment};

/// Main configuration structure.
///
/// Every section is optional; a missing file section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub builtins: BuiltinsConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("pretty" or "json").
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Limits configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LimitsConfig {
    /// Deadline applied by the CLI around each execution. Zero disables it.
    #[serde(default)]
    pub execute_timeout_seconds: u64,
}

/// Runtime detection configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RuntimeConfig {
    /// Explicit environment mode, overriding `LUMO_ENV` and `APP_ENV`.
    pub environment: Option<String>,
}

/// Built-in command configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BuiltinsConfig {
    /// Whether `system:*` and `runtime:*` commands are installed.
    #[serde(default = "default_builtins_enabled")]
    pub enabled: bool,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_builtins_enabled() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for BuiltinsConfig {
    fn default() -> Self {
        Self {
            enabled: default_builtins_enabled(),
        }
    }
}

impl LimitsConfig {
    /// The configured execution deadline, if any.
    pub fn execute_timeout(&self) -> Option<Duration> {
        match self.execute_timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        let settings = Self::from_toml(&content).map_err(|e| RegistryError::Config {
            message: format!("Failed to load config file '{}': {}", path.display(), e),
        })?;

        Ok(settings)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, RegistryError> {
        let settings: Settings = toml::from_str(content).map_err(|e| RegistryError::Config {
            message: format!("Failed to parse settings: {}", e),
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Resolve the environment mode from settings and the process environment.
    pub fn environment(&self) -> Environment {
        Environment::resolve(self.runtime.environment.as_deref(), env_var)
    }

    /// Validate the settings.
    fn validate(&self) -> Result<(), RegistryError> {
        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(RegistryError::Config {
                message: format!(
                    "Invalid log level '{}'. Valid levels: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        // Validate log format
        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(RegistryError::Config {
                message: format!(
                    "Invalid log format '{}'. Valid formats: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        // Validate environment override
        if let Some(environment) = &self.runtime.environment {
            environment.parse::<Environment>()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_log_format(), "pretty");

        let settings = Settings::default();
        assert!(settings.builtins.enabled);
        assert_eq!(settings.limits.execute_timeout(), None);
        assert!(settings.runtime.environment.is_none());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.logging.level, "info");
        assert!(settings.builtins.enabled);
    }

    #[test]
    fn test_parse_full_settings() {
        let settings = Settings::from_toml(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [limits]
            execute_timeout_seconds = 30

            [runtime]
            environment = "test"

            [builtins]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(settings.logging.format, "json");
        assert_eq!(
            settings.limits.execute_timeout(),
            Some(Duration::from_secs(30))
        );
        assert_eq!(settings.environment(), Environment::Test);
        assert!(!settings.builtins.enabled);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_toml("[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));

        let err = Settings::from_toml("[logging]\nformat = \"xml\"").unwrap_err();
        assert!(err.to_string().contains("Invalid log format"));

        let err = Settings::from_toml("[runtime]\nenvironment = \"staging\"").unwrap_err();
        assert!(err.to_string().contains("Invalid environment"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Settings::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, RegistryError::Config { .. }));
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
