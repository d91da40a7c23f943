//! Error types for the command registry.

use std::time::Duration;

use thiserror::Error;

/// Main error type for the registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Configuration-related errors.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Command lookup and execution errors.
    #[error("Command error: {kind}")]
    Command { kind: CommandErrorKind },

    /// Positional argument errors raised by handler helpers.
    #[error("Argument error: {kind}")]
    Argument { kind: ArgumentErrorKind },

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RegistryError {
    /// Whether this error reports a command that is not registered.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegistryError::Command {
                kind: CommandErrorKind::NotFound { .. }
            }
        )
    }

    /// Whether this error reports a handler that failed while running.
    pub fn is_execution_failure(&self) -> bool {
        matches!(
            self,
            RegistryError::Command {
                kind: CommandErrorKind::ExecutionFailed { .. }
            }
        )
    }

    /// Whether this error reports an execution that exceeded its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            RegistryError::Command {
                kind: CommandErrorKind::Timeout { .. }
            }
        )
    }
}

/// Command error kinds.
#[derive(Error, Debug)]
pub enum CommandErrorKind {
    #[error("Command \"{name}\" not found. Available commands: {}", format_available(.available))]
    NotFound {
        name: String,
        available: Vec<String>,
    },

    #[error("Command \"{name}\" failed: {message}")]
    ExecutionFailed { name: String, message: String },

    #[error("Command \"{name}\" timed out after {timeout:?}")]
    Timeout { name: String, timeout: Duration },
}

/// Argument error kinds.
#[derive(Error, Debug)]
pub enum ArgumentErrorKind {
    #[error("Missing required argument at position {index}")]
    Missing { index: usize },

    #[error("Argument at position {index} is not a valid {expected}")]
    InvalidType {
        index: usize,
        expected: &'static str,
    },
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "(none)".to_string()
    } else {
        available.join(", ")
    }
}

/// Error type returned by command handlers.
///
/// Boxed so handlers can propagate any error with `?`.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_available_commands() {
        let err = RegistryError::Command {
            kind: CommandErrorKind::NotFound {
                name: "ghost".to_string(),
                available: vec!["math:add".to_string(), "math:multiply".to_string()],
            },
        };
        let message = err.to_string();
        assert!(message.contains("\"ghost\" not found"));
        assert!(message.contains("math:add, math:multiply"));
        assert!(err.is_not_found());
        assert!(!err.is_execution_failure());
    }

    #[test]
    fn test_not_found_with_empty_registry() {
        let err = CommandErrorKind::NotFound {
            name: "ghost".to_string(),
            available: Vec::new(),
        };
        assert!(err.to_string().ends_with("Available commands: (none)"));
    }

    #[test]
    fn test_execution_failed_names_command() {
        let err = RegistryError::Command {
            kind: CommandErrorKind::ExecutionFailed {
                name: "divide".to_string(),
                message: "division by zero".to_string(),
            },
        };
        let message = err.to_string();
        assert!(message.contains("divide"));
        assert!(message.contains("division by zero"));
        assert!(err.is_execution_failure());
    }

    #[test]
    fn test_registry_error_converts_into_handler_error() {
        let err = RegistryError::Argument {
            kind: ArgumentErrorKind::Missing { index: 1 },
        };
        let boxed: HandlerError = err.into();
        assert_eq!(
            boxed.to_string(),
            "Argument error: Missing required argument at position 1"
        );
    }
}
