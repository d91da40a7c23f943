//! Command types: positional arguments, metadata, and listing entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ArgumentErrorKind, RegistryError};

/// Positional, dynamically typed arguments passed to a handler.
///
/// Arguments are forwarded to the handler verbatim and in order; the
/// registry never inspects them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandArgs {
    inner: Vec<Value>,
}

impl CommandArgs {
    /// Create a new argument list from JSON values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { inner: values }
    }

    /// Create an argument list from a JSON value.
    ///
    /// An array supplies one argument per element; any other value becomes
    /// a single argument.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Array(values) => Self::new(values),
            other => Self::new(vec![other]),
        }
    }

    /// Create an empty argument list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no arguments were supplied.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over the arguments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.inner.iter()
    }

    /// Get the raw argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.inner.get(index)
    }

    /// Consume the list, returning the underlying values.
    pub fn into_vec(self) -> Vec<Value> {
        self.inner
    }

    /// Get a required integer argument.
    pub fn get_i64(&self, index: usize) -> Result<i64, RegistryError> {
        self.require(index)?
            .as_i64()
            .ok_or_else(|| invalid_type(index, "integer"))
    }

    /// Get a required number argument (integers are widened).
    pub fn get_f64(&self, index: usize) -> Result<f64, RegistryError> {
        self.require(index)?
            .as_f64()
            .ok_or_else(|| invalid_type(index, "number"))
    }

    /// Get a required string argument.
    pub fn get_str(&self, index: usize) -> Result<&str, RegistryError> {
        self.require(index)?
            .as_str()
            .ok_or_else(|| invalid_type(index, "string"))
    }

    /// Get a required boolean argument.
    pub fn get_bool(&self, index: usize) -> Result<bool, RegistryError> {
        self.require(index)?
            .as_bool()
            .ok_or_else(|| invalid_type(index, "boolean"))
    }

    /// Get an optional integer argument.
    pub fn get_optional_i64(&self, index: usize) -> Option<i64> {
        self.inner.get(index).and_then(|v| v.as_i64())
    }

    /// Get an optional string argument.
    pub fn get_optional_str(&self, index: usize) -> Option<&str> {
        self.inner.get(index).and_then(|v| v.as_str())
    }

    /// Get an optional boolean argument with a default.
    pub fn get_optional_bool(&self, index: usize, default: bool) -> bool {
        self.inner
            .get(index)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    fn require(&self, index: usize) -> Result<&Value, RegistryError> {
        self.inner.get(index).ok_or(RegistryError::Argument {
            kind: ArgumentErrorKind::Missing { index },
        })
    }
}

fn invalid_type(index: usize, expected: &'static str) -> RegistryError {
    RegistryError::Argument {
        kind: ArgumentErrorKind::InvalidType { index, expected },
    }
}

impl From<Vec<Value>> for CommandArgs {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<Value> for CommandArgs {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for CommandArgs {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// Build a [`CommandArgs`] list from expressions.
///
/// The arguments use `serde_json::json!` syntax, so `null` and object
/// literals work alongside Rust expressions.
///
/// ```
/// use lumo_registry::args;
///
/// let args = args![5, "five", null, {"key": true}];
/// assert_eq!(args.len(), 4);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::commands::CommandArgs::empty()
    };
    ($($tt:tt)+) => {
        $crate::commands::CommandArgs::from_json($crate::serde_json::json!([$($tt)+]))
    };
}

/// Descriptive metadata attached to a command.
///
/// Never affects dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// One-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Usage line, e.g. `calculate <a> <b>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// Example invocations, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

impl CommandMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the usage line.
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Append an example invocation.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }
}

/// A registered command name paired with its current metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CommandMetadata>,
}
