//! Command registry for dispatching invocations to handlers.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::{CommandErrorKind, RegistryError, RegistryResult};

use super::plugin::{namespaced, PluginCommand};
use super::traits::{AsyncFn, Handler, HandlerResult, SyncFn};
use super::types::{CommandArgs, CommandInfo, CommandMetadata};

/// A registered handler and its metadata.
struct CommandEntry {
    handler: Arc<dyn Handler>,
    metadata: Option<CommandMetadata>,
}

/// Name-keyed entries plus their original registration order.
#[derive(Default)]
struct Commands {
    order: Vec<String>,
    entries: HashMap<String, CommandEntry>,
}

/// Registry of named commands.
///
/// Construct one per process (or per test) and share it through `Arc`.
/// All operations except [`execute`](Self::execute) are synchronous.
/// The lock is never held while a handler runs, so handlers may call back
/// into the registry.
///
/// Arguments and results are `serde_json::Value`s. Callers that know a
/// command's return type can use [`execute_as`](Self::execute_as); the
/// registry performs no static type check on handlers.
#[derive(Default)]
pub struct CommandRegistry {
    commands: RwLock<Commands>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler returning a future.
    ///
    /// Replaces any existing command with the same name.
    pub fn register<F, Fut>(
        &self,
        name: impl Into<String>,
        handler: F,
        metadata: Option<CommandMetadata>,
    ) where
        F: Fn(CommandArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.register_handler(name, Arc::new(AsyncFn(handler)), metadata);
    }

    /// Register a synchronous handler.
    pub fn register_sync<F>(
        &self,
        name: impl Into<String>,
        handler: F,
        metadata: Option<CommandMetadata>,
    ) where
        F: Fn(CommandArgs) -> HandlerResult + Send + Sync + 'static,
    {
        self.register_handler(name, Arc::new(SyncFn(Arc::new(handler))), metadata);
    }

    /// Register a handler object.
    ///
    /// Overwriting keeps the name's original listing position.
    pub fn register_handler(
        &self,
        name: impl Into<String>,
        handler: Arc<dyn Handler>,
        metadata: Option<CommandMetadata>,
    ) {
        let name = name.into();
        let mut commands = self.write();

        let entry = CommandEntry { handler, metadata };
        if commands.entries.insert(name.clone(), entry).is_some() {
            warn!(command = %name, "Command already registered, replacing handler");
        } else {
            debug!(command = %name, "Registering command");
            commands.order.push(name);
        }
    }

    /// Register every command of a plugin as `<plugin_name>:<short_name>`.
    ///
    /// Commands are registered in iteration order.
    pub fn plugin<I, K>(&self, plugin_name: &str, commands: I)
    where
        I: IntoIterator<Item = (K, PluginCommand)>,
        K: AsRef<str>,
    {
        let mut count = 0usize;
        for (short_name, command) in commands {
            let name = namespaced(plugin_name, short_name.as_ref());
            self.register_handler(name, command.handler, command.metadata);
            count += 1;
        }

        info!(plugin = plugin_name, count, "Plugin installed");
    }

    /// Execute a command by name.
    ///
    /// Fails with `CommandErrorKind::NotFound` when the name is absent and
    /// with `CommandErrorKind::ExecutionFailed` when the handler returns an
    /// error or panics.
    pub async fn execute(&self, name: &str, args: impl Into<CommandArgs>) -> RegistryResult<Value> {
        let handler = self.lookup(name)?;
        let args = args.into();
        let invocation_id = Uuid::new_v4();

        debug!(
            command = name,
            %invocation_id,
            args = args.len(),
            "Executing command"
        );

        let outcome = AssertUnwindSafe(async move { handler.call(args).await })
            .catch_unwind()
            .await;

        let message = match outcome {
            Ok(Ok(value)) => {
                debug!(command = name, %invocation_id, "Command completed");
                return Ok(value);
            }
            Ok(Err(e)) => e.to_string(),
            Err(panic) => format!("handler panicked: {}", panic_message(panic.as_ref())),
        };

        error!(command = name, %invocation_id, error = %message, "Command failed");
        Err(RegistryError::Command {
            kind: CommandErrorKind::ExecutionFailed {
                name: name.to_string(),
                message,
            },
        })
    }

    /// Execute a command and deserialize its result into `T`.
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        name: &str,
        args: impl Into<CommandArgs>,
    ) -> RegistryResult<T> {
        let value = self.execute(name, args).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Check whether a command is registered.
    pub fn has(&self, name: &str) -> bool {
        self.read().entries.contains_key(name)
    }

    /// Get the metadata of a command.
    ///
    /// Returns `None` both for unregistered commands and for commands
    /// registered without metadata.
    pub fn get_metadata(&self, name: &str) -> Option<CommandMetadata> {
        self.read()
            .entries
            .get(name)
            .and_then(|entry| entry.metadata.clone())
    }

    /// Get the listing entry of a registered command.
    pub fn get_info(&self, name: &str) -> Option<CommandInfo> {
        self.read().entries.get(name).map(|entry| CommandInfo {
            name: name.to_string(),
            metadata: entry.metadata.clone(),
        })
    }

    /// List all registered command names in registration order.
    pub fn list(&self) -> Vec<String> {
        self.read().order.clone()
    }

    /// List all registered commands with their metadata.
    pub fn get_all(&self) -> Vec<CommandInfo> {
        let commands = self.read();
        commands
            .order
            .iter()
            .filter_map(|name| {
                commands.entries.get(name).map(|entry| CommandInfo {
                    name: name.clone(),
                    metadata: entry.metadata.clone(),
                })
            })
            .collect()
    }

    /// Remove a command. Returns whether anything was removed.
    pub fn unregister(&self, name: &str) -> bool {
        let mut commands = self.write();
        if commands.entries.remove(name).is_none() {
            return false;
        }
        commands.order.retain(|n| n != name);
        debug!(command = name, "Unregistered command");
        true
    }

    /// Remove every command.
    pub fn clear(&self) {
        let mut commands = self.write();
        let count = commands.entries.len();
        commands.entries.clear();
        commands.order.clear();
        info!(count, "Command registry cleared");
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render help text for one command, or an overview of all commands.
    ///
    /// Never fails; absence is reported as text.
    pub fn help(&self, name: Option<&str>) -> String {
        match name {
            Some(name) => self.help_command(name),
            None => self.help_overview(),
        }
    }

    fn help_command(&self, name: &str) -> String {
        let commands = self.read();
        let Some(entry) = commands.entries.get(name) else {
            return format!("Command \"{name}\" not found.");
        };
        let Some(metadata) = &entry.metadata else {
            return format!("No metadata available for command \"{name}\".");
        };

        let mut lines = vec![format!("Command: {name}")];
        if let Some(description) = &metadata.description {
            lines.push(format!("Description: {description}"));
        }
        if let Some(usage) = &metadata.usage {
            lines.push(format!("Usage: {usage}"));
        }
        if !metadata.examples.is_empty() {
            lines.push("Examples:".to_string());
            lines.extend(metadata.examples.iter().map(|e| format!("  {e}")));
        }
        lines.join("\n")
    }

    fn help_overview(&self) -> String {
        let commands = self.read();
        if commands.order.is_empty() {
            return "No commands registered.".to_string();
        }

        let mut lines = vec!["Available commands:".to_string()];
        for name in &commands.order {
            let description = commands
                .entries
                .get(name)
                .and_then(|entry| entry.metadata.as_ref())
                .and_then(|metadata| metadata.description.as_deref());
            match description {
                Some(description) => lines.push(format!("  {name} - {description}")),
                None => lines.push(format!("  {name}")),
            }
        }
        lines.join("\n")
    }

    /// Clone the handler out of the map so the lock is released before it runs.
    fn lookup(&self, name: &str) -> RegistryResult<Arc<dyn Handler>> {
        let commands = self.read();
        match commands.entries.get(name) {
            Some(entry) => Ok(Arc::clone(&entry.handler)),
            None => {
                debug!(command = name, "Command not found");
                Err(RegistryError::Command {
                    kind: CommandErrorKind::NotFound {
                        name: name.to_string(),
                        available: commands.order.clone(),
                    },
                })
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Commands> {
        match self.commands.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(), // Recover from lock poisoning
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Commands> {
        match self.commands.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
