//! Plugin command entries for namespaced bulk registration.

use std::future::Future;
use std::sync::Arc;

use super::traits::{AsyncFn, Handler, HandlerResult, SyncFn};
use super::types::{CommandArgs, CommandMetadata};

/// Separator between plugin name and short command name.
pub const PLUGIN_SEPARATOR: char = ':';

/// One command inside a plugin: a bare handler or a handler with metadata.
pub struct PluginCommand {
    pub(crate) handler: Arc<dyn Handler>,
    pub(crate) metadata: Option<CommandMetadata>,
}

impl PluginCommand {
    /// Wrap a function returning a future.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(CommandArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::from_handler(Arc::new(AsyncFn(handler)))
    }

    /// Wrap a synchronous closure.
    pub fn sync<F>(handler: F) -> Self
    where
        F: Fn(CommandArgs) -> HandlerResult + Send + Sync + 'static,
    {
        Self::from_handler(Arc::new(SyncFn(Arc::new(handler))))
    }

    /// Wrap an existing handler object.
    pub fn from_handler(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            metadata: None,
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: CommandMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl From<Arc<dyn Handler>> for PluginCommand {
    fn from(handler: Arc<dyn Handler>) -> Self {
        Self::from_handler(handler)
    }
}

/// Compose the registered name of a plugin command.
pub fn namespaced(plugin_name: &str, short_name: &str) -> String {
    format!("{plugin_name}{PLUGIN_SEPARATOR}{short_name}")
}
