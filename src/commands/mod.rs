//! Command registry module.
//!
//! Contains the registry, the handler trait, plugin entries and the
//! built-in system commands.
//!
//! ## Adding a Command
//!
//! 1. Write an `async fn(CommandArgs) -> HandlerResult` (or a sync closure,
//!    or a type implementing `Handler`)
//! 2. Register it with `CommandRegistry::register`, or group it with others
//!    under a namespace via `CommandRegistry::plugin`

mod plugin;
mod registry;
mod traits;
mod types;

pub mod system;

pub use plugin::{namespaced, PluginCommand, PLUGIN_SEPARATOR};
pub use registry::CommandRegistry;
pub use traits::{Handler, HandlerResult};
pub use types::{CommandArgs, CommandInfo, CommandMetadata};
