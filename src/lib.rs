//! Lumo Command Registry Library
//!
//! This crate provides an in-process command registry: named handlers with
//! optional metadata, namespaced plugin installation, execution with error
//! wrapping, and help generation.
//!
//! ```
//! use lumo_registry::{args, CommandArgs, CommandMetadata, CommandRegistry, HandlerResult};
//!
//! async fn add(args: CommandArgs) -> HandlerResult {
//!     Ok(serde_json::json!(args.get_i64(0)? + args.get_i64(1)?))
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let registry = CommandRegistry::new();
//! registry.register(
//!     "calculate",
//!     add,
//!     Some(CommandMetadata::new().with_description("Add two numbers")),
//! );
//! assert_eq!(registry.execute("calculate", args![5, 3]).await.unwrap(), 8);
//! # });
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod runtime;

#[doc(hidden)]
pub use serde_json;

pub use commands::{
    CommandArgs, CommandInfo, CommandMetadata, CommandRegistry, Handler, HandlerResult,
    PluginCommand,
};
pub use error::{HandlerError, RegistryError, RegistryResult};
