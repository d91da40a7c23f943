//! Built-in system commands.
//!
//! Installed as two plugins:
//! - `system:ping` - Health check
//! - `system:echo` - Return the arguments unchanged
//! - `runtime:info` - Describe the host runtime

mod echo;
mod ping;
mod runtime_info;

use std::sync::Arc;

use tracing::debug;

use crate::runtime::Environment;

use super::plugin::PluginCommand;
use super::registry::CommandRegistry;
use super::types::CommandMetadata;

pub use echo::EchoCommand;
pub use ping::PingCommand;
pub use runtime_info::RuntimeInfoCommand;

/// Install the built-in commands into a registry.
pub fn register_builtins(registry: &CommandRegistry, environment: Environment) {
    registry.plugin(
        "system",
        [
            (
                "ping",
                PluginCommand::from_handler(Arc::new(PingCommand)).with_metadata(
                    CommandMetadata::new()
                        .with_description("Check that the registry is responsive")
                        .with_usage("system:ping")
                        .with_example("system:ping"),
                ),
            ),
            (
                "echo",
                PluginCommand::from_handler(Arc::new(EchoCommand)).with_metadata(
                    CommandMetadata::new()
                        .with_description("Return the given arguments")
                        .with_usage("system:echo [args...]")
                        .with_example("system:echo 1 two"),
                ),
            ),
        ],
    );

    registry.plugin(
        "runtime",
        [(
            "info",
            PluginCommand::from_handler(Arc::new(RuntimeInfoCommand::new(environment)))
                .with_metadata(
                    CommandMetadata::new()
                        .with_description("Show runtime, platform and environment details")
                        .with_usage("runtime:info"),
                ),
        )],
    );

    debug!(environment = %environment, "Built-in commands registered");
}
