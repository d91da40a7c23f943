//! Runtime info command for diagnostics.

use futures::future::{self, BoxFuture};
use futures::FutureExt;

use crate::runtime::{Environment, RuntimeInfo};

use super::super::traits::{Handler, HandlerResult};
use super::super::types::CommandArgs;

/// Reports the host runtime, platform and environment mode.
///
/// Returns:
/// - runtime / version: Host runtime and crate version
/// - platform / arch: Target OS and architecture
/// - pid: Current process id
/// - environment and the is_* mode flags
pub struct RuntimeInfoCommand {
    environment: Environment,
}

impl RuntimeInfoCommand {
    /// Create a new runtime info command reporting `environment`.
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }
}

impl Handler for RuntimeInfoCommand {
    fn call(&self, _args: CommandArgs) -> BoxFuture<'static, HandlerResult> {
        let info = RuntimeInfo::with_environment(self.environment);
        let result: HandlerResult = serde_json::to_value(info).map_err(Into::into);
        future::ready(result).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_runtime_info_execute() {
        let cmd = RuntimeInfoCommand::new(Environment::Development);
        let data = cmd.call(CommandArgs::empty()).await.unwrap();

        assert_eq!(data["runtime"], "rust");
        assert_eq!(data["environment"], "development");
        assert_eq!(data["is_development"], true);
        assert_eq!(data["platform"], std::env::consts::OS);
        assert!(data["pid"].is_u64());
    }
}
