//! Ping command for health checking.

use chrono::Utc;
use futures::future::{self, BoxFuture};
use futures::FutureExt;

use super::super::traits::{Handler, HandlerResult};
use super::super::types::CommandArgs;

/// Simple ping command that returns a pong response.
///
/// Used for health checks and verifying the registry is responsive.
pub struct PingCommand;

impl Handler for PingCommand {
    fn call(&self, _args: CommandArgs) -> BoxFuture<'static, HandlerResult> {
        future::ready(Ok(serde_json::json!({
            "pong": true,
            "timestamp": Utc::now().to_rfc3339(),
        })))
        .boxed()
    }
}
