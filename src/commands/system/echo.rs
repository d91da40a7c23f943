//! Echo command.

use futures::future::{self, BoxFuture};
use futures::FutureExt;
use serde_json::Value;

use super::super::traits::{Handler, HandlerResult};
use super::super::types::CommandArgs;

/// Returns its arguments as a JSON array.
pub struct EchoCommand;

impl Handler for EchoCommand {
    fn call(&self, args: CommandArgs) -> BoxFuture<'static, HandlerResult> {
        future::ready(Ok(Value::Array(args.into_vec()))).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_echo_returns_arguments() {
        let result = EchoCommand.call(crate::args![1, "two", null]).await.unwrap();
        assert_eq!(result, json!([1, "two", null]));
    }

    #[tokio::test]
    async fn test_echo_empty() {
        let result = EchoCommand.call(CommandArgs::empty()).await.unwrap();
        assert_eq!(result, json!([]));
    }
}
