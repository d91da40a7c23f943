//! Timeout handling for command execution.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{CommandErrorKind, RegistryError, RegistryResult};

/// Await a command future with a deadline.
///
/// # Arguments
///
/// * `name` - Command name, reported in the timeout error
/// * `timeout` - Maximum time to wait
/// * `operation` - Typically `registry.execute(name, args)`
///
/// # Note
///
/// On expiry the operation future is dropped. Work the handler already
/// handed off elsewhere (spawned tasks, threads) keeps running.
pub async fn with_timeout<F, T>(name: &str, timeout: Duration, operation: F) -> RegistryResult<T>
where
    F: Future<Output = RegistryResult<T>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                command = name,
                timeout_ms = timeout.as_millis() as u64,
                "Command timed out"
            );
            Err(RegistryError::Command {
                kind: CommandErrorKind::Timeout {
                    name: name.to_string(),
                    timeout,
                },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandArgs, CommandRegistry, HandlerResult};
    use serde_json::json;

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout("answer", Duration::from_secs(5), async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_error_propagation() {
        let result: RegistryResult<i32> = with_timeout("broken", Duration::from_secs(5), async {
            Err(RegistryError::Config {
                message: "test error".to_string(),
            })
        })
        .await;
        assert!(matches!(result, Err(RegistryError::Config { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_expires() {
        async fn hang(_args: CommandArgs) -> HandlerResult {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(json!(null))
        }

        let registry = CommandRegistry::new();
        registry.register("hang", hang, None);

        let err = with_timeout(
            "hang",
            Duration::from_secs(2),
            registry.execute("hang", CommandArgs::empty()),
        )
        .await
        .unwrap_err();

        assert!(err.is_timeout());
        assert!(err.to_string().contains("timed out after 2s"));
        assert!(registry.has("hang"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_reports_sub_second_deadline() {
        let err = with_timeout("slow", Duration::from_millis(500), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        })
        .await
        .unwrap_err();

        assert!(matches!(
            &err,
            RegistryError::Command {
                kind: CommandErrorKind::Timeout { timeout, .. }
            } if *timeout == Duration::from_millis(500)
        ));
        assert!(err.to_string().contains("timed out after 500ms"));
    }
}
