//! Handler trait definition and closure adapters.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::Value;

use crate::error::HandlerError;

use super::types::CommandArgs;

/// Result returned by every handler.
pub type HandlerResult = Result<Value, HandlerError>;

/// Core trait for everything the registry can invoke.
///
/// Handlers receive only their own arguments and return a future, whether
/// or not the work behind it is asynchronous. Most callers never implement
/// this directly; `CommandRegistry::register` and
/// `CommandRegistry::register_sync` adapt plain functions and closures.
///
/// # Example
///
/// ```ignore
/// pub struct GreetCommand;
///
/// impl Handler for GreetCommand {
///     fn call(&self, args: CommandArgs) -> BoxFuture<'static, HandlerResult> {
///         Box::pin(async move {
///             let name = args.get_str(0)?.to_string();
///             Ok(serde_json::json!(format!("hello {name}")))
///         })
///     }
/// }
/// ```
pub trait Handler: Send + Sync {
    /// Invoke the handler with positional arguments.
    fn call(&self, args: CommandArgs) -> BoxFuture<'static, HandlerResult>;
}

/// Adapter for functions returning a future.
pub(crate) struct AsyncFn<F>(pub(crate) F);

impl<F, Fut> Handler for AsyncFn<F>
where
    F: Fn(CommandArgs) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, args: CommandArgs) -> BoxFuture<'static, HandlerResult> {
        (self.0)(args).boxed()
    }
}

/// Adapter for synchronous closures.
///
/// The closure runs when the returned future is first polled, so a panic
/// surfaces inside `execute` rather than at call time.
pub(crate) struct SyncFn<F>(pub(crate) Arc<F>);

impl<F> Handler for SyncFn<F>
where
    F: Fn(CommandArgs) -> HandlerResult + Send + Sync + 'static,
{
    fn call(&self, args: CommandArgs) -> BoxFuture<'static, HandlerResult> {
        let f = Arc::clone(&self.0);
        async move { f(args) }.boxed()
    }
}
