//! Execution helpers applied around the registry.
//!
//! The registry never bounds how long a handler runs; callers that want a
//! deadline wrap `execute` with [`with_timeout`].

mod timeout;

pub use timeout::with_timeout;
