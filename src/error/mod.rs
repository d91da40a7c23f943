//! Error types for the command registry.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
