//! Configuration module for the command registry.
//!
//! Handles loading and validating settings from TOML files.

mod settings;

pub use settings::*;
