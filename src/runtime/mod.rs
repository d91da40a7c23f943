//! Runtime detection.
//!
//! Pure queries about the host process: runtime, platform, architecture,
//! environment variables and the deployment mode. Nothing here holds state.

mod environment;
mod info;

pub use environment::Environment;
pub use info::RuntimeInfo;

/// Look up an environment variable, treating unset and non-unicode values alike.
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Name of the host runtime.
pub fn runtime_name() -> &'static str {
    "rust"
}

/// Version of this crate.
pub fn runtime_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Target operating system, e.g. `linux`.
pub fn platform() -> &'static str {
    std::env::consts::OS
}

/// Target architecture, e.g. `x86_64`.
pub fn arch() -> &'static str {
    std::env::consts::ARCH
}
