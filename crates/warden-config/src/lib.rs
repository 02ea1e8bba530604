//! Whitelist configuration for warden.
//!
//! One JSON document per resource type, resolved through a layered set of
//! sources (explicit path, packaged default, workspace path, local path)
//! and validated into an immutable [`ResourceConfig`].

mod defaults;
mod errors;
mod loader;

pub use errors::ConfigError;
pub use loader::{ResourceConfig, load_resource_config, write_whitelist};
