//! Core library for warden.
//!
//! Enforces a whitelist policy over Databricks-managed resources: every
//! live resource of a configured type is checked against an allow-list,
//! and each one not on the list is deleted or alerted on. The enforcement
//! engine lives in [`monitor`]; resource kinds plug in by implementing
//! [`monitor::ResourceHandler`].

pub mod errors;
pub mod events;
pub mod logging;
pub mod monitor;

pub use logging::init_logging;
