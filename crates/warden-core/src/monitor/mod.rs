//! Whitelist enforcement over Databricks-managed resources.
//!
//! One generic list → filter → act pipeline: a [`ResourceHandler`]
//! enumerates a resource kind, [`engine::check_resources`] classifies
//! every record against the whitelist and the managed-resource filter,
//! and [`engine::handle_violations`] dispatches the configured action
//! (delete each violation, or fail the run as the alert signal).

pub mod engine;
pub mod errors;
pub mod handlers;
pub mod registry;
pub mod traits;
pub mod types;

pub use engine::{check_resources, handle_violations, is_managed};
pub use errors::MonitorError;
pub use traits::ResourceHandler;
pub use types::{
    ActionMode, ActionOutcome, ActionReport, ReportStatus, ResourceRecord, ResourceType,
    Violation, supported_types_string,
};
