//! Resource handler trait definition.

use warden_config::ResourceConfig;

use super::errors::MonitorError;
use super::types::{ResourceRecord, ResourceType};

/// Trait defining the interface for resource kind handlers.
///
/// Each enforced resource kind (apps, model serving endpoints) implements
/// this trait to translate the platform's enumeration and deletion APIs
/// into the uniform [`ResourceRecord`] shape. The enforcement logic in
/// [`super::engine`] is written once against this trait.
pub trait ResourceHandler: Send + Sync {
    /// The kind of resource this handler enforces.
    fn resource_type(&self) -> ResourceType;

    /// The whitelist and filtering options this handler was built with.
    fn config(&self) -> &ResourceConfig;

    /// Enumerate every live resource of this kind in the workspace.
    ///
    /// A platform failure propagates as `MonitorError::ListingFailed`;
    /// the engine does not retry.
    fn list_resources(&self) -> Result<Vec<ResourceRecord>, MonitorError>;

    /// Attempt to delete one resource by id.
    ///
    /// Three-way outcome: `Ok(true)` confirmed success, `Ok(false)` the
    /// platform refused (the handler logs the refusal), `Err(_)` the
    /// attempt itself failed unexpectedly. Callers treat the last two as
    /// recoverable aggregate-level events, not fatal errors.
    fn delete_resource(&self, resource_id: &str) -> Result<bool, MonitorError>;

    /// Human-readable summary of a record, for logging and alerting.
    fn resource_details(&self, record: &ResourceRecord) -> String {
        let mut details = vec![
            format!("Name: {}", record.name),
            format!("State: {}", record.state),
            format!(
                "Creator: {}",
                record.creator.as_deref().unwrap_or("UNKNOWN")
            ),
        ];

        if let Some(created_at) = record.created_at {
            details.push(format!("Created: {}", created_at.to_rfc3339()));
        }

        details.join(" | ")
    }
}
