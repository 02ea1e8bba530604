//! Handler registry: resource type name to handler implementation.

use std::sync::Arc;

use tracing::debug;
use warden_config::ResourceConfig;
use warden_workspace::WorkspaceClient;

use super::handlers::{AppsHandler, ModelEndpointsHandler};
use super::traits::ResourceHandler;
use super::types::ResourceType;

/// Build the handler for a resource type.
///
/// The set is closed: `ResourceType` itself is the registry key, so an
/// unsupported name is rejected at parse time
/// (`MonitorError::UnsupportedResourceType`) and a handler is never
/// partially constructed.
pub fn create_handler(
    resource_type: ResourceType,
    client: Arc<WorkspaceClient>,
    config: ResourceConfig,
) -> Box<dyn ResourceHandler> {
    debug!(event = "core.registry.handler_created", resource_type = %resource_type);

    match resource_type {
        ResourceType::Apps => Box::new(AppsHandler::new(client, config)),
        ResourceType::ModelEndpoints => Box::new(ModelEndpointsHandler::new(client, config)),
    }
}

/// Every resource type with a registered handler.
///
/// Queried by the CLI to validate input before any network activity.
pub fn supported_types() -> &'static [ResourceType] {
    ResourceType::all()
}
