//! Handler for Databricks model serving endpoints.

use std::sync::Arc;

use chrono::DateTime;
use tracing::{info, warn};
use warden_config::ResourceConfig;
use warden_workspace::{ServingEndpoint, WorkspaceClient};

use crate::monitor::errors::MonitorError;
use crate::monitor::traits::ResourceHandler;
use crate::monitor::types::{ResourceRecord, ResourceType};

pub struct ModelEndpointsHandler {
    client: Arc<WorkspaceClient>,
    config: ResourceConfig,
}

impl ModelEndpointsHandler {
    pub fn new(client: Arc<WorkspaceClient>, config: ResourceConfig) -> Self {
        Self { client, config }
    }
}

impl ResourceHandler for ModelEndpointsHandler {
    fn resource_type(&self) -> ResourceType {
        ResourceType::ModelEndpoints
    }

    fn config(&self) -> &ResourceConfig {
        &self.config
    }

    fn list_resources(&self) -> Result<Vec<ResourceRecord>, MonitorError> {
        let endpoints =
            self.client
                .list_serving_endpoints()
                .map_err(|e| MonitorError::ListingFailed {
                    resource_type: self.resource_type().to_string(),
                    source: e,
                })?;

        Ok(endpoints.into_iter().map(record_from_endpoint).collect())
    }

    fn delete_resource(&self, resource_id: &str) -> Result<bool, MonitorError> {
        match self.client.delete_serving_endpoint(resource_id) {
            Ok(()) => {
                info!(event = "core.endpoints.deleted", name = resource_id);
                Ok(true)
            }
            Err(e) if e.is_api_response() => {
                warn!(
                    event = "core.endpoints.delete_refused",
                    name = resource_id,
                    error = %e,
                );
                Ok(false)
            }
            Err(e) => Err(MonitorError::DeletionFailed {
                resource_type: self.resource_type().to_string(),
                resource_id: resource_id.to_string(),
                source: e,
            }),
        }
    }
}

/// Project one serving endpoint into the uniform record shape.
///
/// The endpoint name is the stable identity. The state surfaced is the
/// config-update status, the field that distinguishes an endpoint mid
/// rollout from a settled one; missing nested state maps to `"UNKNOWN"`.
fn record_from_endpoint(endpoint: ServingEndpoint) -> ResourceRecord {
    let state = endpoint
        .state
        .as_ref()
        .and_then(|s| s.config_update.clone())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let created_at = endpoint
        .creation_timestamp
        .and_then(DateTime::from_timestamp_millis);

    let raw = serde_json::to_value(&endpoint).unwrap_or(serde_json::Value::Null);

    ResourceRecord {
        id: endpoint.name.clone(),
        name: endpoint.name,
        state,
        creator: endpoint.creator,
        created_at,
        raw,
    }
}
