//! Handler for Databricks apps.

use std::sync::Arc;

use tracing::{info, warn};
use warden_config::ResourceConfig;
use warden_workspace::{App, WorkspaceClient};

use crate::monitor::errors::MonitorError;
use crate::monitor::traits::ResourceHandler;
use crate::monitor::types::{ResourceRecord, ResourceType};

pub struct AppsHandler {
    client: Arc<WorkspaceClient>,
    config: ResourceConfig,
}

impl AppsHandler {
    pub fn new(client: Arc<WorkspaceClient>, config: ResourceConfig) -> Self {
        Self { client, config }
    }
}

impl ResourceHandler for AppsHandler {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Apps
    }

    fn config(&self) -> &ResourceConfig {
        &self.config
    }

    fn list_resources(&self) -> Result<Vec<ResourceRecord>, MonitorError> {
        let apps = self
            .client
            .list_apps()
            .map_err(|e| MonitorError::ListingFailed {
                resource_type: self.resource_type().to_string(),
                source: e,
            })?;

        Ok(apps.into_iter().map(record_from_app).collect())
    }

    fn delete_resource(&self, resource_id: &str) -> Result<bool, MonitorError> {
        match self.client.delete_app(resource_id) {
            Ok(()) => {
                info!(event = "core.apps.deleted", name = resource_id);
                Ok(true)
            }
            Err(e) if e.is_api_response() => {
                warn!(
                    event = "core.apps.delete_refused",
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

/// Project one app into the uniform record shape.
///
/// The app name is the stable identity for both whitelist lookup and
/// deletion. A missing nested status maps to the `"UNKNOWN"` sentinel.
fn record_from_app(app: App) -> ResourceRecord {
    let state = app
        .status
        .as_ref()
        .and_then(|s| s.state.clone())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let raw = serde_json::to_value(&app).unwrap_or(serde_json::Value::Null);

    ResourceRecord {
        id: app.name.clone(),
        name: app.name,
        state,
        creator: app.creator,
        created_at: app.create_time,
        raw,
    }
}
