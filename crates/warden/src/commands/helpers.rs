use std::sync::Arc;

use clap::ArgMatches;
use tracing::error;

use warden_core::events;
use warden_core::monitor::ResourceType;
use warden_workspace::WorkspaceClient;

/// Parse and validate the `--resource-type` argument.
///
/// Validation happens here, before any network activity, so an
/// unsupported type never reaches the platform client.
pub(crate) fn parse_resource_type(
    sub_matches: &ArgMatches,
) -> Result<ResourceType, Box<dyn std::error::Error>> {
    let raw = sub_matches
        .get_one::<String>("resource-type")
        .ok_or("--resource-type is required")?;

    match raw.parse::<ResourceType>() {
        Ok(resource_type) => Ok(resource_type),
        Err(e) => {
            eprintln!("{}", e);
            error!(event = "cli.invalid_resource_type", resource_type = %raw);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// Build the workspace client from the environment.
pub(crate) fn connect_workspace() -> Result<Arc<WorkspaceClient>, Box<dyn std::error::Error>> {
    match WorkspaceClient::from_env() {
        Ok(client) => Ok(Arc::new(client)),
        Err(e) => {
            eprintln!("{}", e);
            error!(event = "cli.workspace_client_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
