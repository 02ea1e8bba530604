use std::path::Path;

use clap::ArgMatches;
use tracing::{error, info};

use warden_config::ResourceConfig;
use warden_core::events;
use warden_core::monitor;

use super::helpers::{connect_workspace, parse_resource_type};

const DEFAULT_OUTPUT_DIR: &str = "config/whitelists";

/// Bootstrap a whitelist from the live resources of a type: everything
/// that exists right now becomes allowed, and the operator prunes from
/// there.
pub(crate) fn handle_init_command(
    sub_matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let resource_type = parse_resource_type(sub_matches)?;
    let output_dir = sub_matches
        .get_one::<String>("output-dir")
        .map(String::as_str)
        .unwrap_or(DEFAULT_OUTPUT_DIR);

    info!(
        event = "cli.init_started",
        resource_type = %resource_type,
        output_dir = output_dir,
    );

    let client = connect_workspace()?;
    // Listing does not consult the whitelist
    let handler =
        monitor::registry::create_handler(resource_type, client, ResourceConfig::new([], false));

    let records = match handler.list_resources() {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Failed to list '{}': {}", resource_type, e);
            error!(event = "cli.init_failed", resource_type = %resource_type, error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();

    let path = match warden_config::write_whitelist(Path::new(output_dir), resource_type.as_str(), &ids)
    {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Failed to write whitelist for '{}': {}", resource_type, e);
            error!(event = "cli.init_failed", resource_type = %resource_type, error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    println!(
        "Created whitelist for {} at {} ({} ids)",
        resource_type,
        path.display(),
        ids.len()
    );

    info!(
        event = "cli.init_completed",
        resource_type = %resource_type,
        path = %path.display(),
        count = ids.len(),
    );

    Ok(())
}
