use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use warden_core::events;
use warden_core::monitor::{self, ActionMode, MonitorError, ReportStatus, Violation};

use super::helpers::{connect_workspace, parse_resource_type};

pub(crate) fn handle_check_command(
    sub_matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let resource_type = parse_resource_type(sub_matches)?;

    let action_mode = {
        let raw = sub_matches
            .get_one::<String>("action-mode")
            .ok_or("--action-mode is required")?;
        match raw.parse::<ActionMode>() {
            Ok(mode) => mode,
            Err(e) => {
                eprintln!("{}", e);
                error!(event = "cli.invalid_action_mode", action_mode = %raw);
                events::log_app_error(&e);
                return Err(e.into());
            }
        }
    };

    let whitelist_path = sub_matches
        .get_one::<String>("whitelist-path")
        .map(PathBuf::from);
    let dry_run = sub_matches.get_flag("dry-run");
    let json_output = sub_matches.get_flag("json");

    info!(
        event = "cli.check_started",
        resource_type = %resource_type,
        action_mode = %action_mode,
        dry_run = dry_run,
    );

    let config =
        match warden_config::load_resource_config(resource_type.as_str(), whitelist_path.as_deref())
        {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Failed to load whitelist for resource type '{}': {}",
                    resource_type, e
                );
                error!(event = "cli.check_config_failed", resource_type = %resource_type, error = %e);
                events::log_app_error(&e);
                return Err(e.into());
            }
        };

    let client = connect_workspace()?;
    let handler = monitor::registry::create_handler(resource_type, client, config);

    let mut violations = match monitor::check_resources(handler.as_ref(), dry_run) {
        Ok(violations) => violations,
        Err(e) => {
            eprintln!("Check failed for resource type '{}': {}", resource_type, e);
            error!(event = "cli.check_failed", resource_type = %resource_type, error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if violations.is_empty() {
        if json_output {
            print_violations_json(&violations)?;
        } else {
            println!(
                "No violations found. All {} are whitelisted.",
                resource_type
            );
        }
        info!(event = "cli.check_completed_clean", resource_type = %resource_type);
        return Ok(());
    }

    if dry_run {
        report_dry_run(&violations, action_mode, json_output)?;
        info!(
            event = "cli.check_completed_dry_run",
            resource_type = %resource_type,
            violations = violations.len(),
        );
        return Ok(());
    }

    info!(
        event = "cli.handling_violations",
        resource_type = %resource_type,
        action_mode = %action_mode,
        violations = violations.len(),
    );

    match monitor::handle_violations(handler.as_ref(), &mut violations, action_mode) {
        Ok(report) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for action in &report.actions {
                    println!("{}", action);
                }
            }

            if report.status == ReportStatus::PartialFailure {
                eprintln!("Some actions failed. Check logs for details.");
                error!(
                    event = "cli.check_partial_failure",
                    resource_type = %resource_type,
                );
                return Err("Delete actions partially failed".into());
            }

            info!(event = "cli.check_completed", resource_type = %resource_type);
            Ok(())
        }
        Err(e @ MonitorError::AlertRaised { .. }) => {
            // The non-zero exit is the alert channel for the invoking scheduler
            if json_output {
                print_violations_json(&violations)?;
            }
            eprintln!("{}", e);
            events::log_app_error(&e);
            Err(e.into())
        }
        Err(e) => {
            eprintln!("Failed to handle violations for '{}': {}", resource_type, e);
            error!(event = "cli.check_failed", resource_type = %resource_type, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn report_dry_run(
    violations: &[Violation],
    action_mode: ActionMode,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        print_violations_json(violations)?;
        return Ok(());
    }

    println!("[DRY RUN] Would handle {} violations:", violations.len());
    for violation in violations {
        println!("[DRY RUN] - {}: {}", violation.id, violation.details);
    }

    match action_mode {
        ActionMode::Alert => {
            println!("[DRY RUN] Would fail the run to raise an alert");
        }
        ActionMode::Delete => {
            println!("[DRY RUN] Would delete {} resources", violations.len());
        }
    }

    Ok(())
}

fn print_violations_json(violations: &[Violation]) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(violations)?);
    Ok(())
}
