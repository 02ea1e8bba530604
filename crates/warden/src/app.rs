use clap::{Arg, ArgAction, Command};
use warden_core::monitor::supported_types_string;

pub fn build_cli() -> Command {
    Command::new("warden")
        .about("Monitor Databricks resources and enforce whitelist policies")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Show the full structured log stream"),
        )
        .subcommand(
            Command::new("check")
                .about("Check resources against the whitelist and act on violations")
                .arg(resource_type_arg())
                .arg(
                    Arg::new("action-mode")
                        .long("action-mode")
                        .value_name("MODE")
                        .required(true)
                        .help("Action for resources not in the whitelist: delete or alert"),
                )
                .arg(
                    Arg::new("whitelist-path")
                        .long("whitelist-path")
                        .value_name("FILE")
                        .help("Custom path to a whitelist JSON file"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Identify violations without taking action"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the violation report as JSON on stdout"),
                ),
        )
        .subcommand(
            Command::new("init")
                .about("Bootstrap a whitelist file from the live resources of a type")
                .arg(resource_type_arg())
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .value_name("DIR")
                        .help("Directory to write the whitelist into [default: config/whitelists]"),
                ),
        )
}

fn resource_type_arg() -> Arg {
    Arg::new("resource-type")
        .long("resource-type")
        .value_name("TYPE")
        .required(true)
        .help(format!(
            "Type of resource to monitor ({})",
            supported_types_string()
        ))
}
