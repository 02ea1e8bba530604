use clap::ArgMatches;

mod check;
mod helpers;
mod init;

pub(crate) fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("check", sub_matches)) => check::handle_check_command(sub_matches),
        Some(("init", sub_matches)) => init::handle_init_command(sub_matches),
        _ => Err("Unknown command. Run 'warden --help' for usage.".into()),
    }
}
