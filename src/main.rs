use anyhow::Result;
use clap::{CommandFactory as _, Parser as _};

use dotbackup_cli::cli::{Cli, Command};
use dotbackup_cli::commands;
use dotbackup_cli::logging::{self, Logger};
use dotbackup_cli::store::resolve_home;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    let Some(command) = args.command else {
        Cli::command().print_help()?;
        return Ok(());
    };
    if matches!(command, Command::Version) {
        commands::version::run();
        return Ok(());
    }

    logging::init_subscriber(args.verbose, command.name());
    let log = Logger::new(command.name());
    log.debug(&format!("log: {}", log.log_path().display()));

    let store = commands::open_store(&args.global, resolve_home(), &log);

    match &command {
        Command::Backup(opts) => commands::backup::run(&store, opts, &log),
        Command::Restore(opts) => commands::restore::run(&store, opts, &log),
        Command::List => commands::list::run(&store, &log),
        Command::Add(opts) => commands::add::run(&store, opts, &log),
        Command::Remove(opts) => commands::remove::run(&store, opts, &log),
        Command::Version => Ok(()),
    }
}
