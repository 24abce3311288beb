//! Command dispatcher
//!
//! Routes CLI commands to their handlers. The forge is built once per
//! invocation, after argument parsing, and only for commands that need it.

use crate::cli::args::{Cli, Command, GlobalFlags};
use crate::commands;
use crate::config::settings::{CliOverrides, KdlSettingsFile};
use crate::error::Result;
use crate::forge::PackageForge;
use crate::utils::paths;
use clap::CommandFactory;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli) -> Result<()> {
    let command = match &args.command {
        Some(command) => command,
        None => {
            Cli::command().print_help()?;
            return Ok(());
        }
    };

    match command {
        Command::Completions { shell } => commands::completions::run(*shell),
        other => run_with_forge(&args.global, other),
    }
}

fn run_with_forge(global: &GlobalFlags, command: &Command) -> Result<()> {
    let settings = settings_file(global)?;
    let settings_path = settings
        .as_ref()
        .map(|file| file.path().display().to_string());
    let source = CliOverrides::new(settings, global.yes, global.verbose, global.quiet);
    let mut forge = PackageForge::from_system(&source);

    match command {
        Command::Install { packages } => commands::install::run(&mut forge, packages),
        Command::Remove { packages } => commands::remove::run(&mut forge, packages),
        Command::Update => commands::update::run(&mut forge),
        Command::Upgrade => commands::upgrade::run(&mut forge),
        Command::List { filter, format } => commands::list::run(
            &mut forge,
            commands::list::ListOptions {
                filter: filter.clone(),
                format: *format,
            },
        ),
        Command::Check { package, format } => commands::check::run(&forge, package, *format),
        Command::Info { format } => commands::info::run(&forge, settings_path, *format),
        Command::Completions { shell } => commands::completions::run(*shell),
    }
}

/// `--config` (or `PACKFORGE_CONFIG`) wins over the default location.
fn settings_file(global: &GlobalFlags) -> Result<Option<KdlSettingsFile>> {
    match &global.config {
        Some(path) => Ok(Some(KdlSettingsFile::new(paths::expand_home(path)?))),
        None => Ok(KdlSettingsFile::default_location()),
    }
}
