use crate::utils::machine_output::OutputFormat;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "packforge",
    about = "One command set for apt, dnf, yum and pacman",
    long_about = "Unified front-end for native Linux package managers. Detects the host's \
                  package manager and translates install, remove, update, upgrade and list \
                  into the matching native command.",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Show package manager output and debug details
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Only print errors and requested data
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Skip package manager confirmation prompts
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Settings file (default: <config dir>/packforge/settings.kdl)
    #[arg(long, value_name = "PATH", global = true, env = "PACKFORGE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install one or more packages
    ///
    /// Backend output is captured, so a confirmation prompt is not shown.
    /// Pass --yes (or set `noconfirm` in settings) to skip it.
    Install {
        /// Package names
        #[arg(required = true, value_name = "PACKAGE")]
        packages: Vec<String>,
    },

    /// Remove one or more packages
    ///
    /// Backend output is captured, so a confirmation prompt is not shown.
    /// Pass --yes (or set `noconfirm` in settings) to skip it.
    Remove {
        /// Package names
        #[arg(required = true, value_name = "PACKAGE")]
        packages: Vec<String>,
    },

    /// Refresh package metadata (apt update, dnf check-update, ...)
    Update,

    /// Upgrade installed packages
    Upgrade,

    /// List installed packages (always a fresh listing)
    List {
        /// Only show lines containing this text
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,

        /// Machine-readable output
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Check whether a package is installed (exit code 1 when absent)
    Check {
        /// Package name (substring match against the listing)
        package: String,

        /// Machine-readable output
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show detected backend and effective settings
    Info {
        /// Machine-readable output
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
