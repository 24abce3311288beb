//! Packforge: one command vocabulary over apt, dnf, yum and pacman.
//!
//! The host's package manager is detected once from os-release. Abstract
//! operations (install, remove, update, upgrade, list, check) are resolved
//! through a static command table, executed, and followed by a refresh of
//! the cached installed-package listing when they succeed.
//!
//! ```rust,no_run
//! use packforge::config::Configuration;
//! use packforge::forge::PackageForge;
//!
//! let mut forge = PackageForge::from_system(&Configuration::default());
//! forge.install(&["curl"])?;
//! assert!(forge.check_installed("curl"));
//! # Ok::<(), packforge::error::PackforgeError>(())
//! ```

pub mod backends;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod forge;
pub mod project_identity;
pub mod traits;
pub mod ui;
pub mod utils;

use clap::Parser;
use std::process::exit;

/// Run packforge CLI entrypoint.
pub fn run_cli() {
    // 0. Initialize color settings (must be first)
    ui::init_colors();

    // 1. Signal handling: native package managers receive SIGINT themselves
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!();
        ui::mark_interrupted();
        ui::warning("Operation cancelled by user.");
    }) {
        ui::warning(&format!("Could not install Ctrl-C handler: {}", e));
    }

    // 2. Parse & Run
    let args = cli::args::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    if let Err(e) = cli::dispatcher::dispatch(&args) {
        ui::error(&format!("{}", e));
        exit(1);
    }

    if ui::is_interrupted() {
        exit(130);
    }
}
