//! Subcommand handlers
//!
//! Each handler takes a ready forge and reports through `ui`.

pub mod check;
pub mod completions;
pub mod info;
pub mod install;
pub mod list;
pub mod remove;
pub mod update;
pub mod upgrade;

use crate::forge::PackageForge;
use crate::ui as output;

/// Backend output is captured, so its confirmation prompt never reaches the
/// terminal. Warn before a run that may block on it.
fn confirmation_hint(forge: &PackageForge) {
    if !forge.config().auto_confirm {
        output::info(&format!(
            "{} may ask for confirmation without showing the prompt; answer it or rerun with --yes",
            forge.backend()
        ));
    }
}
