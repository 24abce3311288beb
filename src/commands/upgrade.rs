//! Upgrade command
//!
//! Upgrades every installed package through the detected backend. The
//! cached listing is refreshed afterwards so `check` sees new versions.

use crate::error::Result;
use crate::forge::PackageForge;
use crate::ui as output;

pub fn run(forge: &mut PackageForge) -> Result<()> {
    output::separator();
    output::info(&format!("Upgrading packages with {}...", forge.backend()));

    let before = forge.cached().len();
    forge.upgrade()?;
    let after = forge.cached().len();

    output::separator();
    output::success(&format!(
        "Upgrade complete ({} listing lines, was {})",
        after, before
    ));
    Ok(())
}
