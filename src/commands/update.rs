use crate::error::Result;
use crate::forge::PackageForge;
use crate::ui as output;

pub fn run(forge: &mut PackageForge) -> Result<()> {
    output::info(&format!("Refreshing package metadata ({})...", forge.backend()));
    forge.update()?;
    output::success("Package metadata is up to date");
    Ok(())
}
