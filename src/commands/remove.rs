use crate::error::Result;
use crate::forge::PackageForge;
use crate::ui as output;

pub fn run(forge: &mut PackageForge, packages: &[String]) -> Result<()> {
    output::info(&format!(
        "Removing {} with {}...",
        packages.join(", "),
        forge.backend()
    ));
    super::confirmation_hint(forge);

    forge.remove(packages)?;

    output::success(&format!("Removed {} package(s)", packages.len()));
    Ok(())
}
