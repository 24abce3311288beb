use crate::error::Result;
use crate::forge::PackageForge;
use crate::ui as output;

pub fn run(forge: &mut PackageForge, packages: &[String]) -> Result<()> {
    output::info(&format!(
        "Installing {} with {}...",
        packages.join(", "),
        forge.backend()
    ));
    super::confirmation_hint(forge);

    forge.install(packages)?;

    output::success(&format!("Installed {} package(s)", packages.len()));
    Ok(())
}
