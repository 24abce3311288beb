use crate::error::{PackforgeError, Result};
use crate::forge::PackageForge;
use crate::ui as output;
use crate::utils::machine_output::{self, OutputFormat};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CheckData<'a> {
    package: &'a str,
    installed: bool,
    snapshot_taken_at: String,
}

/// Answer from the snapshot taken at startup; no extra listing is run.
pub fn run(forge: &PackageForge, package: &str, format: Option<OutputFormat>) -> Result<()> {
    let installed = forge.check_installed(package);

    if let Some(format) = format {
        let data = CheckData {
            package,
            installed,
            snapshot_taken_at: forge.cached().refreshed_at().to_rfc3339(),
        };
        let errors = if installed {
            vec![]
        } else {
            vec![format!("Package '{}' is not installed", package)]
        };
        machine_output::emit_v1("check", data, vec![], errors, format)?;
    } else if installed {
        output::success(&format!("{} is installed", package));
    }

    if installed {
        Ok(())
    } else {
        Err(PackforgeError::NotInstalled(package.to_string()))
    }
}
