use crate::config::settings::Configuration;
use crate::core::types::Backend;
use crate::error::Result;
use crate::forge::PackageForge;
use crate::project_identity;
use crate::ui as output;
use crate::utils::machine_output::{self, OutputFormat};
use crate::utils::paths;
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct InfoData {
    version: &'static str,
    backend: Backend,
    binary: Option<&'static str>,
    binary_available: bool,
    settings_file: Option<String>,
    os_release: String,
    config: Configuration,
    installed_lines: usize,
    snapshot_taken_at: String,
}

pub fn run(
    forge: &PackageForge,
    settings_file: Option<String>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let backend = forge.backend();
    let binary = backend.binary();
    let binary_available = binary.is_some_and(|bin| which::which(bin).is_ok());

    let data = InfoData {
        version: env!("CARGO_PKG_VERSION"),
        backend,
        binary,
        binary_available,
        settings_file,
        os_release: paths::os_release_file().display().to_string(),
        config: *forge.config(),
        installed_lines: forge.cached().len(),
        snapshot_taken_at: forge.cached().refreshed_at().to_rfc3339(),
    };

    if let Some(format) = format {
        let mut warnings = Vec::new();
        if !backend.is_known() {
            warnings.push("No supported package manager detected".to_string());
        }
        return machine_output::emit_v1("info", data, warnings, vec![], format);
    }

    output::header(&format!("{} {}", project_identity::DISPLAY_NAME, data.version));

    let backend_label = if backend.is_known() {
        backend.to_string().green().to_string()
    } else {
        backend.to_string().red().to_string()
    };
    output::keyval("Backend", &backend_label);

    if let Some(bin) = binary {
        let status = if binary_available {
            "found on PATH".green()
        } else {
            "not found on PATH".yellow()
        };
        output::keyval("Binary", &format!("{} ({})", bin, status));
    }

    output::keyval("Host identity", &data.os_release);
    output::keyval(
        "Settings",
        data.settings_file.as_deref().unwrap_or("(defaults)"),
    );
    output::keyval("Auto-confirm", &data.config.auto_confirm.to_string());
    output::keyval("Verbose", &data.config.verbose.to_string());
    output::keyval("Elevate", &data.config.elevate.to_string());
    output::keyval(
        "Command timeout",
        &data
            .config
            .command_timeout
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "none".to_string()),
    );
    output::keyval("Installed lines", &data.installed_lines.to_string());

    if !backend.is_known() {
        output::warning("No supported package manager detected (apt, dnf, yum, pacman)");
    }

    Ok(())
}
