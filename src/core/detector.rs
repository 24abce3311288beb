use crate::core::types::Backend;
use crate::error::{PackforgeError, Result};
use crate::traits::HostIdentitySource;
use crate::ui;
use crate::utils::paths;
use std::fs;
use std::path::PathBuf;

/// Ordered distro markers. First match wins, so derivatives that mention
/// their parent (e.g. Ubuntu's `ID_LIKE=debian`) still resolve correctly.
pub const DISTRO_MARKERS: &[(&str, Backend)] = &[
    ("ubuntu", Backend::Apt),
    ("debian", Backend::Apt),
    ("fedora", Backend::Dnf),
    ("centos", Backend::Yum),
    ("arch", Backend::Pacman),
];

/// Pick a backend from raw identification text (case-insensitive substring match).
pub fn detect_from_text(identity: &str) -> Backend {
    let lowered = identity.to_lowercase();

    DISTRO_MARKERS
        .iter()
        .find(|(marker, _)| lowered.contains(marker))
        .map(|(_, backend)| *backend)
        .unwrap_or(Backend::Unknown)
}

/// Detect the backend for this host. Never fails: an unreadable source or
/// unmatched text yields `Backend::Unknown`.
pub fn detect(source: &dyn HostIdentitySource) -> Backend {
    match source.read() {
        Ok(identity) => {
            let backend = detect_from_text(&identity);
            if backend.is_known() {
                ui::debug(&format!("Detected backend: {}", backend));
            } else {
                ui::warning("Could not match host distribution to a supported package manager");
            }
            backend
        }
        Err(e) => {
            ui::warning(&format!("Host identification unavailable: {}", e));
            Backend::Unknown
        }
    }
}

/// Reads identification text from an os-release style file.
pub struct OsReleaseFile {
    path: PathBuf,
}

impl OsReleaseFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `/etc/os-release`, or the path in `PACKFORGE_OS_RELEASE` when set.
    pub fn system() -> Self {
        Self::new(paths::os_release_file())
    }
}

impl HostIdentitySource for OsReleaseFile {
    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|source| PackforgeError::IoError {
            path: self.path.clone(),
            source,
        })
    }
}
