use crate::error::{PackforgeError, Result};
use crate::project_identity;
use directories::{ProjectDirs, UserDirs};
use std::path::{Path, PathBuf};

pub const DEFAULT_OS_RELEASE: &str = "/etc/os-release";

pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();

    if !path_str.starts_with("~") {
        return Ok(path.to_path_buf());
    }

    let user_dirs = UserDirs::new().ok_or_else(|| {
        PackforgeError::Other("Could not determine user home directory".to_string())
    })?;

    let home = user_dirs.home_dir();

    if path_str == "~" {
        return Ok(home.to_path_buf());
    }

    let stripped = path_str
        .strip_prefix("~/")
        .ok_or_else(|| PackforgeError::Other(format!("Invalid path format: {}", path_str)))?;

    Ok(home.join(stripped))
}

pub fn config_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(
        "com",
        project_identity::CONFIG_DIR_NAME,
        project_identity::CONFIG_DIR_NAME,
    )
    .ok_or_else(|| {
        PackforgeError::Other("Could not determine config directory".to_string())
    })?;
    Ok(proj.config_dir().to_path_buf())
}

/// Settings file: `PACKFORGE_CONFIG` when set, else `<config_dir>/settings.kdl`.
pub fn settings_file() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(project_identity::env_key("CONFIG")) {
        return expand_home(Path::new(&path));
    }
    Ok(config_dir()?.join(project_identity::SETTINGS_FILE_BASENAME))
}

/// Host identification file: `PACKFORGE_OS_RELEASE` when set, else `/etc/os-release`.
pub fn os_release_file() -> PathBuf {
    std::env::var_os(project_identity::env_key("OS_RELEASE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OS_RELEASE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_untouched() {
        let path = Path::new("/etc/packforge/settings.kdl");
        assert_eq!(expand_home(path).unwrap(), path);
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(dirs) = UserDirs::new() {
            let expanded = expand_home(Path::new("~/settings.kdl")).unwrap();
            assert_eq!(expanded, dirs.home_dir().join("settings.kdl"));
        }
    }

    #[test]
    fn config_dir_ends_with_project_name() {
        if let Ok(dir) = config_dir() {
            assert!(dir.to_string_lossy().contains("packforge"));
        }
    }
}
