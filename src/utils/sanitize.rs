//! Input validation for package names
//!
//! Names are passed as separate argv entries (never through a shell), but
//! a name starting with `-` would still be read by the backend as a flag.

use crate::error::{PackforgeError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Safe characters for package names across apt, dnf, yum and pacman.
/// Allows: alphanumeric, dash, underscore, dot, plus, at sign, slash, colon (arch qualifiers)
static SAFE_PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9@._+/:-]+$").expect("Invalid regex pattern"));

/// Characters that could be dangerous in shell contexts
static SHELL_DANGEROUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[;`$(){}|&<>\\'"\n\r\t ]"#).expect("Invalid regex pattern"));

/// Validate a package name before it is placed into an argv.
pub fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PackforgeError::InvalidPackageName(
            "Package name cannot be empty".to_string(),
        ));
    }

    if name.len() > 256 {
        let prefix: String = name.chars().take(50).collect();
        return Err(PackforgeError::InvalidPackageName(format!(
            "Package name too long (max 256 chars): {}...",
            prefix
        )));
    }

    if name.starts_with('-') {
        return Err(PackforgeError::InvalidPackageName(format!(
            "Package name cannot start with '-': {}",
            name
        )));
    }

    if SHELL_DANGEROUS.is_match(name) {
        return Err(PackforgeError::InvalidPackageName(format!(
            "Package name contains unsafe characters: {}",
            name
        )));
    }

    if !SAFE_PACKAGE_NAME.is_match(name) {
        return Err(PackforgeError::InvalidPackageName(format!(
            "Package name contains invalid characters: {}",
            name
        )));
    }

    if name.contains("..") {
        return Err(PackforgeError::InvalidPackageName(format!(
            "Package name cannot contain path traversal: {}",
            name
        )));
    }

    Ok(())
}

/// Validate a list of package names
pub fn validate_package_names<S: AsRef<str>>(names: &[S]) -> Result<()> {
    for name in names {
        validate_package_name(name.as_ref())?;
    }
    Ok(())
}

/// Drop repeated names, keeping first-occurrence order.
pub fn dedup_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .iter()
        .map(|n| n.as_ref())
        .filter(|n| seen.insert(*n))
        .map(str::to_string)
        .collect()
}
