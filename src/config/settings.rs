//! Settings Module
//!
//! Loads packforge settings from a KDL file:
//!
//! ```kdl
//! settings {
//!     noconfirm #true
//!     printing #false
//!     elevate #false
//!     command-timeout 600
//! }
//! ```
//!
//! Keys may also appear at the top level. Loading never fails: a missing
//! file yields defaults silently, a malformed one yields defaults with a
//! warning.

use crate::error::{PackforgeError, Result};
use crate::traits::ConfigSource;
use crate::ui;
use crate::utils::paths;
use kdl::{KdlDocument, KdlNode};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Execution settings, fixed for the lifetime of a forge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Configuration {
    /// Pass the backend's non-interactive flag (`-y`, `--noconfirm`).
    pub auto_confirm: bool,
    /// Echo the stdout of mutating commands.
    pub verbose: bool,
    /// Run mutating commands through sudo.
    pub elevate: bool,
    /// Deadline for a single command; `None` waits indefinitely.
    pub command_timeout: Option<Duration>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            auto_confirm: false,
            verbose: true,
            elevate: false,
            command_timeout: None,
        }
    }
}

/// Parse settings from KDL text. Keys not present keep their defaults.
pub fn parse_settings(content: &str) -> Result<Configuration> {
    let doc: KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        let err_msg = e.to_string();
        let hint = if err_msg.contains("unexpected end of file") {
            "\nHint: You might be missing a closing brace '}'."
        } else {
            "\nHint: Booleans are written #true / #false."
        };
        PackforgeError::ConfigError(format!("KDL parsing error: {}{}", err_msg, hint))
    })?;

    let mut config = Configuration::default();

    for node in doc.nodes() {
        if node.name().value() == "settings" {
            if let Some(children) = node.children() {
                for child in children.nodes() {
                    apply_setting(child, &mut config)?;
                }
            }
        } else {
            apply_setting(node, &mut config)?;
        }
    }

    Ok(config)
}

fn apply_setting(node: &KdlNode, config: &mut Configuration) -> Result<()> {
    let key = node.name().value();

    match key {
        "noconfirm" | "auto-confirm" | "auto_confirm" => {
            config.auto_confirm = require_bool(node)?;
        }
        "printing" | "verbose" => {
            config.verbose = require_bool(node)?;
        }
        "elevate" | "sudo" => {
            config.elevate = require_bool(node)?;
        }
        "command-timeout" | "command_timeout" => {
            let secs = node
                .entries()
                .first()
                .and_then(|e| e.value().as_integer())
                .filter(|secs| *secs >= 0)
                .ok_or_else(|| {
                    PackforgeError::ConfigError(format!(
                        "'{}' expects a non-negative number of seconds",
                        key
                    ))
                })?;
            config.command_timeout = match u64::try_from(secs) {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    return Err(PackforgeError::ConfigError(format!(
                        "'{}' is out of range",
                        key
                    )));
                }
            };
        }
        other => {
            ui::debug(&format!("Ignoring unknown setting '{}'", other));
        }
    }

    Ok(())
}

fn require_bool(node: &KdlNode) -> Result<bool> {
    parse_first_bool(node).ok_or_else(|| {
        PackforgeError::ConfigError(format!(
            "'{}' expects a boolean (#true/#false)",
            node.name().value()
        ))
    })
}

fn parse_first_bool(node: &KdlNode) -> Option<bool> {
    let entry = node.entries().first()?;

    if let Some(v) = entry.value().as_bool() {
        return Some(v);
    }

    entry
        .value()
        .as_string()
        .and_then(|v| match v.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        })
}

/// Settings loaded from a KDL file on disk.
pub struct KdlSettingsFile {
    path: PathBuf,
}

impl KdlSettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location (see `paths::settings_file`).
    pub fn default_location() -> Option<Self> {
        match paths::settings_file() {
            Ok(path) => Some(Self::new(path)),
            Err(e) => {
                ui::warning(&format!("{}. Using default settings.", e));
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict load: missing or malformed files are errors.
    pub fn try_load(&self) -> Result<Configuration> {
        let content = fs::read_to_string(&self.path).map_err(|source| PackforgeError::IoError {
            path: self.path.clone(),
            source,
        })?;
        parse_settings(&content)
    }
}

impl ConfigSource for KdlSettingsFile {
    fn load(&self) -> Configuration {
        if !self.path.exists() {
            ui::notice(&format!(
                "No settings file at {}, using defaults",
                self.path.display()
            ));
            return Configuration::default();
        }

        match self.try_load() {
            Ok(config) => config,
            Err(e) => {
                ui::warning(&format!(
                    "Could not load settings from {}: {}. Using default settings.",
                    self.path.display(),
                    e
                ));
                Configuration::default()
            }
        }
    }
}

/// Fixed configuration, mostly for embedding and tests.
impl ConfigSource for Configuration {
    fn load(&self) -> Configuration {
        *self
    }
}

/// Command-line flags layered over another source at load time.
pub struct CliOverrides<S> {
    inner: S,
    yes: bool,
    verbose: bool,
    quiet: bool,
}

impl<S: ConfigSource> CliOverrides<S> {
    pub fn new(inner: S, yes: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            inner,
            yes,
            verbose,
            quiet,
        }
    }
}

impl<S: ConfigSource> ConfigSource for CliOverrides<S> {
    fn load(&self) -> Configuration {
        let mut config = self.inner.load();
        if self.yes {
            config.auto_confirm = true;
        }
        if self.verbose {
            config.verbose = true;
        }
        if self.quiet {
            config.verbose = false;
        }
        config
    }
}

/// Source for when no settings path could be determined at all.
impl ConfigSource for Option<KdlSettingsFile> {
    fn load(&self) -> Configuration {
        match self {
            Some(file) => file.load(),
            None => Configuration::default(),
        }
    }
}
