//! Package forge: the orchestrator
//!
//! Owns the detected backend, the configuration and the cached installed
//! package snapshot. Every mutating operation resolves its command through
//! the registry, runs it through the executor and refreshes the snapshot
//! only after a confirmed successful run. All state changes go through
//! `&mut self`, so an operation and its refresh form one critical section.

use crate::backends::executor::{CommandMode, ExecutionResult, Executor};
use crate::backends::registry::{self, ResolvedCommand};
use crate::backends::SystemSpawner;
use crate::config::settings::Configuration;
use crate::core::detector::{self, OsReleaseFile};
use crate::core::snapshot::InstalledPackages;
use crate::core::types::{Backend, Operation};
use crate::error::{PackforgeError, Result};
use crate::traits::{ConfigSource, HostIdentitySource, ProcessSpawner};
use crate::ui;
use crate::utils::sanitize;

pub struct PackageForge {
    backend: Backend,
    config: Configuration,
    executor: Executor,
    installed: InstalledPackages,
}

impl PackageForge {
    /// Detect the backend, load configuration and take the first listing.
    ///
    /// Construction never fails. An unknown backend or a failed first
    /// listing leaves the forge ready with an empty snapshot.
    pub fn new(
        identity: &dyn HostIdentitySource,
        config_source: &dyn ConfigSource,
        spawner: Box<dyn ProcessSpawner>,
    ) -> Self {
        let backend = detector::detect(identity);
        let config = config_source.load();
        let executor = Executor::new(spawner, config.verbose, config.elevate);

        let mut forge = Self {
            backend,
            config,
            executor,
            installed: InstalledPackages::empty(),
        };

        if let Err(e) = forge.refresh() {
            ui::warning(&format!("Could not read installed packages: {}", e));
        }

        forge
    }

    /// Build a forge against the real host: `/etc/os-release`, the settings
    /// file and `std::process`.
    pub fn from_system(config_source: &dyn ConfigSource) -> Self {
        let config = config_source.load();
        Self::new(
            &OsReleaseFile::system(),
            &config,
            Box::new(SystemSpawner::with_timeout(config.command_timeout)),
        )
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The cached snapshot, as of the last successful refresh.
    pub fn cached(&self) -> &InstalledPackages {
        &self.installed
    }

    /// Re-run the listing command and replace the cache.
    ///
    /// Always a fresh read. On failure the previous snapshot is kept.
    pub fn list_installed(&mut self) -> Result<InstalledPackages> {
        self.refresh()?;
        Ok(self.installed.clone())
    }

    /// Whether `name` appears in the cached snapshot. Never refreshes.
    pub fn check_installed(&self, name: &str) -> bool {
        self.installed.contains(name)
    }

    /// Refresh repository metadata (or check for updates), then re-list.
    pub fn update(&mut self) -> Result<()> {
        let cmd = self.resolve(Operation::Update, None)?;
        self.run_checked(Operation::Update, &cmd)?;
        self.refresh()
    }

    /// Upgrade all installed packages, then re-list.
    pub fn upgrade(&mut self) -> Result<()> {
        let cmd = self.resolve(Operation::Upgrade, None)?;
        self.run_checked(Operation::Upgrade, &cmd)?;
        self.refresh()
    }

    /// Install each package with its own invocation, then re-list once.
    ///
    /// Every package is attempted even when an earlier one fails. Any
    /// failure skips the refresh.
    pub fn install<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.per_package(Operation::Install, names)
    }

    /// Remove each package with its own invocation, then re-list once.
    pub fn remove<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.per_package(Operation::Remove, names)
    }

    fn per_package<S: AsRef<str>>(&mut self, operation: Operation, names: &[S]) -> Result<()> {
        self.ensure_supported(operation)?;
        sanitize::validate_package_names(names)?;

        // Resolve everything before spawning anything.
        let commands = sanitize::dedup_names(names)
            .into_iter()
            .map(|name| {
                self.resolve(operation, Some(name.as_str()))
                    .map(|cmd| (name, cmd))
            })
            .collect::<Result<Vec<_>>>()?;

        if commands.is_empty() {
            ui::debug(&format!("No packages given to {}", operation));
        }

        let mut failures = Vec::new();
        for (name, cmd) in &commands {
            if let Err(e) = self.run_checked(operation, cmd) {
                ui::debug(&format!("{} {} failed: {}", operation, name, e));
                failures.push(PackageFailure {
                    name: name.clone(),
                    command: cmd.display(),
                    error: e,
                });
            }
        }

        if failures.is_empty() {
            return self.refresh();
        }
        Err(combine_failures(failures))
    }

    fn ensure_supported(&self, operation: Operation) -> Result<()> {
        if self.backend.is_known() {
            Ok(())
        } else {
            Err(PackforgeError::UnsupportedBackend {
                backend: self.backend,
                operation,
            })
        }
    }

    fn resolve(&self, operation: Operation, package: Option<&str>) -> Result<ResolvedCommand> {
        registry::resolve(self.backend, operation, self.config.auto_confirm, package)
    }

    /// Run a resolved command and reject exit codes outside its success set.
    fn run_checked(&self, operation: Operation, cmd: &ResolvedCommand) -> Result<ExecutionResult> {
        let result = self
            .executor
            .run(cmd.argv(), CommandMode::for_operation(operation))?;

        if !cmd.is_success(result.exit_code) {
            return Err(PackforgeError::CommandFailed {
                command: cmd.display(),
                exit_code: result.exit_code,
                stderr: result.stderr,
            });
        }

        Ok(result)
    }

    /// Replace the snapshot with a fresh listing, all-or-nothing.
    fn refresh(&mut self) -> Result<()> {
        let cmd = self.resolve(Operation::ListInstalled, None)?;
        let result = self.run_checked(Operation::ListInstalled, &cmd)?;

        self.installed = InstalledPackages::from_listing(&result.stdout);
        ui::debug(&format!("Cached {} listing lines", self.installed.len()));
        Ok(())
    }
}

struct PackageFailure {
    name: String,
    command: String,
    error: PackforgeError,
}

/// A lone failure is returned as-is. Several are folded into one
/// `CommandFailed` listing each package with its stderr (or spawn reason).
fn combine_failures(mut failures: Vec<PackageFailure>) -> PackforgeError {
    if failures.len() == 1 {
        return failures.remove(0).error;
    }

    let exit_code = failures
        .iter()
        .find_map(|f| match &f.error {
            PackforgeError::CommandFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        })
        .unwrap_or(-1);

    let command = failures
        .iter()
        .map(|f| f.command.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    let stderr = failures
        .iter()
        .map(|f| match &f.error {
            PackforgeError::CommandFailed { exit_code, stderr, .. } => {
                format!("{} (exit {}): {}", f.name, exit_code, stderr.trim())
            }
            other => format!("{}: {}", f.name, other),
        })
        .collect::<Vec<_>>()
        .join("\n");

    PackforgeError::CommandFailed {
        command,
        exit_code,
        stderr,
    }
}

#[cfg(test)]
mod tests;
