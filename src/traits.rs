//! Collaborator traits consumed by the forge
//!
//! Configuration loading, host identification and process spawning are
//! external to the dispatch logic. Depending on these traits rather than
//! on the filesystem and `std::process` directly lets the orchestrator be
//! exercised with mocks that record every argv it would have run.

use crate::backends::executor::ExecutionResult;
use crate::config::settings::Configuration;
use crate::error::Result;

/// Source of the boolean settings that shape command execution.
///
/// Implementations never fail: any read or parse problem is absorbed and
/// the defaults are returned instead.
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> Configuration;
}

/// Source of host distribution identification text (os-release contents).
pub trait HostIdentitySource: Send + Sync {
    /// Return the raw identification text, or an error when it is unavailable.
    fn read(&self) -> Result<String>;
}

/// Spawns a program and captures its output.
///
/// A command that ran and exited nonzero is still `Ok`; only a failure to
/// start the process at all is an `Err` (`PackforgeError::SpawnFailed`).
pub trait ProcessSpawner: Send + Sync {
    fn spawn(&self, argv: &[String]) -> Result<ExecutionResult>;
}
