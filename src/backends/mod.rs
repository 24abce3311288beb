//! # Backend command tables and execution
//!
//! - [`registry`]: static table mapping (backend, operation) to an argv
//!   template. Adding a backend is a data change here plus a detector marker.
//! - [`executor`]: runs a resolved argv through a [`ProcessSpawner`] and
//!   applies the verbosity and elevation policy.
//! - [`command_exec`]: the `std::process` spawner used outside tests.
//!
//! [`ProcessSpawner`]: crate::traits::ProcessSpawner

pub mod command_exec;
pub mod executor;
pub mod registry;

pub use command_exec::SystemSpawner;
pub use executor::{CommandMode, ExecutionResult, Executor};
pub use registry::{resolve, ResolvedCommand};
