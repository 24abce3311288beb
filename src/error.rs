use crate::core::types::{Backend, Operation};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackforgeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    /// The detected backend has no command for the requested operation.
    #[error("Operation '{operation}' is not supported on backend '{backend}'")]
    UnsupportedBackend {
        backend: Backend,
        operation: Operation,
    },

    /// The process could not be started at all (missing binary, permissions).
    #[error("Failed to start '{command}': {reason}")]
    SpawnFailed { command: String, reason: String },

    /// The process ran and exited with a non-success code.
    #[error("Command '{command}' failed with exit code {exit_code}{}", format_stderr(.stderr))]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Package '{0}' is not installed")]
    NotInstalled(String),

    #[error("Invalid package name: {0}")]
    InvalidPackageName(String),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    YamlError(#[from] serde_yml::Error),

    #[error("{0}")]
    Other(String),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

pub type Result<T> = std::result::Result<T, PackforgeError>;
