use crate::backends::registry::display_argv;
use crate::core::types::Operation;
use crate::error::Result;
use crate::traits::ProcessSpawner;
use crate::ui;
use crate::utils::platform;
use serde::Serialize;

/// Outcome of one command run. A nonzero exit code is not an error here;
/// callers decide what counts as success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandMode {
    /// Listing: never echoed, never elevated.
    ReadOnly,
    /// Changes installed state: echoed when verbose, elevated when configured.
    Mutating,
}

impl CommandMode {
    pub fn for_operation(operation: Operation) -> Self {
        if operation.is_mutating() {
            Self::Mutating
        } else {
            Self::ReadOnly
        }
    }
}

/// Runs concrete argvs through a spawner and applies the output policy.
pub struct Executor {
    spawner: Box<dyn ProcessSpawner>,
    verbose: bool,
    elevate: bool,
}

impl Executor {
    pub fn new(spawner: Box<dyn ProcessSpawner>, verbose: bool, elevate: bool) -> Self {
        Self {
            spawner,
            verbose,
            elevate,
        }
    }

    pub fn run(&self, argv: &[String], mode: CommandMode) -> Result<ExecutionResult> {
        let argv = if self.elevate && mode == CommandMode::Mutating {
            platform::elevate_argv(argv)?
        } else {
            argv.to_vec()
        };

        ui::debug(&format!("Running: {}", display_argv(&argv)));
        let result = self.spawner.spawn(&argv)?;

        if self.verbose && mode == CommandMode::Mutating {
            ui::passthrough(&result.stdout);
        }

        Ok(result)
    }
}
