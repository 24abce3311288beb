use crate::backends::executor::ExecutionResult;
use crate::backends::registry::display_argv;
use crate::error::{PackforgeError, Result};
use crate::traits::ProcessSpawner;
use crate::utils::platform;
use std::io::Read;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Spawns real processes with `std::process`, capturing stdout and stderr.
#[derive(Debug, Clone, Default)]
pub struct SystemSpawner {
    timeout: Option<Duration>,
}

impl SystemSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the child and fail once `timeout` has elapsed.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl ProcessSpawner for SystemSpawner {
    fn spawn(&self, argv: &[String]) -> Result<ExecutionResult> {
        let mut cmd = platform::build_program_command(argv)?;
        let label = display_argv(argv);
        let output = run_command(&mut cmd, &label, self.timeout)?;

        Ok(ExecutionResult {
            // Terminated by signal: no exit code
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Execute a command with captured output and an optional deadline.
///
/// stdin is inherited so a backend confirmation can still be answered when
/// auto-confirm is off, but the prompt itself lands in the captured stdout.
pub(crate) fn run_command(
    cmd: &mut Command,
    label: &str,
    timeout: Option<Duration>,
) -> Result<Output> {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| PackforgeError::SpawnFailed {
        command: label.to_string(),
        reason: e.to_string(),
    })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| PackforgeError::SpawnFailed {
            command: label.to_string(),
            reason: "Failed to capture stdout".to_string(),
        })?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| PackforgeError::SpawnFailed {
            command: label.to_string(),
            reason: "Failed to capture stderr".to_string(),
        })?;

    let stdout_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stdout).read_to_end(&mut buf);
        buf
    });
    let stderr_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stderr).read_to_end(&mut buf);
        buf
    });

    let status = match timeout {
        None => child.wait().map_err(|e| PackforgeError::SpawnFailed {
            command: label.to_string(),
            reason: e.to_string(),
        })?,
        Some(timeout) => {
            let start = Instant::now();
            loop {
                match child.try_wait() {
                    Ok(Some(status)) => break status,
                    Ok(None) => {
                        if start.elapsed() > timeout {
                            let _ = child.kill();
                            let _ = child.wait();
                            let _ = stdout_thread.join();
                            let _ = stderr_thread.join();
                            return Err(PackforgeError::SpawnFailed {
                                command: label.to_string(),
                                reason: format!(
                                    "Command timed out after {} seconds",
                                    timeout.as_secs()
                                ),
                            });
                        }
                        thread::sleep(Duration::from_millis(50));
                    }
                    Err(e) => {
                        return Err(PackforgeError::SpawnFailed {
                            command: label.to_string(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}
