use crate::error::{PackforgeError, Result};
use std::process::Command;

/// Build a direct program invocation from an argv.
///
/// The first element is the program; the rest are passed verbatim, never
/// through a shell.
pub fn build_program_command(argv: &[String]) -> Result<Command> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| PackforgeError::Other("Cannot run an empty command".to_string()))?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    Ok(cmd)
}

/// Wrap an argv so it runs with elevated privileges.
///
/// - Unix: `sudo program args...`
/// - Elsewhere: not supported
pub fn elevate_argv(argv: &[String]) -> Result<Vec<String>> {
    #[cfg(unix)]
    {
        let mut elevated = Vec::with_capacity(argv.len() + 1);
        elevated.push("sudo".to_string());
        elevated.extend(argv.iter().cloned());
        Ok(elevated)
    }

    #[cfg(not(unix))]
    {
        let _ = argv;
        Err(PackforgeError::Other(
            "Elevated execution is not implemented on this platform".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_program_passes_args_verbatim() {
        let argv = vec!["echo".to_string(), "a; b".to_string()];
        let cmd = build_program_command(&argv).unwrap();
        assert_eq!(cmd.get_program(), "echo");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["a; b"]);
    }

    #[test]
    fn build_program_rejects_empty_argv() {
        assert!(build_program_command(&[]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn elevate_prefixes_sudo() {
        let argv = vec!["apt".to_string(), "update".to_string()];
        assert_eq!(elevate_argv(&argv).unwrap(), ["sudo", "apt", "update"]);
    }
}
