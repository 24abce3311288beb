use crate::core::types::{Backend, Operation};
use crate::error::{PackforgeError, Result};

/// Argv template for one (backend, operation) pair.
///
/// Final argv is `program args... [confirm_flag] [package]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTemplate {
    pub program: &'static str,
    pub args: &'static [&'static str],
    /// Appended only when auto-confirm is enabled.
    pub confirm_flag: Option<&'static str>,
    /// Exit codes that count as success.
    pub success_codes: &'static [i32],
}

/// Command table for one backend.
#[derive(Debug, Clone, Copy)]
pub struct BackendCommands {
    pub list_installed: CommandTemplate,
    pub update: CommandTemplate,
    pub upgrade: CommandTemplate,
    pub install: CommandTemplate,
    pub remove: CommandTemplate,
}

impl BackendCommands {
    pub fn template(&self, operation: Operation) -> &CommandTemplate {
        match operation {
            Operation::ListInstalled => &self.list_installed,
            Operation::Update => &self.update,
            Operation::Upgrade => &self.upgrade,
            Operation::Install => &self.install,
            Operation::Remove => &self.remove,
        }
    }
}

const SUCCESS: &[i32] = &[0];

const fn template(
    program: &'static str,
    args: &'static [&'static str],
    confirm_flag: Option<&'static str>,
) -> CommandTemplate {
    CommandTemplate {
        program,
        args,
        confirm_flag,
        success_codes: SUCCESS,
    }
}

// === APT (Debian, Ubuntu) ===
const APT: BackendCommands = BackendCommands {
    list_installed: template("apt", &["list", "--installed"], None),
    update: template("apt", &["update"], None),
    upgrade: template("apt", &["upgrade", "-y"], None),
    install: template("apt", &["install"], Some("-y")),
    remove: template("apt", &["remove"], Some("-y")),
};

// === DNF (Fedora) ===
const DNF: BackendCommands = BackendCommands {
    list_installed: template("dnf", &["list", "--installed"], None),
    // check-update exits 100 when updates are available
    update: CommandTemplate {
        program: "dnf",
        args: &["check-update"],
        confirm_flag: None,
        success_codes: &[0, 100],
    },
    upgrade: template("dnf", &["upgrade", "-y"], None),
    install: template("dnf", &["install"], Some("-y")),
    remove: template("dnf", &["remove"], Some("-y")),
};

// === YUM (CentOS) ===
const YUM: BackendCommands = BackendCommands {
    list_installed: template("yum", &["list", "--installed"], None),
    update: template("yum", &["update"], None),
    upgrade: template("yum", &["upgrade", "-y"], None),
    install: template("yum", &["install"], Some("-y")),
    remove: template("yum", &["remove"], Some("-y")),
};

// === Pacman (Arch Linux) ===
const PACMAN: BackendCommands = BackendCommands {
    list_installed: template("pacman", &["-Q"], None),
    update: template("pacman", &["-Syu"], None),
    upgrade: template("pacman", &["--upgrade"], None),
    install: template("pacman", &["-S"], Some("--noconfirm")),
    remove: template("pacman", &["-R"], Some("--noconfirm")),
};

/// Command table for a backend, or `None` for `Backend::Unknown`.
pub fn commands_for(backend: Backend) -> Option<&'static BackendCommands> {
    match backend {
        Backend::Apt => Some(&APT),
        Backend::Dnf => Some(&DNF),
        Backend::Yum => Some(&YUM),
        Backend::Pacman => Some(&PACMAN),
        Backend::Unknown => None,
    }
}

/// A concrete invocation ready for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    argv: Vec<String>,
    success_codes: &'static [i32],
}

impl ResolvedCommand {
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn is_success(&self, exit_code: i32) -> bool {
        self.success_codes.contains(&exit_code)
    }

    /// Shell-quoted rendering for messages.
    pub fn display(&self) -> String {
        display_argv(&self.argv)
    }
}

/// Render an argv as a shell-quoted command line (for messages only).
pub fn display_argv(argv: &[String]) -> String {
    shlex::try_join(argv.iter().map(String::as_str)).unwrap_or_else(|_| argv.join(" "))
}

/// Resolve an abstract operation into a concrete argv.
///
/// `package` is required for install/remove and ignored otherwise.
pub fn resolve(
    backend: Backend,
    operation: Operation,
    auto_confirm: bool,
    package: Option<&str>,
) -> Result<ResolvedCommand> {
    let commands = commands_for(backend).ok_or(PackforgeError::UnsupportedBackend {
        backend,
        operation,
    })?;
    let tpl = commands.template(operation);

    let mut argv = Vec::with_capacity(tpl.args.len() + 3);
    argv.push(tpl.program.to_string());
    argv.extend(tpl.args.iter().map(|a| a.to_string()));

    if auto_confirm && let Some(flag) = tpl.confirm_flag {
        argv.push(flag.to_string());
    }

    if operation.takes_package() {
        let package = package.ok_or_else(|| {
            PackforgeError::InvalidPackageName(format!("'{}' requires a package name", operation))
        })?;
        argv.push(package.to_string());
    }

    Ok(ResolvedCommand {
        argv,
        success_codes: tpl.success_codes,
    })
}
