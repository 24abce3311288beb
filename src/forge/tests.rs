use super::*;
use crate::backends::ExecutionResult;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const UBUNTU: &str = "NAME=\"Ubuntu\"\nVERSION=\"22.04\"";
const ARCH: &str = "NAME=\"Arch Linux\"\nID=arch";
const BSD: &str = "NAME=\"BSD\"";

struct Identity(&'static str);

impl HostIdentitySource for Identity {
    fn read(&self) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Records every argv and answers from a table keyed by the joined argv.
/// Unscripted commands succeed with empty output.
#[derive(Clone, Default)]
struct MockSpawner {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    responses: Arc<Mutex<HashMap<String, ExecutionResult>>>,
    missing: Arc<Mutex<Vec<String>>>,
}

impl MockSpawner {
    fn respond(&self, command: &str, result: ExecutionResult) {
        self.responses
            .lock()
            .unwrap()
            .insert(command.to_string(), result);
    }

    fn missing_binary(&self, command: &str) {
        self.missing.lock().unwrap().push(command.to_string());
    }

    fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|argv| argv.join(" "))
            .collect()
    }

    fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl ProcessSpawner for MockSpawner {
    fn spawn(&self, argv: &[String]) -> Result<ExecutionResult> {
        self.calls.lock().unwrap().push(argv.to_vec());
        let key = argv.join(" ");

        if self.missing.lock().unwrap().contains(&key) {
            return Err(PackforgeError::SpawnFailed {
                command: key,
                reason: "No such file or directory".to_string(),
            });
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| ExecutionResult::success("")))
    }
}

fn config(auto_confirm: bool) -> Configuration {
    Configuration {
        auto_confirm,
        verbose: false,
        ..Configuration::default()
    }
}

fn forge(identity: &'static str, auto_confirm: bool, spawner: &MockSpawner) -> PackageForge {
    PackageForge::new(
        &Identity(identity),
        &config(auto_confirm),
        Box::new(spawner.clone()),
    )
}

#[test]
fn test_construction_detects_and_lists() {
    let spawner = MockSpawner::default();
    spawner.respond(
        "apt list --installed",
        ExecutionResult::success("Listing...\ncurl/jammy 7.81 amd64 [installed]\n"),
    );

    let forge = forge(UBUNTU, false, &spawner);

    assert_eq!(forge.backend(), Backend::Apt);
    assert_eq!(spawner.calls(), ["apt list --installed"]);
    assert_eq!(forge.cached().len(), 2);
    assert!(forge.check_installed("curl"));
}

#[test]
fn test_install_with_auto_confirm_then_relists() {
    let spawner = MockSpawner::default();
    let mut forge = forge(UBUNTU, true, &spawner);
    spawner.clear();

    forge.install(&["curl"]).unwrap();

    assert_eq!(
        spawner.calls(),
        ["apt install -y curl", "apt list --installed"]
    );
}

#[test]
fn test_unknown_backend_reports_and_spawns_nothing() {
    let spawner = MockSpawner::default();
    let mut forge = forge(BSD, true, &spawner);

    assert_eq!(forge.backend(), Backend::Unknown);
    assert!(forge.cached().is_empty());

    let err = forge.install(&["curl"]).unwrap_err();
    assert!(matches!(err, PackforgeError::UnsupportedBackend { .. }));
    assert!(forge.update().is_err());
    assert!(forge.upgrade().is_err());
    assert!(forge.remove(&["curl"]).is_err());
    assert!(forge.list_installed().is_err());
    assert!(forge.install::<&str>(&[]).is_err());

    assert!(spawner.calls().is_empty());
}

#[test]
fn test_pacman_remove_one_process_per_package_single_refresh() {
    let spawner = MockSpawner::default();
    let mut forge = forge(ARCH, false, &spawner);
    spawner.clear();

    forge.remove(&["foo", "bar"]).unwrap();

    assert_eq!(spawner.calls(), ["pacman -R foo", "pacman -R bar", "pacman -Q"]);
}

#[test]
fn test_failed_update_keeps_snapshot() {
    let spawner = MockSpawner::default();
    spawner.respond("apt list --installed", ExecutionResult::success("curl\n"));
    spawner.respond(
        "apt update",
        ExecutionResult::failure(1, "E: Could not get lock /var/lib/apt/lists/lock"),
    );

    let mut forge = forge(UBUNTU, false, &spawner);
    let before = forge.cached().clone();

    // A refresh would now observe a different listing.
    spawner.respond("apt list --installed", ExecutionResult::success("wget\n"));
    spawner.clear();

    let err = forge.update().unwrap_err();
    match err {
        PackforgeError::CommandFailed {
            exit_code, stderr, ..
        } => {
            assert_eq!(exit_code, 1);
            assert!(stderr.contains("Could not get lock"));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(spawner.calls(), ["apt update"]);
    assert_eq!(forge.cached(), &before);
    assert!(forge.check_installed("curl"));
}

#[test]
fn test_dnf_check_update_with_updates_pending_refreshes() {
    let spawner = MockSpawner::default();
    spawner.respond("dnf check-update", ExecutionResult::failure(100, ""));

    let mut forge = forge("ID=fedora", false, &spawner);
    spawner.clear();

    forge.update().unwrap();
    assert_eq!(spawner.calls(), ["dnf check-update", "dnf list --installed"]);
}

#[test]
fn test_upgrade_refreshes_on_success() {
    let spawner = MockSpawner::default();
    let mut forge = forge("ID=centos", false, &spawner);
    spawner.clear();

    forge.upgrade().unwrap();
    assert_eq!(spawner.calls(), ["yum upgrade -y", "yum list --installed"]);
}

#[test]
fn test_check_installed_never_refreshes() {
    let spawner = MockSpawner::default();
    spawner.respond("pacman -Q", ExecutionResult::success("git 2.45.0-1\nvim 9.1-1\n"));

    let forge = forge(ARCH, false, &spawner);
    spawner.clear();

    assert!(forge.check_installed("git"));
    assert!(forge.check_installed("vim 9.1"));
    assert!(!forge.check_installed("emacs"));
    assert!(!forge.check_installed(""));
    assert!(spawner.calls().is_empty());
}

#[test]
fn test_check_installed_is_possibly_stale() {
    let spawner = MockSpawner::default();
    spawner.respond("pacman -Q", ExecutionResult::success("git 2.45.0-1\n"));
    let mut forge = forge(ARCH, false, &spawner);

    spawner.respond("pacman -Q", ExecutionResult::success("git 2.45.0-1\nhtop 3.3-1\n"));
    assert!(!forge.check_installed("htop"));

    forge.list_installed().unwrap();
    assert!(forge.check_installed("htop"));
}

#[test]
fn test_list_installed_is_idempotent_and_fresh() {
    let spawner = MockSpawner::default();
    spawner.respond("apt list --installed", ExecutionResult::success("a\nb\n"));
    let mut forge = forge(UBUNTU, false, &spawner);
    spawner.clear();

    let first = forge.list_installed().unwrap();
    let second = forge.list_installed().unwrap();

    assert_eq!(first, second);
    assert_eq!(spawner.calls().len(), 2);
}

#[test]
fn test_failed_listing_keeps_previous_snapshot() {
    let spawner = MockSpawner::default();
    spawner.respond("apt list --installed", ExecutionResult::success("curl\n"));
    let mut forge = forge(UBUNTU, false, &spawner);

    spawner.respond("apt list --installed", ExecutionResult::failure(2, "broken"));
    assert!(forge.list_installed().is_err());
    assert!(forge.check_installed("curl"));
}

#[test]
fn test_empty_install_still_refreshes() {
    let spawner = MockSpawner::default();
    let mut forge = forge(UBUNTU, true, &spawner);
    spawner.clear();

    forge.install::<&str>(&[]).unwrap();
    assert_eq!(spawner.calls(), ["apt list --installed"]);
}

#[test]
fn test_install_attempts_every_package_and_skips_refresh_on_failure() {
    let spawner = MockSpawner::default();
    spawner.respond(
        "apt install bogus",
        ExecutionResult::failure(100, "E: Unable to locate package bogus"),
    );
    let mut forge = forge(UBUNTU, false, &spawner);
    spawner.clear();

    let err = forge.install(&["bogus", "curl"]).unwrap_err();
    assert!(matches!(err, PackforgeError::CommandFailed { exit_code: 100, .. }));
    assert_eq!(spawner.calls(), ["apt install bogus", "apt install curl"]);
}

#[test]
fn test_remove_reports_every_failed_package() {
    let spawner = MockSpawner::default();
    spawner.respond(
        "pacman -R foo",
        ExecutionResult::failure(1, "error: target not found: foo"),
    );
    spawner.missing_binary("pacman -R baz");
    let mut forge = forge(ARCH, false, &spawner);
    spawner.clear();

    let err = forge.remove(&["foo", "bar", "baz"]).unwrap_err();

    assert_eq!(
        spawner.calls(),
        ["pacman -R foo", "pacman -R bar", "pacman -R baz"]
    );
    match err {
        PackforgeError::CommandFailed {
            command,
            exit_code,
            stderr,
        } => {
            assert_eq!(exit_code, 1);
            assert!(command.contains("pacman -R foo"));
            assert!(command.contains("pacman -R baz"));
            assert!(!command.contains("pacman -R bar"));
            assert!(stderr.contains("foo (exit 1): error: target not found: foo"));
            assert!(stderr.contains("baz: Failed to start"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_spawn_failure_is_distinct_from_command_failure() {
    let spawner = MockSpawner::default();
    spawner.missing_binary("apt upgrade -y");
    let mut forge = forge(UBUNTU, false, &spawner);
    spawner.clear();

    let err = forge.upgrade().unwrap_err();
    assert!(matches!(err, PackforgeError::SpawnFailed { .. }));
    assert_eq!(spawner.calls(), ["apt upgrade -y"]);
}

#[test]
fn test_invalid_names_rejected_before_spawning() {
    let spawner = MockSpawner::default();
    let mut forge = forge(UBUNTU, true, &spawner);
    spawner.clear();

    let err = forge.install(&["curl", "--allow-downgrades"]).unwrap_err();
    assert!(matches!(err, PackforgeError::InvalidPackageName(_)));
    assert!(spawner.calls().is_empty());
}

#[test]
fn test_duplicate_names_installed_once() {
    let spawner = MockSpawner::default();
    let mut forge = forge(ARCH, true, &spawner);
    spawner.clear();

    forge.install(&["git", "git", "vim"]).unwrap();
    assert_eq!(
        spawner.calls(),
        [
            "pacman -S --noconfirm git",
            "pacman -S --noconfirm vim",
            "pacman -Q"
        ]
    );
}

#[test]
fn test_failed_initial_listing_still_ready() {
    let spawner = MockSpawner::default();
    spawner.missing_binary("apt list --installed");
    let forge = forge(UBUNTU, false, &spawner);

    assert_eq!(forge.backend(), Backend::Apt);
    assert!(forge.cached().is_empty());
}

#[cfg(unix)]
#[test]
fn test_elevated_config_prefixes_mutating_commands() {
    let spawner = MockSpawner::default();
    let config = Configuration {
        elevate: true,
        verbose: false,
        ..Configuration::default()
    };
    let mut forge = PackageForge::new(&Identity(UBUNTU), &config, Box::new(spawner.clone()));
    spawner.clear();

    forge.remove(&["nano"]).unwrap();
    assert_eq!(spawner.calls(), ["sudo apt remove nano", "apt list --installed"]);
}
