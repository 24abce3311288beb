use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Native package managers packforge can drive.
// To add a new one (e.g. zypper), add a variant here, a marker in
// core::detector::DISTRO_MARKERS and a command table in backends::registry.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Apt,
    Dnf,
    Yum,
    Pacman,
    Unknown,
}

impl Backend {
    /// All backends that carry a command table.
    pub const SUPPORTED: [Backend; 4] = [Backend::Apt, Backend::Dnf, Backend::Yum, Backend::Pacman];

    /// Name of the program invoked for this backend.
    pub fn binary(&self) -> Option<&'static str> {
        match self {
            Self::Apt => Some("apt"),
            Self::Dnf => Some("dnf"),
            Self::Yum => Some("yum"),
            Self::Pacman => Some("pacman"),
            Self::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apt => write!(f, "apt"),
            Self::Dnf => write!(f, "dnf"),
            Self::Yum => write!(f, "yum"),
            Self::Pacman => write!(f, "pacman"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apt" => Ok(Self::Apt),
            "dnf" => Ok(Self::Dnf),
            "yum" => Ok(Self::Yum),
            "pacman" => Ok(Self::Pacman),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("Unknown backend: '{}'", other)),
        }
    }
}

/// Abstract operations that map onto a backend command.
///
/// `check-installed` is deliberately absent: it is answered from the cached
/// snapshot and never spawns a process.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    ListInstalled,
    Update,
    Upgrade,
    Install,
    Remove,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::ListInstalled,
        Operation::Update,
        Operation::Upgrade,
        Operation::Install,
        Operation::Remove,
    ];

    /// Whether the operation changes installed state and must be followed by a refresh.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::ListInstalled)
    }

    /// Whether the operation is invoked once per package name.
    pub fn takes_package(&self) -> bool {
        matches!(self, Self::Install | Self::Remove)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListInstalled => write!(f, "list-installed"),
            Self::Update => write!(f, "update"),
            Self::Upgrade => write!(f, "upgrade"),
            Self::Install => write!(f, "install"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_round_trips_through_display() {
        for backend in Backend::SUPPORTED {
            let parsed: Backend = backend.to_string().parse().unwrap();
            assert_eq!(parsed, backend);
        }
        assert_eq!("UNKNOWN".parse::<Backend>().unwrap(), Backend::Unknown);
        assert!("zypper".parse::<Backend>().is_err());
    }

    #[test]
    fn binary_matches_display_for_known_backends() {
        for backend in Backend::SUPPORTED {
            assert_eq!(backend.binary(), Some(backend.to_string().as_str()));
        }
        assert_eq!(Backend::Unknown.binary(), None);
    }

    #[test]
    fn only_listing_is_read_only() {
        let mutating: Vec<_> = Operation::ALL
            .iter()
            .filter(|op| op.is_mutating())
            .collect();
        assert_eq!(mutating.len(), 4);
        assert!(!Operation::ListInstalled.is_mutating());
    }
}
