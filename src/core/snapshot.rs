use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Point-in-time copy of the backend's raw "list installed" output.
///
/// Lines are opaque: not parsed, not deduplicated. A snapshot is never
/// mutated; a refresh builds a new one and replaces the old wholesale, so
/// cloning is cheap and a clone stays internally consistent forever.
#[derive(Debug, Clone, Serialize)]
pub struct InstalledPackages {
    lines: Arc<[String]>,
    refreshed_at: DateTime<Utc>,
}

impl InstalledPackages {
    /// Build a snapshot from raw listing stdout.
    pub fn from_listing(stdout: &str) -> Self {
        Self {
            lines: stdout.lines().map(str::to_string).collect(),
            refreshed_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self {
            lines: Arc::from(Vec::new()),
            refreshed_at: Utc::now(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    /// True when `name` occurs in any line, as an exact line or a substring.
    /// An empty name never matches.
    pub fn contains(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.lines.iter().any(|line| line.contains(name))
    }

    /// Lines containing `pattern` (all lines when the pattern is empty).
    pub fn filter<'a>(&'a self, pattern: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.lines
            .iter()
            .filter(move |line| pattern.is_empty() || line.contains(pattern))
    }
}

impl PartialEq for InstalledPackages {
    /// Snapshots compare by content; the refresh time is not part of the listing.
    fn eq(&self, other: &Self) -> bool {
        self.lines == other.lines
    }
}

impl Eq for InstalledPackages {}
