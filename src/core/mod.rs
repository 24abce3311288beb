pub mod detector;
pub mod snapshot;
pub mod types;

pub use detector::{detect, detect_from_text, OsReleaseFile};
pub use snapshot::InstalledPackages;
pub use types::{Backend, Operation};
