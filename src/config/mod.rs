pub mod settings;

pub use settings::{CliOverrides, Configuration, KdlSettingsFile};
