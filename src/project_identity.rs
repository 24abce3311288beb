//! Central project identity values.
//!
//! Binary name, config directory and environment variable names all derive
//! from here.

pub const DISPLAY_NAME: &str = "Packforge";
pub const BINARY_NAME: &str = "packforge";
pub const CONFIG_DIR_NAME: &str = "packforge";
pub const ENV_PREFIX: &str = "PACKFORGE";
pub const SETTINGS_FILE_BASENAME: &str = "settings.kdl";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}
