//! Well-known file locations.

use dirs::home_dir;
use std::path::PathBuf;

/// Name of the per-project configuration file.
pub const CONFIG_FILE_NAME: &str = "qtmods.toml";

/// Default name of the submodule declaration file.
pub const MODULES_CONF_NAME: &str = "qtmodules.conf";

/// Returns the qtmods home directory, or None if the user's home cannot be resolved.
///
/// `QTMODS_HOME` overrides the default of `~/.qtmods`.
pub fn try_qtmods_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("QTMODS_HOME") {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".qtmods"))
}

/// User-wide configuration: ~/.qtmods/config.toml
pub fn global_config_path() -> Option<PathBuf> {
    try_qtmods_home().map(|home| home.join("config.toml"))
}
