//! Retrieve the directories relevant to this project

use directories::ProjectDirs;
use std::{env, path::PathBuf};

/// Environment variable overriding the configuration directory
pub(crate) const CONFIG_DIR_ENV: &str = "CRYPTO_UPGRADE_CONFIG_DIR";

/// Get the configuration directory. `$CRYPTO_UPGRADE_CONFIG_DIR` is used if
/// set, otherwise the platform's config directory for this project
pub(crate) fn config_dir() -> Option<PathBuf> {
    env::var_os(CONFIG_DIR_ENV).map(PathBuf::from).or_else(|| {
        log::trace!("determining project default folders");
        ProjectDirs::from("", "", env!("CARGO_PKG_NAME")).map(|p| p.config_dir().to_path_buf())
    })
}
