use crate::directories;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const CONFIG_FILE: &str = "crypto-upgrade.yml";

#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// SQLite crypto store used when none is given on the command line
    pub(crate) database: Option<PathBuf>,
}

impl Config {
    /// Loads Config from the file at `path`. A missing file gives the default
    /// configuration
    pub(crate) fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            log::debug!("no configuration at {}", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read(path)
            .with_context(|| format!("failed to read config file: '{}'", path.display()))?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_yaml::from_slice(&raw)
            .with_context(|| format!("failed to deserialize config file: '{}'", path.display()))
    }

    /// Loads the config file from the user's configuration directory
    pub(crate) fn load_default_location() -> Result<Self> {
        match directories::config_dir() {
            Some(dir) => Self::load(dir.join(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use std::{fs, path::PathBuf};
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_default() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(Config::load(dir.path().join("nope.yml"))?, Config::default());

        Ok(())
    }

    #[test]
    fn reads_database_path() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("crypto-upgrade.yml");
        fs::write(&path, "---\ndatabase: /var/lib/bridge/crypto.db\n")?;

        assert_eq!(
            Config::load(&path)?.database,
            Some(PathBuf::from("/var/lib/bridge/crypto.db"))
        );

        Ok(())
    }

    #[test]
    fn rejects_unknown_keys() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("crypto-upgrade.yml");
        fs::write(&path, "databse: typo.db\n")?;

        assert!(Config::load(&path).is_err());

        Ok(())
    }
}
