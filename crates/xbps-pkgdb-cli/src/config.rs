use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::ConfigError, utils::xdg_config_home};

/// Package database location relative to the root directory.
pub const DEFAULT_PKGDB: &str = "var/db/xbps/pkgdb-0.38.plist";

/// Application's configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Root directory relative paths are resolved against.
    /// Default: /
    pub rootdir: PathBuf,

    /// Path to the package database.
    /// Default: var/db/xbps/pkgdb-0.38.plist
    pub pkgdb: PathBuf,

    /// Repository data archive read by `--repodata` without a value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repodata: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rootdir: PathBuf::from("/"),
            pkgdb: PathBuf::from(DEFAULT_PKGDB),
            repodata: None,
        }
    }
}

/// Resolves the config file location: the explicit path if given, then
/// `$XPKGDB_CONFIG`, then `$XDG_CONFIG_HOME/xpkgdb/config.toml`.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    match std::env::var("XPKGDB_CONFIG") {
        Ok(path) => PathBuf::from(path),
        Err(_) => xdg_config_home().join("xpkgdb").join("config.toml"),
    }
}

impl Config {
    /// Loads the configuration from `path`.
    /// If the file does not exist, the default configuration is used.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("config file {} not found, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                return Err(ConfigError::IoError {
                    path: path.display().to_string(),
                    source: err,
                })
            }
        };

        config.resolve()?;

        Ok(config)
    }

    pub fn resolve(&mut self) -> Result<(), ConfigError> {
        if self.rootdir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyRootdir);
        }

        if self.pkgdb.as_os_str().is_empty() {
            self.pkgdb = PathBuf::from(DEFAULT_PKGDB);
        }

        Ok(())
    }

    pub fn with_rootdir(mut self, rootdir: &str) -> Result<Self, ConfigError> {
        self.rootdir = PathBuf::from(rootdir);
        self.resolve()?;
        Ok(self)
    }

    /// Package database path, joined to `rootdir` when relative.
    pub fn pkgdb_path(&self) -> PathBuf {
        self.rootdir.join(&self.pkgdb)
    }

    /// Configured repository data path, joined to `rootdir` when relative.
    pub fn repodata_path(&self) -> Result<PathBuf, ConfigError> {
        self.repodata
            .as_ref()
            .map(|path| self.rootdir.join(path))
            .ok_or(ConfigError::MissingRepodata)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
