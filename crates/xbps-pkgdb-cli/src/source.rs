use std::path::PathBuf;

use tracing::debug;
use xbps_pkgdb::{decode_file, decode_repodata_file, Pkgdb};

use crate::{cli::Source, config::Config, error::Result};

enum Location {
    Pkgdb(PathBuf),
    Repodata(PathBuf),
}

fn locate(source: &Source, config: &Config) -> Result<Location> {
    let location = match (&source.pkgdb, &source.repodata) {
        (Some(path), _) => Location::Pkgdb(PathBuf::from(path)),
        (None, Some(Some(path))) => Location::Repodata(PathBuf::from(path)),
        (None, Some(None)) => Location::Repodata(config.repodata_path()?),
        (None, None) => Location::Pkgdb(config.pkgdb_path()),
    };
    Ok(location)
}

/// Loads the package collection selected by the command line, falling back
/// to the configured package database.
pub fn load_packages(source: &Source, config: &Config) -> Result<Pkgdb> {
    let pkgdb = match locate(source, config)? {
        Location::Pkgdb(path) => {
            debug!("reading package database {}", path.display());
            decode_file(&path)?
        }
        Location::Repodata(path) => {
            debug!("reading repository data {}", path.display());
            decode_repodata_file(&path)?
        }
    };

    Ok(pkgdb)
}
