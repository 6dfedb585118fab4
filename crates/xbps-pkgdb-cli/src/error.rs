use miette::Diagnostic;
use thiserror::Error;
use xbps_pkgdb::PkgdbError;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(xpkgdb::config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(xpkgdb::config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Error while reading {path}: {source}")]
    #[diagnostic(code(xpkgdb::config::io))]
    IoError {
        path: String,
        source: std::io::Error,
    },

    #[error("Root directory must not be empty")]
    #[diagnostic(
        code(xpkgdb::config::empty_rootdir),
        help("Set `rootdir` to `/` or to the root of another installation")
    )]
    EmptyRootdir,

    #[error("No repository data path configured")]
    #[diagnostic(
        code(xpkgdb::config::missing_repodata),
        help("Pass a path to --repodata or set `repodata` in your config file")
    )]
    MissingRepodata,
}

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pkgdb(#[from] PkgdbError),

    #[error("Package not found: {0}")]
    #[diagnostic(
        code(xpkgdb::package_not_found),
        help("Use `xpkgdb list` to see the available package names")
    )]
    PackageNotFound(String),

    #[error(transparent)]
    #[diagnostic(code(xpkgdb::json))]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
