use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    /// Override the root directory default paths are resolved against
    #[arg(short, long, global = true, value_hint = ValueHint::DirPath)]
    pub rootdir: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Where package metadata is read from.
#[derive(ClapArgs, Clone, Debug, Default)]
pub struct Source {
    /// Read this package database instead of the configured one
    #[arg(required = false, long, value_hint = ValueHint::FilePath, conflicts_with = "repodata")]
    pub pkgdb: Option<String>,

    /// Read repository data instead of the package database
    ///
    /// Without a value, the `repodata` path from the config file is used
    #[arg(required = false, long, num_args = 0..=1, value_hint = ValueHint::FilePath)]
    pub repodata: Option<Option<String>>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List package names
    #[clap(name = "list", visible_alias = "ls")]
    List {
        #[command(flatten)]
        source: Source,

        /// Only explicitly installed packages
        #[arg(required = false, short, long, conflicts_with = "auto")]
        manual: bool,

        /// Only packages installed as dependencies
        #[arg(required = false, short, long)]
        auto: bool,

        /// Only packages held to their repository
        #[arg(required = false, long)]
        repolocked: bool,

        /// Only packages in this install state
        #[arg(required = false, long)]
        state: Option<String>,

        /// Only packages with a run-time dependency on this package
        #[arg(required = false, long)]
        depends_on: Option<String>,

        /// Match packages satisfying any selection instead of all
        #[arg(required = false, long)]
        any: bool,
    },

    /// Show package metadata
    #[command(arg_required_else_help = true)]
    #[clap(name = "show", visible_alias = "info")]
    Show {
        /// Package name
        #[arg(required = true)]
        package: String,

        #[command(flatten)]
        source: Source,
    },

    /// Print the effective configuration
    Config,
}
