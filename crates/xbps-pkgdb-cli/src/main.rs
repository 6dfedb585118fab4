use clap::Parser;
use cli::{Args, Commands};
use config::{config_path, Config};
use error::Result;
use list::{list_packages, Selection};
use logging::setup_logging;
use show::show_package;
use source::load_packages;
use tracing::{debug, info};
use utils::set_color;

mod cli;
mod config;
mod error;
mod list;
mod logging;
mod show;
mod source;
mod utils;

#[cfg(test)]
mod test_utils;

fn load_config(args: &Args) -> Result<Config> {
    let path = config_path(args.config.as_deref());
    debug!("loading config from {}", path.display());

    let mut config = Config::load(&path)?;
    if let Some(ref rootdir) = args.rootdir {
        config = config.with_rootdir(rootdir)?;
    }

    Ok(config)
}

fn handle_cli() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        set_color(false);
    }

    let config = load_config(&args)?;

    match args.command {
        Commands::List {
            source,
            manual,
            auto,
            repolocked,
            state,
            depends_on,
            any,
        } => {
            let pkgdb = load_packages(&source, &config)?;
            let selection = Selection {
                manual,
                auto,
                repolocked,
                state,
                depends_on,
                any,
            };
            list_packages(&pkgdb, &selection, args.json)?;
        }
        Commands::Show {
            package,
            source,
        } => {
            let pkgdb = load_packages(&source, &config)?;
            show_package(&pkgdb, &package, args.json)?;
        }
        Commands::Config => {
            info!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn main() -> miette::Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    handle_cli()?;

    Ok(())
}
