//! pouetspy CLI
//!
//! Checks the given platforms and groups, writes the HTML report and opens it.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pouetspy::{
    error::Result,
    models::Config,
    pipeline::{self, Targets},
    services::CompiledSelectors,
    storage::{Namespace, SnapshotStore},
    utils::dirs,
};

/// pouetspy - new comments and new prods on pouet.net
#[derive(Parser, Debug)]
#[command(
    name = "pouetspy",
    version,
    about = "Collect new prods of your platforms and new comments on your groups' prods",
    long_about = "Automatically browse pouet.net to collect the new productions of your \
                  platforms of interest and the new comments on the productions of your \
                  groups of interest. Useful when you do not browse pouet.net very often.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Platform to collect new prods for (for example "Amstrad CPC")
    #[arg(short = 'p', long = "platform", value_name = "NAME", num_args = 0..)]
    platforms: Vec<String>,

    /// Group id to collect new comments for (for example 253 for Benediction)
    #[arg(short = 'g', long = "group", value_name = "ID", num_args = 0..)]
    groups: Vec<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Where to write the HTML report (overrides output.report_path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not open the report once written
    #[arg(long)]
    no_open: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration and its selectors
    Validate,

    /// Show snapshot store info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// The explicit config path, or the default one when it exists.
fn config_path(path: Option<&Path>) -> Option<PathBuf> {
    path.map(Path::to_path_buf)
        .or_else(|| dirs::default_config_path().filter(|p| p.exists()))
}

fn load_config(path: Option<&Path>) -> Config {
    match config_path(path) {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            Config::load_or_default(path)
        }
        None => Config::default(),
    }
}

/// Like [`load_config`], but an unreadable or malformed file is an error.
fn load_config_strict(path: Option<&Path>) -> Result<Config> {
    match config_path(path) {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            Config::load(path)
        }
        None => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        None => {
            let mut config = load_config(cli.config.as_deref());
            if let Some(path) = cli.output {
                config.output.report_path = path;
            }
            if cli.no_open {
                config.output.open_report = false;
            }

            let targets = Targets {
                platforms: cli.platforms,
                groups: cli.groups,
            };
            let report = pipeline::run(&config, &targets)?;

            let path = &config.output.report_path;
            report.write_html(path)?;

            if config.output.open_report {
                let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.clone());
                if let Err(e) = webbrowser::open(&target.to_string_lossy()) {
                    log::warn!("Could not open {}: {}", target.display(), e);
                }
            }
        }

        Some(Command::Validate) => {
            log::info!("Validating configuration...");

            let config = match load_config_strict(cli.config.as_deref()) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Config could not be loaded: {}", e);
                    return Err(e);
                }
            };
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            CompiledSelectors::compile(&config.selectors)?;
            log::info!("✓ Config OK (site, http, storage and selectors)");
        }

        Some(Command::Info) => {
            let config = load_config(cli.config.as_deref());
            let path = dirs::store_path(&config.storage)?;
            log::info!("Snapshot store: {}", path.display());

            if !path.exists() {
                log::info!("No snapshot found yet.");
                return Ok(());
            }

            let store = SnapshotStore::open(&path)?;
            for namespace in Namespace::ALL {
                log::info!("  {}: {} entries", namespace, store.count(namespace));
            }
            match store.updated_at() {
                Some(updated) => log::info!("Last updated: {}", updated),
                None => log::info!("Never flushed."),
            }
        }
    }

    Ok(())
}
