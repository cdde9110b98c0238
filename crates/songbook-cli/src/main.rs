use anyhow::Result;
use clap::Parser;
use songbook_core::Format;
use std::path::PathBuf;

mod commands;
mod config;
mod menu;
mod table;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "songbook", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the documents (default: ~/.local/share/songbook)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Document format: xml, json or yaml
    #[arg(long, global = true)]
    format: Option<Format>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Manage the song catalog interactively (default)
    ///
    /// Loads songs.<format> from the data directory, then shows the song
    /// menu: add, view, update, delete, mark explicit, search with
    /// filtering and sorting, remove several at once, the listing
    /// submenu, load, save and seeding.
    ///
    /// A missing or unreadable document is reported and the menu starts
    /// with an empty catalog. Nothing is written until "Save songs" is
    /// chosen.
    Songs,
    /// Manage the artist catalog interactively
    Artists,
    /// Write the seed catalog as songs and artists documents in every format
    Seed {
        /// Target directory (default: the data directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration (default)
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with defaults
    Init,
    /// Print an example config file
    Example,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?.with_overrides(cli.data_dir, cli.format);

    // stdout belongs to the menus
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    log::debug!("Effective configuration: {config:?}");

    match cli.command.unwrap_or(Commands::Songs) {
        Commands::Songs => commands::run_songs(&config)?,
        Commands::Artists => commands::run_artists(&config)?,
        Commands::Seed { dir } => {
            let dir = dir.unwrap_or_else(|| config.data_dir().to_path_buf());
            commands::run_seed(&dir)?;
        }
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Init => commands::config::init_config()?,
            ConfigAction::Example => commands::config::show_example()?,
        },
    }

    Ok(())
}
