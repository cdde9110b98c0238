use std::io::{StdinLock, Stdout};

use anyhow::{Context, Result};
use songbook_core::{Artist, InputPipeline, Repository, Song};

use crate::config::Config;
use crate::menu::{self, Session};
use crate::table::Tabular;

type TerminalSession<T> = Session<T, StdinLock<'static>, Stdout>;

fn session<T: Tabular + 'static>(config: &Config) -> Result<TerminalSession<T>> {
    let dir = config.data_dir();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

    let path = config.document_path::<T>();
    log::info!("Using {} document {}", T::KIND, path.display());

    let api = Repository::new(config.format.serializer::<T>(path));
    Ok(Session::new(api, InputPipeline::stdio(), config.data_dir().join("seed")))
}

/// Run the interactive song menu on the terminal.
pub fn run_songs(config: &Config) -> Result<()> {
    let mut session = session::<Song>(config)?;
    menu::songs::run(&mut session).context("Song menu failed")
}

/// Run the interactive artist menu on the terminal.
pub fn run_artists(config: &Config) -> Result<()> {
    let mut session = session::<Artist>(config)?;
    menu::artists::run(&mut session).context("Artist menu failed")
}
