use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    logging,
    store::{self, JsonFileStore},
};

use self::{play::PlayArg, scores::ScoresArg};

mod play;
mod scores;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// High-score file (defaults to the user data directory)
    #[clap(long, global = true)]
    scores: Option<PathBuf>,
    /// Write log output to this file (filtered by RUST_LOG, default `info`)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the high-score table
    Scores(#[clap(flatten)] ScoresArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.log_file.as_deref())?;

    let scores_path = match args.scores {
        Some(path) => path,
        None => store::default_scores_path()?,
    };
    let store = JsonFileStore::new(scores_path);

    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg, store)?,
        Mode::Scores(arg) => scores::run(&arg, &store)?,
    }
    Ok(())
}
