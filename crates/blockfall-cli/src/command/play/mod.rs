use std::time::Duration;

use blockfall_engine::{GameConfig, GameSession, PieceSeed, Scoreboard};
use log::info;

use crate::{
    store::JsonFileStore,
    tui::{Runtime, ScreenHost},
};

use self::screens::{GameScreen, PlayContext};

mod input;
mod screens;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence, as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Initial time between automatic falls, in milliseconds
    #[clap(long, default_value_t = 250, value_parser = clap::value_parser!(u64).range(1..))]
    fall_interval_ms: u64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            fall_interval_ms: 250,
        }
    }
}

pub(crate) fn run(arg: &PlayArg, store: JsonFileStore) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        fall_interval_ms,
    } = arg;

    let scoreboard = Scoreboard::load(&store)?;
    info!(
        "loaded {} high scores from {}",
        scoreboard.entries().len(),
        store.path().display()
    );

    let config =
        GameConfig::default().with_initial_fall_interval(Duration::from_millis(*fall_interval_ms));
    let session = match seed {
        Some(seed) => GameSession::with_seed(config, *seed),
        None => GameSession::new(config),
    };
    let context = PlayContext {
        config,
        scoreboard,
        store,
    };

    let mut host = ScreenHost::new(Box::new(GameScreen::new(context, session)));
    Runtime::new().run(&mut host)
}
