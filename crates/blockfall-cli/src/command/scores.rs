use std::fmt::Write as _;

use blockfall_engine::{HighScore, Scoreboard};

use crate::{store::JsonFileStore, ui::widgets::recorded_date};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoresArg {
    /// Number of entries to print
    #[clap(long, default_value_t = 10)]
    limit: usize,
}

pub(crate) fn run(arg: &ScoresArg, store: &JsonFileStore) -> anyhow::Result<()> {
    let scoreboard = Scoreboard::load(store)?;
    print!("{}", format_table(scoreboard.entries(), arg.limit));
    Ok(())
}

fn format_table(entries: &[HighScore], limit: usize) -> String {
    if entries.is_empty() {
        return "no scores yet\n".to_owned();
    }
    let mut out = String::new();
    for (rank, entry) in entries.iter().take(limit).enumerate() {
        _ = writeln!(
            out,
            "{:>3}. {:<16} {:>10}  {}",
            rank + 1,
            entry.name,
            entry.score,
            recorded_date(entry)
        );
    }
    out
}
