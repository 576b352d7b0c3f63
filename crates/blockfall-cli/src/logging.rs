use std::{fs::File, path::Path};

use anyhow::Context;
use env_logger::{Env, Target};

/// Sends log output to `log_file`, filtered by `RUST_LOG` (default `info`).
///
/// The terminal belongs to the game screen, so nothing is logged when no file
/// is given.
pub(crate) fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to initialize logger")?;
    log::info!("logging to {}", path.display());
    Ok(())
}
