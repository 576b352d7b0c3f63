use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use blockfall_engine::{HighScore, ScoreStore};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct ScoreFile {
    scores: Vec<HighScore>,
}

#[derive(Debug, Serialize)]
struct ScoreFileRef<'a> {
    scores: &'a [HighScore],
}

/// Returns `<data dir>/blockfall/scores.json`.
pub(crate) fn default_scores_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Failed to locate the user data directory")?;
    Ok(data_dir.join("blockfall").join("scores.json"))
}

/// High-score list kept in a pretty-printed JSON file.
///
/// A missing file is an empty list. A file that exists but cannot be read or
/// parsed is an error.
#[derive(Debug, Clone)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    type Error = anyhow::Error;

    fn load(&self) -> anyhow::Result<Vec<HighScore>> {
        let path = &self.path;
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no high-score file at {}", path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to open high-score file: {}", path.display())
                });
            }
        };
        let data: ScoreFile = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse high-score file: {}", path.display()))?;
        Ok(data.scores)
    }

    fn save(&self, entries: &[HighScore]) -> anyhow::Result<()> {
        let path = &self.path;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create high-score file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &ScoreFileRef { scores: entries })
            .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
        writeln!(writer)
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to flush {}", path.display()))?;
        debug!("saved {} high scores to {}", entries.len(), path.display());
        Ok(())
    }
}
