//! Ordered high-score list and the persistence seam behind it.
//!
//! The list is loaded once at start-up and rewritten as a whole every time a
//! score is recorded. Where it lives is up to the [`ScoreStore`]
//! implementation; the engine ships only an in-memory one.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{HighScore, MemoryScoreStore, Scoreboard};
//!
//! let store = MemoryScoreStore::default();
//! let mut board = Scoreboard::load(&store).unwrap();
//! board.record(HighScore::new("ann", 1200), &store).unwrap();
//! board.record(HighScore::new("bob", 3400), &store).unwrap();
//!
//! let names: Vec<_> = board.entries().iter().map(|e| e.name.as_str()).collect();
//! assert_eq!(names, ["bob", "ann"]);
//! assert_eq!(Scoreboard::load(&store).unwrap().entries().len(), 2);
//! ```

use std::{cell::RefCell, convert::Infallible};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// One finished game on the high-score list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub name: String,
    pub score: u64,
    /// When the score was recorded; absent in lists written by older versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl HighScore {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
            recorded_at: Some(Utc::now()),
        }
    }
}

/// Where the high-score list is kept between runs.
///
/// `load` returns the list in whatever order it was saved; a store that has
/// never been written returns an empty list. `save` replaces the whole list.
pub trait ScoreStore {
    type Error;

    fn load(&self) -> Result<Vec<HighScore>, Self::Error>;

    fn save(&self, entries: &[HighScore]) -> Result<(), Self::Error>;
}

/// Store that keeps the list in memory, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    entries: RefCell<Vec<HighScore>>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new(entries: Vec<HighScore>) -> Self {
        Self {
            entries: RefCell::new(entries),
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    type Error = Infallible;

    fn load(&self) -> Result<Vec<HighScore>, Self::Error> {
        Ok(self.entries.borrow().clone())
    }

    fn save(&self, entries: &[HighScore]) -> Result<(), Self::Error> {
        *self.entries.borrow_mut() = entries.to_vec();
        Ok(())
    }
}

/// High-score list sorted by descending score.
///
/// Ties keep their insertion order: an older entry stays above a newer one
/// with the same score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    entries: Vec<HighScore>,
}

impl Scoreboard {
    /// Builds a scoreboard from entries in any order.
    #[must_use]
    pub fn from_entries(mut entries: Vec<HighScore>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    pub fn load<S>(store: &S) -> Result<Self, S::Error>
    where
        S: ScoreStore,
    {
        let entries = store.load()?;
        debug!("loaded {} high scores", entries.len());
        Ok(Self::from_entries(entries))
    }

    #[must_use]
    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    /// Best score so far, if any.
    #[must_use]
    pub fn best(&self) -> Option<&HighScore> {
        self.entries.first()
    }

    /// Inserts an entry below every entry with an equal or higher score and
    /// returns its zero-based rank.
    pub fn insert(&mut self, entry: HighScore) -> usize {
        let rank = self.entries.partition_point(|e| e.score >= entry.score);
        self.entries.insert(rank, entry);
        rank
    }

    /// Inserts an entry and writes the whole list through `store`.
    ///
    /// Returns the rank of the new entry. On a save error the entry stays in
    /// the in-memory list.
    pub fn record<S>(&mut self, entry: HighScore, store: &S) -> Result<usize, S::Error>
    where
        S: ScoreStore,
    {
        let name = entry.name.clone();
        let score = entry.score;
        let rank = self.insert(entry);
        store.save(&self.entries)?;
        debug!("recorded score {score} for {name:?} at rank {}", rank + 1);
        Ok(rank)
    }
}
