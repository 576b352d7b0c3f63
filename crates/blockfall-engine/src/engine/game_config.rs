use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning knobs for timing and scoring.
///
/// [`GameConfig::default`] gives the classic values: a 250 ms fall interval
/// shrinking by 1% per lock, a score multiplier growing by 1% per lock, 100 ms
/// between repeated sideways moves, 1000 points per cleared row and 10 points
/// per hard-dropped row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Time between automatic one-row falls at the start of a game.
    pub initial_fall_interval: Duration,
    /// Factor applied to the fall interval after every lock.
    pub fall_interval_decay: f64,
    /// Factor applied to the score multiplier after every lock.
    pub multiplier_growth: f64,
    /// Minimum time between two sideways moves while a direction is held.
    pub move_interval: Duration,
    /// Points per cleared row, before the multiplier.
    pub line_clear_points: u64,
    /// Points per row descended by a hard drop, before the multiplier.
    pub drop_points: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_fall_interval: Duration::from_millis(250),
            fall_interval_decay: 0.99,
            multiplier_growth: 1.01,
            move_interval: Duration::from_millis(100),
            line_clear_points: 1000,
            drop_points: 10,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_initial_fall_interval(self, initial_fall_interval: Duration) -> Self {
        Self {
            initial_fall_interval,
            ..self
        }
    }
}
