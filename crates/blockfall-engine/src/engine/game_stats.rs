use super::GameConfig;

/// Score state of a game: points, multiplier and a few counters.
///
/// # Scoring
///
/// - Each cleared row earns `trunc(line_clear_points × multiplier)`
/// - Each row descended by a hard drop earns `trunc(drop_points × multiplier)`
/// - The multiplier starts at 1.0 and grows after every lock that does not end
///   the game
///
/// The score never decreases and the multiplier never shrinks; both reset only
/// when a new game starts.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameConfig, GameStats};
///
/// let config = GameConfig::default();
/// let mut stats = GameStats::new();
/// stats.award_line_clears(&config, 2);
/// assert_eq!(stats.score(), 2000);
///
/// stats.grow_multiplier(&config);
/// stats.award_line_clears(&config, 1);
/// assert_eq!(stats.score(), 3010);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameStats {
    score: u64,
    multiplier: f64,
    completed_pieces: usize,
    total_cleared_lines: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            multiplier: 1.0,
            completed_pieces: 0,
            total_cleared_lines: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Number of pieces locked into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn scaled(&self, points: u64) -> u64 {
        (points as f64 * self.multiplier) as u64
    }

    /// Records a lock that cleared `rows` rows and returns the points earned.
    pub fn award_line_clears(&mut self, config: &GameConfig, rows: usize) -> u64 {
        self.completed_pieces += 1;
        self.total_cleared_lines += rows;
        let per_row = self.scaled(config.line_clear_points);
        let points = per_row * rows as u64;
        self.score += points;
        points
    }

    /// Awards the points for one row descended by a hard drop.
    pub fn award_hard_drop_row(&mut self, config: &GameConfig) -> u64 {
        let points = self.scaled(config.drop_points);
        self.score += points;
        points
    }

    pub fn grow_multiplier(&mut self, config: &GameConfig) {
        self.multiplier *= config.multiplier_growth;
    }
}
