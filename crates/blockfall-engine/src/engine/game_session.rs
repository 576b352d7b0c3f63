use std::time::Duration;

use log::{debug, info};

use crate::core::{board::Board, piece::Piece};

use super::{
    ExitRequest, FrameInput, GameConfig, GameStats, HeldKeys, InputEvent,
    game_field::GameField,
    piece_generator::PieceSeed,
};

/// Phase of the spawn → fall → lock → clear cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GamePhase {
    /// The next piece is about to become active.
    Spawning,
    /// The active piece is falling and accepts input.
    Falling,
    /// The active piece could not fall and is merged into the board.
    Locking,
    /// Full rows are cleared and scored.
    LineClear,
    /// Terminal phase; no further motion is processed.
    GameOver,
}

/// Result of one [`GameSession::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StepOutcome {
    /// The game goes on.
    Running,
    /// The game has ended; the driver should move on to name entry.
    GameOver,
    /// The player asked to leave; nothing else in the frame was processed.
    Exit(ExitRequest),
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, Copy)]
pub struct GameSnapshot<'a> {
    pub board: &'a Board,
    pub active_piece: Piece,
    pub next_piece: Piece,
    pub score: u64,
    pub multiplier: f64,
    pub phase: GamePhase,
}

/// A single game: field, score state, timers and the phase machine.
///
/// A driver calls [`GameSession::step`] once per frame with the elapsed time
/// and the frame's input. Within a step:
///
/// 1. A quit or escape event ends the step immediately
/// 2. Rotation and hard-drop events are applied in order
/// 3. Held sideways keys move the piece, at most once per move interval
/// 4. The fall timer advances; when it expires the piece falls one row or,
///    if it cannot, locks, clears rows and the next piece spawns
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{FrameInput, GameConfig, GameSession, HeldKeys};
///
/// let mut session = GameSession::new(GameConfig::default());
/// let start = session.field().active_piece();
///
/// let input = FrameInput::held(HeldKeys { left: true, right: false });
/// session.step(Duration::from_millis(100), &input);
/// assert_eq!(session.field().active_piece().x(), start.x() - 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    field: GameField,
    stats: GameStats,
    phase: GamePhase,
    fall_interval: Duration,
    fall_timer: Duration,
    move_timer: Duration,
}

impl GameSession {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::from_field(config, GameField::new())
    }

    #[must_use]
    pub fn with_seed(config: GameConfig, seed: PieceSeed) -> Self {
        Self::from_field(config, GameField::with_seed(seed))
    }

    /// Starts a session on a prepared field.
    #[must_use]
    pub fn from_field(config: GameConfig, field: GameField) -> Self {
        let phase = if field.board().is_colliding(&field.active_piece()) {
            GamePhase::GameOver
        } else {
            GamePhase::Falling
        };
        info!("new game started with seed {}", field.seed());
        Self {
            config,
            field,
            stats: GameStats::new(),
            phase,
            fall_interval: config.initial_fall_interval,
            fall_timer: Duration::ZERO,
            move_timer: config.move_interval,
        }
    }

    /// Throws the current game away and starts over with a random seed.
    pub fn restart(&mut self) {
        *self = Self::new(self.config);
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    /// Current time between automatic falls.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            board: self.field.board(),
            active_piece: self.field.active_piece(),
            next_piece: self.field.next_piece(),
            score: self.stats.score(),
            multiplier: self.stats.multiplier(),
            phase: self.phase,
        }
    }

    /// Advances the game by one frame.
    pub fn step(&mut self, elapsed: Duration, input: &FrameInput) -> StepOutcome {
        if let Some(exit) = input.events.iter().find_map(|event| event.exit_request()) {
            info!("player left the game ({exit:?}) with score {}", self.score());
            return StepOutcome::Exit(exit);
        }
        if self.phase.is_game_over() {
            return StepOutcome::GameOver;
        }

        for &event in &input.events {
            self.apply_event(event);
        }
        self.apply_held_keys(elapsed, input.held);
        self.advance_fall_timer(elapsed);

        if self.phase.is_game_over() {
            StepOutcome::GameOver
        } else {
            StepOutcome::Running
        }
    }

    fn apply_event(&mut self, event: InputEvent) {
        if let Some(direction) = event.rotation() {
            _ = self.field.try_rotate(direction);
        } else if event.is_hard_drop() {
            self.hard_drop();
        }
    }

    /// Drops the piece as far as it goes, scoring every row.
    ///
    /// The piece locks at the next fall-timer expiry, not here.
    fn hard_drop(&mut self) {
        let mut rows = 0;
        while self.field.try_move_down().is_ok() {
            self.stats.award_hard_drop_row(&self.config);
            rows += 1;
        }
        debug!("hard drop of {rows} rows");
    }

    fn apply_held_keys(&mut self, elapsed: Duration, held: HeldKeys) {
        self.move_timer = self.move_timer.saturating_add(elapsed);
        if !held.any() || self.move_timer < self.config.move_interval {
            return;
        }
        self.move_timer = Duration::ZERO;
        if held.left {
            _ = self.field.try_move_left();
        }
        if held.right {
            _ = self.field.try_move_right();
        }
    }

    fn advance_fall_timer(&mut self, elapsed: Duration) {
        self.fall_timer = self.fall_timer.saturating_add(elapsed);
        if self.fall_timer < self.fall_interval {
            return;
        }
        self.fall_timer = Duration::ZERO;
        if self.field.try_move_down().is_ok() {
            return;
        }
        self.phase = GamePhase::Locking;
        self.run_phases();
    }

    /// Runs the lock cycle until the session is falling again or over.
    fn run_phases(&mut self) {
        loop {
            self.phase = match self.phase {
                GamePhase::Falling | GamePhase::GameOver => return,
                GamePhase::Locking => {
                    self.field.place_active_piece();
                    GamePhase::LineClear
                }
                GamePhase::LineClear => self.clear_rows(),
                GamePhase::Spawning => match self.field.spawn_next() {
                    Ok(()) => GamePhase::Falling,
                    Err(_) => {
                        info!("game over: no room to spawn, score {}", self.score());
                        GamePhase::GameOver
                    }
                },
            };
        }
    }

    fn clear_rows(&mut self) -> GamePhase {
        let rows = self.field.clear_full_rows();
        let points = self.stats.award_line_clears(&self.config, rows);
        if rows > 0 {
            debug!("cleared {rows} rows for {points} points");
        }
        if self.field.board().is_game_over() {
            info!("game over: top row reached, score {}", self.score());
            return GamePhase::GameOver;
        }
        self.fall_interval = self.fall_interval.mul_f64(self.config.fall_interval_decay);
        self.stats.grow_multiplier(&self.config);
        GamePhase::Spawning
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cell, ShapeKind};

    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn seed() -> PieceSeed {
        PieceSeed::from_bytes([42; 16])
    }

    fn session_with(board: Board, piece: Piece) -> GameSession {
        let mut field = GameField::with_board(board, seed());
        field.set_active_piece(piece).unwrap();
        GameSession::from_field(GameConfig::default(), field)
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    /// Steps with a full fall interval so the fall timer expires exactly once.
    fn fall_tick(session: &mut GameSession) -> StepOutcome {
        let interval = session.fall_interval();
        session.step(interval, &idle())
    }

    #[test]
    fn test_new_session_is_falling() {
        let session = GameSession::with_seed(GameConfig::default(), seed());
        assert!(session.phase().is_falling());
        assert_eq!(session.score(), 0);
        assert_eq!(session.fall_interval(), Duration::from_millis(250));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.active_piece.x(), 4);
        assert_eq!(snapshot.active_piece.y(), 0);
        assert_eq!(snapshot.next_piece, session.field().next_piece());
    }

    #[test]
    fn test_piece_falls_when_timer_expires() {
        let mut session = session_with(Board::EMPTY, Piece::new(ShapeKind::T));
        assert!(session.step(Duration::from_millis(249), &idle()).is_running());
        assert_eq!(session.field().active_piece().y(), 0);
        assert!(session.step(Duration::from_millis(1), &idle()).is_running());
        assert_eq!(session.field().active_piece().y(), 1);
        // Timer was reset.
        session.step(FRAME, &idle());
        assert_eq!(session.field().active_piece().y(), 1);
    }

    #[test]
    fn test_i_piece_completing_row_scores_1000() {
        let board = Board::from_ascii(
            "
            ######....
            ",
        );
        let mut session = session_with(board, Piece::at(ShapeKind::I, 6, Board::HEIGHT - 1));
        assert!(fall_tick(&mut session).is_running());
        assert_eq!(session.score(), 1000);
        assert_eq!(session.stats().total_cleared_lines(), 1);
        assert!(session.field().board().rows().flatten().all(|c| c.is_empty()));
        assert!(session.phase().is_falling());
    }

    #[test]
    fn test_lock_decays_interval_and_grows_multiplier() {
        let mut session = session_with(Board::EMPTY, Piece::at(ShapeKind::O, 0, 18));
        fall_tick(&mut session);
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(
            session.fall_interval(),
            Duration::from_millis(250).mul_f64(0.99)
        );
        assert!((session.stats().multiplier() - 1.01).abs() < 1e-12);
        assert_eq!(
            session.field().board().cell(0, 19),
            Some(Cell::Filled(ShapeKind::O.color()))
        );
        // The pre-generated next piece became active at the spawn position.
        assert_eq!(session.field().active_piece().y(), 0);
    }

    #[test]
    fn test_hard_drop_scores_rows_and_locks_on_next_tick() {
        let mut session = session_with(Board::EMPTY, Piece::new(ShapeKind::O));
        let input = FrameInput::from_events([InputEvent::HardDrop]);
        assert!(session.step(FRAME, &input).is_running());
        assert_eq!(session.field().active_piece().y(), 18);
        assert_eq!(session.score(), 18 * 10);
        assert_eq!(session.stats().completed_pieces(), 0);

        session.step(session.fall_interval() - FRAME, &idle());
        assert_eq!(session.stats().completed_pieces(), 1);
    }

    #[test]
    fn test_rotation_is_gated_by_board() {
        let mut session = session_with(Board::EMPTY, Piece::new(ShapeKind::T));
        let input = FrameInput::from_events([InputEvent::RotateClockwise]);
        session.step(FRAME, &input);
        assert_eq!(
            session.field().active_piece().matrix().to_string(),
            ".#\n##\n.#\n"
        );

        // Vertical I piece pushed against the right wall cannot turn flat.
        let vertical = Piece::at(ShapeKind::I, 0, 5).rotated();
        let mut session = session_with(Board::EMPTY, vertical);
        for _ in 0..9 {
            session.step(
                Duration::from_millis(100),
                &FrameInput::held(HeldKeys {
                    left: false,
                    right: true,
                }),
            );
        }
        let before = session.field().active_piece();
        assert_eq!(before.x(), Board::WIDTH - 1);
        let input = FrameInput::from_events([InputEvent::RotateCounterClockwise]);
        session.step(FRAME, &input);
        assert_eq!(session.field().active_piece().matrix(), before.matrix());
    }

    #[test]
    fn test_held_moves_are_rate_limited() {
        let mut session = session_with(Board::EMPTY, Piece::new(ShapeKind::O));
        let left = FrameInput::held(HeldKeys {
            left: true,
            right: false,
        });
        // First press moves immediately.
        session.step(FRAME, &left);
        assert_eq!(session.field().active_piece().x(), 3);
        // Further frames within the interval do nothing.
        for _ in 0..5 {
            session.step(FRAME, &left);
        }
        assert_eq!(session.field().active_piece().x(), 3);
        // One long frame still moves only once.
        session.step(Duration::from_millis(200), &left);
        assert_eq!(session.field().active_piece().x(), 2);
    }

    #[test]
    fn test_four_held_moves_reach_left_wall() {
        let mut session = session_with(Board::EMPTY, Piece::new(ShapeKind::T));
        let left = FrameInput::held(HeldKeys {
            left: true,
            right: false,
        });
        for expected in [3, 2, 1, 0, 0] {
            session.step(Duration::from_millis(100), &left);
            assert_eq!(session.field().active_piece().x(), expected);
        }
    }

    #[test]
    fn test_quit_and_escape_exit_immediately() {
        let mut session = session_with(Board::EMPTY, Piece::new(ShapeKind::O));
        let input = FrameInput::from_events([InputEvent::HardDrop, InputEvent::Quit]);
        assert_eq!(session.step(FRAME, &input), StepOutcome::Exit(ExitRequest::Quit));
        assert_eq!(session.field().active_piece().y(), 0);
        assert_eq!(session.score(), 0);

        let input = FrameInput::from_events([InputEvent::Escape]);
        assert_eq!(session.step(FRAME, &input), StepOutcome::Exit(ExitRequest::Escape));
    }

    #[test]
    fn test_lock_in_top_row_is_game_over() {
        let board = Board::from_ascii(&"#.........\n".repeat(19));
        let mut session = session_with(board, Piece::at(ShapeKind::Single, 0, 0));
        assert!(fall_tick(&mut session).is_game_over());
        assert!(session.phase().is_game_over());
        // No motion after game over.
        let before = session.field().active_piece();
        let input = FrameInput::from_events([InputEvent::HardDrop]);
        assert!(session.step(Duration::from_secs(1), &input).is_game_over());
        assert_eq!(session.field().active_piece(), before);
        // Quit is still honoured.
        let input = FrameInput::from_events([InputEvent::Quit]);
        assert!(session.step(FRAME, &input).is_exit());
    }

    #[test]
    fn test_restart_resets_score_state() {
        let mut session = session_with(Board::EMPTY, Piece::new(ShapeKind::O));
        session.step(FRAME, &FrameInput::from_events([InputEvent::HardDrop]));
        assert!(session.score() > 0);
        session.restart();
        assert_eq!(session.score(), 0);
        assert!(session.phase().is_falling());
        assert_eq!(session.fall_interval(), Duration::from_millis(250));
        assert!(session.field().board().rows().flatten().all(|c| c.is_empty()));
    }
}
