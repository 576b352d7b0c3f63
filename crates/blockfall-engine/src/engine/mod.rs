//! Game loop state and rules built on top of [`crate::core`].
//!
//! - [`GameConfig`] - Timing and scoring parameters
//! - [`GameField`] - Board, active piece and pre-generated next piece
//! - [`GameStats`] - Score, multiplier and counters
//! - [`GameSession`] - Phase machine driven by a per-frame [`GameSession::step`]
//! - [`PieceGenerator`] / [`PieceSeed`] - Seeded uniform shape draws
//! - [`FrameInput`] - Key-down events and held keys for one frame
//!
//! # Game Flow
//!
//! 1. The active piece falls one row each time the fall timer expires
//! 2. Input rotates, hard-drops or shifts it, each move checked against the board
//! 3. When it cannot fall it locks, full rows clear and score is awarded
//! 4. The fall interval shrinks, the multiplier grows and the next piece spawns
//! 5. A filled top row (or no room to spawn) ends the game
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{FrameInput, GameConfig, GameSession, InputEvent, StepOutcome};
//!
//! let mut session = GameSession::new(GameConfig::default());
//! let drop = FrameInput::from_events([InputEvent::HardDrop]);
//! let idle = FrameInput::default();
//!
//! let mut outcome = StepOutcome::Running;
//! while outcome.is_running() {
//!     session.step(Duration::ZERO, &drop);
//!     outcome = session.step(session.fall_interval(), &idle);
//! }
//! assert!(outcome.is_game_over());
//! println!("final score: {}", session.score());
//! ```

pub use self::{
    game_config::*, game_field::*, game_session::*, game_stats::*, input::*, piece_generator::*,
};

mod game_config;
mod game_field;
mod game_session;
mod game_stats;
mod input;
mod piece_generator;
