//! Game-state engine for a falling-block puzzle game.
//!
//! - [`core`] holds the geometry: the shape catalog, pieces and the board grid.
//! - [`engine`] drives a game: timing, input effects, scoring and the
//!   spawn → fall → lock → clear → game-over cycle.
//! - [`scoreboard`] keeps the ordered high-score list behind a [`ScoreStore`].
//! - [`name_entry`] edits the player name typed after game over.
//!
//! The crate does no terminal or file I/O. A driver feeds elapsed time and
//! input to [`GameSession::step`] once per frame and renders [`GameSnapshot`].
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{FrameInput, GameConfig, GameSession, InputEvent};
//!
//! let mut session = GameSession::new(GameConfig::default());
//! let input = FrameInput::from_events([InputEvent::HardDrop]);
//! let outcome = session.step(Duration::from_millis(16), &input);
//! assert!(outcome.is_running());
//! ```

pub use self::{core::*, engine::*, name_entry::*, scoreboard::*};

pub mod core;
pub mod engine;
pub mod name_entry;
pub mod scoreboard;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding with the board")]
pub struct PieceCollisionError;
