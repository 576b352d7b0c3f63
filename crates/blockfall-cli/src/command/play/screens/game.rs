use std::{mem, time::Duration};

use blockfall_engine::{FrameInput, GameSession, InputEvent, StepOutcome};
use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::play::input::{GameKey, HeldKeyTracker, game_key},
    tui::{Runtime, Screen, ScreenTransition},
    ui::widgets::GameDisplay,
};

use super::{NameEntryScreen, PlayContext};

const FPS: f64 = 60.0;
const HELP: &str =
    "Controls: ← → (Move) | ↑ (Rotate CW) | ↓ (Rotate CCW) | Space (Hard Drop) | Q (Quit)";

/// Runs a game session, feeding it the keys received since the last tick.
#[derive(Debug)]
pub(crate) struct GameScreen {
    context: PlayContext,
    session: GameSession,
    pending: Vec<InputEvent>,
    held: HeldKeyTracker,
}

impl GameScreen {
    pub(crate) fn new(context: PlayContext, session: GameSession) -> Self {
        Self {
            context,
            session,
            pending: Vec::new(),
            held: HeldKeyTracker::new(),
        }
    }
}

impl Screen for GameScreen {
    fn on_enter(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(FPS);
        self.held.clear();
    }

    fn handle_event(&mut self, event: &Event) -> anyhow::Result<ScreenTransition> {
        if let Some(key) = event.as_key_event() {
            match game_key(&key) {
                Some(GameKey::Event(event)) => self.pending.push(event),
                Some(GameKey::Press(side)) => self.held.press(side),
                Some(GameKey::Release(side)) => self.held.release(side),
                None => {}
            }
        }
        Ok(ScreenTransition::Stay)
    }

    fn update(&mut self, elapsed: Duration) -> anyhow::Result<ScreenTransition> {
        self.held.advance(elapsed);
        let input = FrameInput {
            events: mem::take(&mut self.pending),
            held: self.held.held(),
        };
        let transition = match self.session.step(elapsed, &input) {
            StepOutcome::Running => ScreenTransition::Stay,
            StepOutcome::GameOver => ScreenTransition::Replace(Box::new(NameEntryScreen::new(
                self.context.clone(),
                self.session.clone(),
            ))),
            StepOutcome::Exit(_) => ScreenTransition::Exit,
        };
        Ok(transition)
    }

    fn draw(&self, frame: &mut Frame) {
        let main_area = super::draw_help(frame, HELP);
        let display = GameDisplay::new(self.session.snapshot(), self.context.scoreboard.entries());
        frame.render_widget(display, main_area);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Board, GameConfig, GameField, PieceSeed, Scoreboard};
    use crossterm::event::{KeyCode, KeyEvent};

    use crate::store::JsonFileStore;

    use super::*;

    fn context() -> PlayContext {
        PlayContext {
            config: GameConfig::default(),
            scoreboard: Scoreboard::default(),
            store: JsonFileStore::new("unused.json"),
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    fn screen() -> GameScreen {
        let session = GameSession::with_seed(GameConfig::default(), PieceSeed::from_bytes([7; 16]));
        GameScreen::new(context(), session)
    }

    #[test]
    fn test_keys_are_applied_on_next_update() {
        let mut screen = screen();
        let start = screen.session.field().active_piece();
        screen.handle_event(&key(KeyCode::Char(' '))).unwrap();
        assert_eq!(screen.session.field().active_piece(), start);

        let transition = screen.update(Duration::from_millis(16)).unwrap();
        assert!(matches!(transition, ScreenTransition::Stay));
        assert!(screen.session.field().active_piece().y() > start.y());
        assert!(screen.pending.is_empty());
    }

    #[test]
    fn test_held_arrow_moves_piece() {
        let mut screen = screen();
        let start = screen.session.field().active_piece();
        screen.handle_event(&key(KeyCode::Right)).unwrap();
        screen.update(Duration::from_millis(16)).unwrap();
        assert_eq!(screen.session.field().active_piece().x(), start.x() + 1);
    }

    #[test]
    fn test_quit_exits() {
        let mut screen = screen();
        screen.handle_event(&key(KeyCode::Char('q'))).unwrap();
        let transition = screen.update(Duration::from_millis(16)).unwrap();
        assert!(matches!(transition, ScreenTransition::Exit));
    }

    #[test]
    fn test_game_over_moves_to_name_entry() {
        let seed = PieceSeed::from_bytes([7; 16]);
        // Lock the first piece at spawn so the same seed spawns into it.
        let mut board = Board::EMPTY;
        board.place(&GameField::with_seed(seed).active_piece());
        let field = GameField::with_board(board, seed);
        let session = GameSession::from_field(GameConfig::default(), field);
        let mut screen = GameScreen::new(context(), session);

        let transition = screen.update(Duration::from_millis(16)).unwrap();
        assert!(matches!(transition, ScreenTransition::Replace(_)));
    }
}
