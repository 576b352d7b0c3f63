use std::time::Duration;

use blockfall_engine::{GameSession, HighScore, NameEntry, NameEntryStatus};
use crossterm::event::Event;
use log::info;
use ratatui::{Frame, text::Line};

use crate::{
    command::play::input::text_key,
    tui::{Screen, ScreenTransition},
    ui::widgets::{GameDisplay, Popup, style},
};

use super::{PlayContext, ScoresScreen};

const HELP: &str = "Controls: Type your name | Enter (Save) | Esc (Discard) | Ctrl-C (Quit)";

/// Asks for the player's name over the final board and records the score.
#[derive(Debug)]
pub(crate) struct NameEntryScreen {
    context: PlayContext,
    session: GameSession,
    entry: NameEntry,
}

impl NameEntryScreen {
    pub(crate) fn new(context: PlayContext, session: GameSession) -> Self {
        Self {
            context,
            session,
            entry: NameEntry::new(),
        }
    }

    fn commit(&mut self, name: String) -> anyhow::Result<ScreenTransition> {
        let score = self.session.score();
        let rank = self
            .context
            .scoreboard
            .record(HighScore::new(name.clone(), score), &self.context.store)?;
        info!(
            "saved score {score} for {name} at rank {} to {}",
            rank + 1,
            self.context.store.path().display()
        );
        Ok(ScreenTransition::Replace(Box::new(ScoresScreen::new(
            self.context.clone(),
            Some(rank),
        ))))
    }
}

impl Screen for NameEntryScreen {
    fn handle_event(&mut self, event: &Event) -> anyhow::Result<ScreenTransition> {
        let Some(event) = event.as_key_event().as_ref().and_then(text_key) else {
            return Ok(ScreenTransition::Stay);
        };
        match self.entry.handle(event) {
            NameEntryStatus::Editing => Ok(ScreenTransition::Stay),
            NameEntryStatus::Committed(name) => self.commit(name),
            NameEntryStatus::Aborted(_) => Ok(ScreenTransition::Exit),
        }
    }

    fn update(&mut self, _elapsed: Duration) -> anyhow::Result<ScreenTransition> {
        Ok(ScreenTransition::Stay)
    }

    fn draw(&self, frame: &mut Frame) {
        let main_area = super::draw_help(frame, HELP);
        let display = GameDisplay::new(self.session.snapshot(), self.context.scoreboard.entries());
        frame.render_widget(display, main_area);

        let popup = Popup::new(
            vec![
                Line::from("GAME OVER"),
                Line::from(format!("Score: {}", self.session.score())),
                Line::from(""),
                Line::from(format!("Name: {}_", self.entry.text())),
            ],
            style::GAME_OVER,
        );
        frame.render_widget(popup, main_area);
    }
}
