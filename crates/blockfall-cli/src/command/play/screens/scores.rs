use std::time::Duration;

use blockfall_engine::GameSession;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::Constraint,
    text::Line,
    widgets::{Block, Padding},
};

use crate::{
    tui::{Screen, ScreenTransition},
    ui::widgets::{ScoreTable, style},
};

use super::{GameScreen, PlayContext};

const SHOWN_SCORES: usize = 10;
const HELP: &str = "Controls: Enter / R (Play Again) | Q / Esc (Quit)";

/// High-score table shown after a score was saved.
#[derive(Debug)]
pub(crate) struct ScoresScreen {
    context: PlayContext,
    highlight: Option<usize>,
}

impl ScoresScreen {
    pub(crate) fn new(context: PlayContext, highlight: Option<usize>) -> Self {
        Self { context, highlight }
    }
}

impl Screen for ScoresScreen {
    fn handle_event(&mut self, event: &Event) -> anyhow::Result<ScreenTransition> {
        let Some(key) = event.as_key_event().filter(|key| key.is_press()) else {
            return Ok(ScreenTransition::Stay);
        };
        let transition = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                ScreenTransition::Exit
            }
            KeyCode::Enter | KeyCode::Char('r' | 'R') => {
                let session = GameSession::new(self.context.config);
                ScreenTransition::Replace(Box::new(GameScreen::new(self.context.clone(), session)))
            }
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => ScreenTransition::Exit,
            _ => ScreenTransition::Stay,
        };
        Ok(transition)
    }

    fn update(&mut self, _elapsed: Duration) -> anyhow::Result<ScreenTransition> {
        Ok(ScreenTransition::Stay)
    }

    fn draw(&self, frame: &mut Frame) {
        let main_area = super::draw_help(frame, HELP);
        let table = ScoreTable::new(self.context.scoreboard.entries(), SHOWN_SCORES)
            .highlight(self.highlight)
            .show_dates(true)
            .block(
                Block::bordered()
                    .title(Line::from("HIGH SCORES").centered())
                    .padding(Padding::horizontal(1))
                    .border_style(style::BORDER)
                    .style(style::DEFAULT),
            );
        let area = main_area.centered(Constraint::Length(44), Constraint::Length(table.height()));
        frame.render_widget(table, area);
    }
}
