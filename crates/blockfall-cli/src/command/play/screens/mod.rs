use blockfall_engine::{GameConfig, Scoreboard};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Text,
};

use crate::store::JsonFileStore;

pub(crate) use self::{game::GameScreen, name_entry::NameEntryScreen, scores::ScoresScreen};

mod game;
mod name_entry;
mod scores;

/// State carried from one play screen to the next.
#[derive(Debug, Clone)]
pub(crate) struct PlayContext {
    pub(crate) config: GameConfig,
    pub(crate) scoreboard: Scoreboard,
    pub(crate) store: JsonFileStore,
}

/// Draws a help line at the bottom of the frame and returns the area above it.
fn draw_help(frame: &mut Frame, help: &str) -> Rect {
    let [main_area, help_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
    let text = Text::from(help)
        .style(Style::default().fg(Color::DarkGray))
        .centered();
    frame.render_widget(text, help_area);
    main_area
}
