use blockfall_engine::{GameSnapshot, HighScore};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Padding, Paragraph, Widget},
};

use super::{BoardDisplay, PieceDisplay, ScoreTable, style};

/// High scores listed beside the board.
const SIDE_SCORES: usize = 5;
const SIDE_PANEL_WIDTH: u16 = 24;

/// Board, next-piece preview, score panel and a short high-score list.
#[derive(Debug)]
pub(crate) struct GameDisplay<'a> {
    snapshot: GameSnapshot<'a>,
    high_scores: &'a [HighScore],
}

impl<'a> GameDisplay<'a> {
    pub(crate) fn new(snapshot: GameSnapshot<'a>, high_scores: &'a [HighScore]) -> Self {
        Self {
            snapshot,
            high_scores,
        }
    }

    fn panel(&self, title: &'a str) -> Block<'a> {
        let border_style = if self.snapshot.phase.is_game_over() {
            style::BORDER_GAME_OVER
        } else {
            style::BORDER
        };
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::horizontal(1))
            .border_style(border_style)
            .style(style::DEFAULT)
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = &self.snapshot;

        let board = BoardDisplay::new(snapshot.board)
            .active_piece(snapshot.active_piece)
            .block(self.panel(""));
        let next = PieceDisplay::new(snapshot.next_piece).block(self.panel("NEXT"));
        let stats = Paragraph::new(Text::from(vec![
            Line::from(format!("Score {:>10}", snapshot.score)),
            Line::from(format!("Bonus {:>9.3}x", snapshot.multiplier)),
        ]))
        .block(self.panel("STATS"));
        let scores = ScoreTable::new(self.high_scores, SIDE_SCORES).block(self.panel("BEST"));

        let [board_column, side_column] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(SIDE_PANEL_WIDTH),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(board_column);
        let [next_area, stats_area, scores_area] = Layout::vertical([
            Constraint::Length(next.height()),
            Constraint::Length(4),
            Constraint::Length(scores.height()),
        ])
        .areas(side_column);
        let [next_area] = Layout::horizontal([Constraint::Length(next.width())]).areas(next_area);

        board.render(board_area, buf);
        next.render(next_area, buf);
        stats.render(stats_area, buf);
        scores.render(scores_area, buf);
    }
}
