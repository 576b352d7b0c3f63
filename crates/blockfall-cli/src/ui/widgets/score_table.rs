use blockfall_engine::HighScore;
use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Block, Row, Table, Widget},
};

use super::style;

/// Ranked high-score table, optionally highlighting one row.
#[derive(Debug)]
pub(crate) struct ScoreTable<'a> {
    entries: &'a [HighScore],
    limit: usize,
    highlight: Option<usize>,
    show_dates: bool,
    block: Option<Block<'a>>,
}

impl<'a> ScoreTable<'a> {
    pub(crate) fn new(entries: &'a [HighScore], limit: usize) -> Self {
        Self {
            entries,
            limit,
            highlight: None,
            show_dates: false,
            block: None,
        }
    }

    pub(crate) fn highlight(self, rank: Option<usize>) -> Self {
        Self {
            highlight: rank,
            ..self
        }
    }

    pub(crate) fn show_dates(self, show_dates: bool) -> Self {
        Self { show_dates, ..self }
    }

    pub(crate) fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn height(&self) -> u16 {
        let rows = self.entries.len().clamp(1, self.limit) as u16;
        rows + super::block_margin(self.block.as_ref()).1
    }
}

/// Local date an entry was recorded on, or `-` when unknown.
pub(crate) fn recorded_date(entry: &HighScore) -> String {
    entry.recorded_at.map_or_else(
        || "-".to_owned(),
        |at| at.with_timezone(&Local).format("%Y-%m-%d").to_string(),
    )
}

impl Widget for ScoreTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &ScoreTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        if self.entries.is_empty() {
            Line::from("no scores yet")
                .style(style::EMPTY_DOT)
                .centered()
                .render(area, buf);
            return;
        }

        let rows = self
            .entries
            .iter()
            .take(self.limit)
            .enumerate()
            .map(|(rank, entry)| {
                let mut cells = vec![
                    format!("{:>2}", rank + 1),
                    entry.name.clone(),
                    format!("{:>9}", entry.score),
                ];
                if self.show_dates {
                    cells.push(recorded_date(entry));
                }
                let row = Row::new(cells);
                if self.highlight == Some(rank) {
                    row.style(style::HIGHLIGHT)
                } else {
                    row.style(style::DEFAULT)
                }
            });

        let mut widths = vec![
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(9),
        ];
        if self.show_dates {
            widths.push(Constraint::Length(10));
        }
        Table::new(rows, widths)
            .style(style::DEFAULT)
            .render(area, buf);
    }
}
