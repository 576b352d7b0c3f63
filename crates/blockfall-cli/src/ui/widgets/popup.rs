use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

/// Centered box of text drawn over whatever is underneath.
#[derive(Debug)]
pub(crate) struct Popup<'a> {
    lines: Vec<Line<'a>>,
    style: Style,
}

impl<'a> Popup<'a> {
    pub(crate) fn new(lines: Vec<Line<'a>>, style: Style) -> Self {
        Self { lines, style }
    }
}

impl Widget for Popup<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from(self.lines).centered();
        let block = Block::bordered()
            .padding(Padding::horizontal(1))
            .style(self.style);
        let width = text.width() as u16 + 4;
        let height = text.height() as u16 + 2;

        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [popup_area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);

        Clear.render(popup_area, buf);
        Paragraph::new(text).block(block).render(popup_area, buf);
    }
}
