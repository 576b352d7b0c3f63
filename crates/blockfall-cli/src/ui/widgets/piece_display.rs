use blockfall_engine::{MAX_SHAPE_SIZE, Piece};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};

use super::{CELL_WIDTH, style};

/// Rows reserved for a preview; spawn orientations are at most two rows high.
const PREVIEW_ROWS: u16 = 2;

/// Preview of a single piece in its current orientation, ignoring its position.
#[derive(Debug)]
pub(crate) struct PieceDisplay<'a> {
    piece: Piece,
    block: Option<Block<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub(crate) fn new(piece: Piece) -> Self {
        Self { piece, block: None }
    }

    pub(crate) fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn width(&self) -> u16 {
        MAX_SHAPE_SIZE as u16 * CELL_WIDTH + super::block_margin(self.block.as_ref()).0
    }

    pub(crate) fn height(&self) -> u16 {
        PREVIEW_ROWS + super::block_margin(self.block.as_ref()).1
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        let matrix = self.piece.matrix();
        // Center the shape horizontally in the four-cell preview.
        let offset = (MAX_SHAPE_SIZE - matrix.width()) as u16 * CELL_WIDTH / 2;
        let style = style::block(self.piece.color());
        for (dx, dy) in matrix.occupied_offsets() {
            let x = inner.x + offset + dx as u16 * CELL_WIDTH;
            let y = inner.y + dy as u16;
            if x + CELL_WIDTH <= inner.right() && y < inner.bottom() {
                buf.set_string(x, y, "  ", style);
            }
        }
    }
}
