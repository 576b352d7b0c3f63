use blockfall_engine::{Board, Cell, Piece};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};

use super::{CELL_WIDTH, style};

/// Draws the locked cells of a board with the active piece on top.
#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    board: &'a Board,
    active_piece: Option<Piece>,
    block: Option<Block<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub(crate) fn new(board: &'a Board) -> Self {
        Self {
            board,
            active_piece: None,
            block: None,
        }
    }

    pub(crate) fn active_piece(self, piece: Piece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self
        }
    }

    pub(crate) fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn width(&self) -> u16 {
        Board::WIDTH as u16 * CELL_WIDTH + super::block_margin(self.block.as_ref()).0
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn height(&self) -> u16 {
        Board::HEIGHT as u16 + super::block_margin(self.block.as_ref()).1
    }

    fn cell_at(&self, x: usize, y: usize) -> Cell {
        if let Some(piece) = &self.active_piece
            && piece.occupied_positions().any(|pos| pos == (x, y))
        {
            return Cell::Filled(piece.color());
        }
        self.board.cell(x, y).unwrap_or_default()
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        for (y, row_area) in inner.rows().take(Board::HEIGHT).enumerate() {
            for x in 0..Board::WIDTH {
                #[expect(clippy::cast_possible_truncation)]
                let left = row_area.x + x as u16 * CELL_WIDTH;
                if left + CELL_WIDTH > row_area.right() {
                    break;
                }
                let (symbol, style) = match self.cell_at(x, y) {
                    Cell::Empty => (" .", style::EMPTY_DOT),
                    Cell::Filled(color) => ("  ", style::block(color)),
                };
                buf.set_string(left, row_area.y, symbol, style);
            }
        }
    }
}
