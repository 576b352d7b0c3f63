use std::fmt;

use super::{
    piece::{Piece, RotationDirection},
    shape::{Color, ShapeKind},
};

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Locked block of the given color.
    Filled(Color),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

type Row = [Cell; BOARD_WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; BOARD_WIDTH];

/// The grid of locked cells.
///
/// The board only knows about locked blocks; the falling piece lives beside it
/// and is checked against it before every move. Cells go from empty to filled
/// only through [`Board::place`] and back to empty only through
/// [`Board::clear_full_rows`].
///
/// Coordinates are `(x, y)` with `x` in `0..BOARD_WIDTH` and `y` in
/// `0..BOARD_HEIGHT`, row 0 at the top.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, ShapeKind};
///
/// let mut board = Board::EMPTY;
/// let mut piece = Piece::new(ShapeKind::O);
/// while board.can_fall(&piece) {
///     piece = piece.down();
/// }
/// board.place(&piece);
/// assert_eq!(piece.y(), 18);
/// assert!(!board.is_game_over());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    /// Returns the cell at `(x, y)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> + '_ {
        self.rows.iter()
    }

    /// Out-of-bounds positions count as blocked.
    fn is_blocked(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_none_or(Cell::is_filled)
    }

    /// Returns whether any cell of `piece` is outside the board or over a filled cell.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece
            .occupied_positions()
            .any(|(x, y)| self.is_blocked(x, y))
    }

    /// Returns whether `piece` may move down one row.
    ///
    /// False if any occupied cell would land below the last row or on a
    /// filled cell.
    #[must_use]
    pub fn can_fall(&self, piece: &Piece) -> bool {
        !self.is_colliding(&piece.down())
    }

    #[must_use]
    pub fn can_move_left(&self, piece: &Piece) -> bool {
        piece.left().is_some_and(|moved| !self.is_colliding(&moved))
    }

    #[must_use]
    pub fn can_move_right(&self, piece: &Piece) -> bool {
        !self.is_colliding(&piece.right())
    }

    /// Returns whether `piece` may turn towards `direction` in place.
    ///
    /// The candidate is built on a copy; the live piece is never touched.
    /// Rotation keeps the top-left corner, so only the right and bottom edges
    /// can be exceeded.
    #[must_use]
    pub fn can_rotate(&self, piece: &Piece, direction: RotationDirection) -> bool {
        !self.is_colliding(&piece.rotated_towards(direction))
    }

    /// Writes the piece color into every cell the piece occupies.
    ///
    /// No validation is done; callers check legality with the move tests first.
    /// Cells outside the board are skipped.
    pub fn place(&mut self, piece: &Piece) {
        let color = piece.color();
        for (x, y) in piece.occupied_positions() {
            if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = Cell::Filled(color);
            }
        }
    }

    /// Clears every full row and returns how many were cleared.
    ///
    /// Rows are scanned once from top to bottom. A full row is emptied and every
    /// row above it shifts down by one, leaving row 0 empty. The row shifted
    /// into the cleared slot was scanned already and is not full, so adjacent
    /// full rows are all cleared in the same pass.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for y in 0..BOARD_HEIGHT {
            if self.rows[y].iter().all(|cell| cell.is_filled()) {
                self.rows.copy_within(0..y, 1);
                self.rows[0] = EMPTY_ROW;
                cleared += 1;
            }
        }
        cleared
    }

    /// Returns whether any cell of the top row is filled.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.rows[0].iter().any(|cell| cell.is_filled())
    }

    /// Creates a board from ASCII art (`#` filled, `.` empty).
    ///
    /// The art is aligned to the bottom of the board: its last line becomes
    /// the last row. Blank lines and characters other than `#`/`.` are
    /// ignored. Filled cells take the color of [`ShapeKind::Single`].
    ///
    /// # Panics
    ///
    /// Panics if a line does not have exactly [`BOARD_WIDTH`] cells or the art
    /// has more than [`BOARD_HEIGHT`] lines.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "At most {BOARD_HEIGHT} rows are allowed, got {}",
            lines.len()
        );

        let top = BOARD_HEIGHT - lines.len();
        let color = ShapeKind::Single.color();
        for (i, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                BOARD_WIDTH,
                "Each row must have exactly {BOARD_WIDTH} cells, got {} at row {i}",
                chars.len(),
            );
            for (x, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    board.rows[top + i][x] = Cell::Filled(color);
                }
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                f.write_str(if cell.is_filled() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
