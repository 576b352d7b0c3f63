use serde::{Deserialize, Serialize};

use super::shape::{Color, ShapeKind, ShapeMatrix};

/// Column at which new pieces appear.
pub const PIECE_SPAWN_X: usize = 4;
/// Row at which new pieces appear.
pub const PIECE_SPAWN_Y: usize = 0;

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    /// One application of [`ShapeMatrix::rotated`].
    CounterClockwise,
    /// Three applications of [`ShapeMatrix::rotated`].
    Clockwise,
}

impl RotationDirection {
    /// Number of counter-clockwise quarter turns this direction amounts to.
    #[must_use]
    pub const fn quarter_turns(self) -> usize {
        match self {
            RotationDirection::CounterClockwise => 1,
            RotationDirection::Clockwise => 3,
        }
    }
}

/// A positioned, rotatable instance of a shape.
///
/// Pieces are immutable: movement and rotation return new `Piece` values, so a
/// candidate can be validated against the board before it replaces the live
/// piece.
///
/// # Coordinate System
///
/// - `(x, y)` is the top-left corner of the piece's bounding box
/// - `x` grows to the right, `y` grows downward from the top row
/// - Rotation keeps the top-left corner fixed and swaps width and height
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, RotationDirection, ShapeKind};
///
/// let piece = Piece::new(ShapeKind::T);
/// let moved = piece.left().unwrap().down();
/// let rotated = moved.rotated_towards(RotationDirection::Clockwise);
/// assert_eq!((rotated.x(), rotated.y()), (3, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    x: usize,
    y: usize,
    matrix: ShapeMatrix,
}

impl Piece {
    /// Creates a piece of `kind` at the spawn position, in spawn orientation.
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        Self::at(kind, PIECE_SPAWN_X, PIECE_SPAWN_Y)
    }

    /// Creates a piece of `kind` in spawn orientation at an arbitrary position.
    #[must_use]
    pub fn at(kind: ShapeKind, x: usize, y: usize) -> Self {
        Self {
            kind,
            x,
            y,
            matrix: kind.definition().matrix(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn x(&self) -> usize {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> usize {
        self.y
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.matrix.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.matrix.height()
    }

    #[must_use]
    pub fn matrix(&self) -> &ShapeMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Iterates over the board coordinates covered by this piece.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.matrix
            .occupied_offsets()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Moves one column left; `None` at column 0.
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        let x = self.x.checked_sub(1)?;
        Some(Self { x, ..*self })
    }

    #[must_use]
    pub fn right(&self) -> Self {
        Self {
            x: self.x + 1,
            ..*self
        }
    }

    #[must_use]
    pub fn down(&self) -> Self {
        Self {
            y: self.y + 1,
            ..*self
        }
    }

    /// Rotates a quarter turn counter-clockwise around the fixed top-left corner.
    ///
    /// Rotation never consults the board.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            matrix: self.matrix.rotated(),
            ..*self
        }
    }

    #[must_use]
    pub fn rotated_towards(&self, direction: RotationDirection) -> Self {
        (0..direction.quarter_turns()).fold(*self, |piece, _| piece.rotated())
    }
}
