use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Largest width or height any shape matrix can have.
pub const MAX_SHAPE_SIZE: usize = 4;

/// An RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn r(self) -> u8 {
        self.r
    }

    #[must_use]
    pub const fn g(self) -> u8 {
        self.g
    }

    #[must_use]
    pub const fn b(self) -> u8 {
        self.b
    }
}

/// Rectangular occupancy matrix of a shape, stored in a fixed 4×4 buffer.
///
/// Only the top-left `width × height` region is meaningful; cells outside it
/// are always `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    width: usize,
    height: usize,
}

impl ShapeMatrix {
    /// Builds a matrix from rows of `0`/`1` values.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a constant) if the matrix is
    /// larger than [`MAX_SHAPE_SIZE`] or empty.
    #[must_use]
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            cells,
            width: W,
            height: H,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the cell at column `x`, row `y` is occupied.
    ///
    /// Positions outside the matrix are reported as empty.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y][x]
    }

    /// Iterates over occupied `(x, y)` offsets, row by row.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells[..self.height]
            .iter()
            .enumerate()
            .flat_map(move |(y, row)| {
                row[..self.width]
                    .iter()
                    .enumerate()
                    .filter(|(_, occupied)| **occupied)
                    .map(move |(x, _)| (x, y))
            })
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied_offsets().count()
    }

    /// Rotates the matrix a quarter turn counter-clockwise.
    ///
    /// The result has swapped dimensions and
    /// `new[i][j] = old[j][width - 1 - i]`.
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// let t = ShapeKind::T.definition().matrix();
    /// assert_eq!(t.to_string(), "###\n.#.\n");
    /// assert_eq!(t.rotated().to_string(), "#.\n##\n#.\n");
    /// ```
    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, row) in cells.iter_mut().enumerate().take(self.width) {
            for (j, cell) in row.iter_mut().enumerate().take(self.height) {
                *cell = self.cells[j][self.width - 1 - i];
            }
        }
        Self {
            cells,
            width: self.height,
            height: self.width,
        }
    }
}

impl fmt::Display for ShapeMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells[..self.height] {
            for &occupied in &row[..self.width] {
                f.write_str(if occupied { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Catalog entry: spawn orientation and color of one shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDefinition {
    kind: ShapeKind,
    matrix: ShapeMatrix,
    color: Color,
}

impl ShapeDefinition {
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub const fn matrix(&self) -> ShapeMatrix {
        self.matrix
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }
}

// Indexed by `ShapeKind as usize`.
static SHAPES: [ShapeDefinition; ShapeKind::ALL.len()] = [
    ShapeDefinition {
        kind: ShapeKind::I,
        matrix: ShapeMatrix::from_rows([[1, 1, 1, 1]]),
        color: Color::rgb(0, 0, 255),
    },
    ShapeDefinition {
        kind: ShapeKind::T,
        matrix: ShapeMatrix::from_rows([[1, 1, 1], [0, 1, 0]]),
        color: Color::rgb(255, 0, 255),
    },
    ShapeDefinition {
        kind: ShapeKind::O,
        matrix: ShapeMatrix::from_rows([[1, 1], [1, 1]]),
        color: Color::rgb(255, 255, 0),
    },
    ShapeDefinition {
        kind: ShapeKind::L,
        matrix: ShapeMatrix::from_rows([[0, 0, 1], [1, 1, 1]]),
        color: Color::rgb(255, 128, 0),
    },
    ShapeDefinition {
        kind: ShapeKind::J,
        matrix: ShapeMatrix::from_rows([[1, 0, 0], [1, 1, 1]]),
        color: Color::rgb(0, 255, 255),
    },
    ShapeDefinition {
        kind: ShapeKind::Z,
        matrix: ShapeMatrix::from_rows([[1, 1, 0], [0, 1, 1]]),
        color: Color::rgb(0, 255, 0),
    },
    ShapeDefinition {
        kind: ShapeKind::S,
        matrix: ShapeMatrix::from_rows([[0, 1, 1], [1, 1, 0]]),
        color: Color::rgb(128, 64, 192),
    },
    ShapeDefinition {
        kind: ShapeKind::Single,
        matrix: ShapeMatrix::from_rows([[1]]),
        color: Color::rgb(192, 192, 192),
    },
];

/// Enum representing the kind of a shape.
///
/// The seven tetrominoes are the canonical kinds drawn during play.
/// [`ShapeKind::Single`] is the one-cell fallback used for unrecognized
/// identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    I = 0,
    T = 1,
    O = 2,
    L = 3,
    J = 4,
    Z = 5,
    S = 6,
    /// Single-cell fallback shape.
    Single = 7,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::CANONICAL[rng.random_range(0..ShapeKind::CANONICAL.len())]
    }
}

impl From<char> for ShapeKind {
    /// Maps a shape letter to its kind, falling back to [`ShapeKind::Single`].
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from('L'), ShapeKind::L);
    /// assert_eq!(ShapeKind::from('x'), ShapeKind::Single);
    /// ```
    fn from(ch: char) -> Self {
        match ch.to_ascii_uppercase() {
            'I' => ShapeKind::I,
            'T' => ShapeKind::T,
            'O' => ShapeKind::O,
            'L' => ShapeKind::L,
            'J' => ShapeKind::J,
            'Z' => ShapeKind::Z,
            'S' => ShapeKind::S,
            _ => ShapeKind::Single,
        }
    }
}

impl ShapeKind {
    /// The seven kinds drawn during play.
    pub const CANONICAL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::O,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::Z,
        ShapeKind::S,
    ];

    /// Every kind in the catalog, fallback included.
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::O,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::Z,
        ShapeKind::S,
        ShapeKind::Single,
    ];

    /// Looks up the catalog entry for this kind.
    #[must_use]
    pub fn definition(self) -> &'static ShapeDefinition {
        &SHAPES[self as usize]
    }

    #[must_use]
    pub fn color(self) -> Color {
        self.definition().color
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::T => 'T',
            ShapeKind::O => 'O',
            ShapeKind::L => 'L',
            ShapeKind::J => 'J',
            ShapeKind::Z => 'Z',
            ShapeKind::S => 'S',
            ShapeKind::Single => '*',
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_catalog_is_indexed_by_kind() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.definition().kind(), kind);
        }
    }

    #[test]
    fn test_occupied_counts() {
        for kind in ShapeKind::CANONICAL {
            assert_eq!(
                kind.definition().matrix().occupied_count(),
                4,
                "{kind:?} should have 4 cells"
            );
        }
        assert_eq!(ShapeKind::Single.definition().matrix().occupied_count(), 1);
    }

    #[test]
    fn test_spawn_matrices() {
        let cases = [
            (ShapeKind::I, "####\n"),
            (ShapeKind::T, "###\n.#.\n"),
            (ShapeKind::O, "##\n##\n"),
            (ShapeKind::L, "..#\n###\n"),
            (ShapeKind::J, "#..\n###\n"),
            (ShapeKind::Z, "##.\n.##\n"),
            (ShapeKind::S, ".##\n##.\n"),
            (ShapeKind::Single, "#\n"),
        ];
        for (kind, expected) in cases {
            assert_eq!(kind.definition().matrix().to_string(), expected, "{kind:?}");
        }
    }

    #[test]
    fn test_colors() {
        assert_eq!(ShapeKind::O.color(), Color::rgb(255, 255, 0));
        assert_eq!(ShapeKind::I.color(), Color::rgb(0, 0, 255));
        assert_eq!(ShapeKind::S.color(), Color::rgb(128, 64, 192));
        assert_eq!(ShapeKind::Single.color(), Color::rgb(192, 192, 192));
    }

    #[test]
    fn test_unknown_char_falls_back_to_single() {
        for ch in ['?', 'x', '1', ' '] {
            assert_eq!(ShapeKind::from(ch), ShapeKind::Single);
        }
        for kind in ShapeKind::CANONICAL {
            assert_eq!(ShapeKind::from(kind.as_char()), kind);
        }
    }

    #[test]
    fn test_rotation_preserves_occupied_count() {
        for kind in ShapeKind::ALL {
            let mut matrix = kind.definition().matrix();
            let count = matrix.occupied_count();
            for _ in 0..4 {
                matrix = matrix.rotated();
                assert_eq!(matrix.occupied_count(), count, "{kind:?}");
            }
        }
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in ShapeKind::ALL {
            let matrix = kind.definition().matrix();
            let rotated = matrix.rotated().rotated().rotated().rotated();
            assert_eq!(rotated, matrix, "{kind:?}");
        }
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let i = ShapeKind::I.definition().matrix();
        let rotated = i.rotated();
        assert_eq!((rotated.width(), rotated.height()), (1, 4));
        assert_eq!(rotated.to_string(), "#\n#\n#\n#\n");
    }

    #[test]
    fn test_random_kinds_are_canonical() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let kind: ShapeKind = rng.random();
            assert_ne!(kind, ShapeKind::Single);
            seen[kind as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "all canonical kinds should appear");
    }
}
