use crate::{
    PieceCollisionError,
    core::{
        board::Board,
        piece::{Piece, RotationDirection},
        shape::ShapeKind,
    },
};

use super::piece_generator::{PieceGenerator, PieceSeed};

/// Board plus the active piece and the pre-generated next piece.
///
/// Every mutation goes through the board's collision tests, so the active
/// piece never overlaps a filled cell or leaves the board, except right after
/// a spawn that tops out (see [`GameField::spawn_next`]).
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    active_piece: Piece,
    next_kind: ShapeKind,
    generator: PieceGenerator,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::from_generator(Board::EMPTY, PieceGenerator::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_generator(Board::EMPTY, PieceGenerator::with_seed(seed))
    }

    /// Starts from a prepared board, e.g. one built with [`Board::from_ascii`].
    #[must_use]
    pub fn with_board(board: Board, seed: PieceSeed) -> Self {
        Self::from_generator(board, PieceGenerator::with_seed(seed))
    }

    fn from_generator(board: Board, mut generator: PieceGenerator) -> Self {
        let active_piece = Piece::new(generator.next_kind());
        let next_kind = generator.next_kind();
        Self {
            board,
            active_piece,
            next_kind,
            generator,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> Piece {
        self.active_piece
    }

    #[must_use]
    pub fn next_kind(&self) -> ShapeKind {
        self.next_kind
    }

    /// The next piece as it will appear when spawned.
    #[must_use]
    pub fn next_piece(&self) -> Piece {
        Piece::new(self.next_kind)
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    /// Replaces the active piece if it fits on the board.
    pub fn set_active_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.board.is_colliding(&piece) {
            return Err(PieceCollisionError);
        }
        self.active_piece = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        if !self.board.can_move_left(&self.active_piece) {
            return Err(PieceCollisionError);
        }
        self.active_piece = self.active_piece.left().ok_or(PieceCollisionError)?;
        Ok(())
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        if !self.board.can_move_right(&self.active_piece) {
            return Err(PieceCollisionError);
        }
        self.active_piece = self.active_piece.right();
        Ok(())
    }

    pub fn try_move_down(&mut self) -> Result<(), PieceCollisionError> {
        if !self.board.can_fall(&self.active_piece) {
            return Err(PieceCollisionError);
        }
        self.active_piece = self.active_piece.down();
        Ok(())
    }

    pub fn try_rotate(&mut self, direction: RotationDirection) -> Result<(), PieceCollisionError> {
        if !self.board.can_rotate(&self.active_piece, direction) {
            return Err(PieceCollisionError);
        }
        self.active_piece = self.active_piece.rotated_towards(direction);
        Ok(())
    }

    /// Merges the active piece into the board.
    ///
    /// The active piece stays in place until [`Self::spawn_next`] is called.
    pub fn place_active_piece(&mut self) {
        self.board.place(&self.active_piece);
    }

    /// Clears full rows and returns how many were cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        self.board.clear_full_rows()
    }

    /// Promotes the next piece to active and draws a fresh next piece.
    ///
    /// Returns an error if the new active piece overlaps filled cells; the
    /// piece is promoted anyway so it can still be shown.
    pub fn spawn_next(&mut self) -> Result<(), PieceCollisionError> {
        self.active_piece = Piece::new(self.next_kind);
        self.next_kind = self.generator.next_kind();
        if self.board.is_colliding(&self.active_piece) {
            return Err(PieceCollisionError);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> PieceSeed {
        PieceSeed::from_bytes([7; 16])
    }

    #[test]
    fn test_spawn_promotes_next_piece() {
        let mut field = GameField::with_seed(seed());
        let next = field.next_kind();
        field.spawn_next().unwrap();
        assert_eq!(field.active_piece(), Piece::new(next));
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let mut a = GameField::with_seed(seed());
        let mut b = GameField::with_seed(seed());
        for _ in 0..10 {
            assert_eq!(a.active_piece(), b.active_piece());
            assert_eq!(a.next_kind(), b.next_kind());
            a.spawn_next().unwrap();
            b.spawn_next().unwrap();
        }
    }

    #[test]
    fn test_moves_are_gated_by_board() {
        let mut field = GameField::with_seed(seed());
        field.set_active_piece(Piece::at(ShapeKind::O, 0, 0)).unwrap();
        assert!(field.try_move_left().is_err());
        assert_eq!(field.active_piece().x(), 0);
        field.try_move_right().unwrap();
        assert_eq!(field.active_piece().x(), 1);
        while field.try_move_down().is_ok() {}
        assert_eq!(field.active_piece().y(), Board::HEIGHT - 2);
    }

    #[test]
    fn test_set_active_piece_rejects_collision() {
        let board = Board::from_ascii(
            "
            ##########
            ",
        );
        let mut field = GameField::with_board(board, seed());
        let result = field.set_active_piece(Piece::at(ShapeKind::I, 0, Board::HEIGHT - 1));
        assert!(result.is_err());
    }

    #[test]
    fn test_lock_clears_completed_row() {
        let board = Board::from_ascii(
            "
            ######....
            ",
        );
        let mut field = GameField::with_board(board, seed());
        field
            .set_active_piece(Piece::at(ShapeKind::I, 6, Board::HEIGHT - 1))
            .unwrap();
        field.place_active_piece();
        assert_eq!(field.clear_full_rows(), 1);
        assert!(field.board().rows().flatten().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_spawn_into_filled_cells_reports_collision() {
        let mut board = Board::EMPTY;
        for x in 0..Board::WIDTH {
            board.place(&Piece::at(ShapeKind::Single, x, 0));
            board.place(&Piece::at(ShapeKind::Single, x, 1));
        }
        let mut field = GameField::with_board(board, seed());
        assert!(field.spawn_next().is_err());
    }
}
