use std::fmt;

use shakmaty::{Board, File, Piece, Rank, Role, Square};

/// A board square together with the piece standing on it.
///
/// Occupants are snapshots taken before a move is applied: the source holds
/// the moving piece, the destination holds whatever is about to be captured
/// (or nothing). They never refer back to mutable board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    square: Square,
    piece: Option<Piece>,
}

impl Occupant {
    /// Creates an occupant from a square and its piece, if any.
    #[inline]
    pub const fn new(square: Square, piece: Option<Piece>) -> Self {
        Self { square, piece }
    }

    /// An occupant for a square with no piece on it.
    #[inline]
    pub const fn empty(square: Square) -> Self {
        Self::new(square, None)
    }

    /// Read the occupant of `square` from a board.
    #[inline]
    pub fn on(board: &Board, square: Square) -> Self {
        Self::new(square, board.piece_at(square))
    }

    /// Returns the square.
    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Returns the piece on the square, if any.
    #[inline]
    pub const fn piece(&self) -> Option<Piece> {
        self.piece
    }

    /// Role of the piece on this square, if any
    #[inline]
    pub fn role(&self) -> Option<Role> {
        self.piece.map(|piece| piece.role)
    }

    /// Check if no piece stands on the square
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    /// Check if a pawn of either color stands on the square
    #[inline]
    pub fn is_pawn(&self) -> bool {
        self.role() == Some(Role::Pawn)
    }

    /// Returns the file (a-h) of the square.
    #[inline]
    pub fn file(&self) -> File {
        self.square.file()
    }

    /// Returns the rank (1-8) of the square.
    #[inline]
    pub fn rank(&self) -> Rank {
        self.square.rank()
    }
}

/// Display the square label in algebraic notation (e.g., "e2").
impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.square)
    }
}
