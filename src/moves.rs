mod convert;
mod ordering;

use std::fmt;

use shakmaty::{CastlingSide, Role, Square};
use thiserror::Error;

use crate::occupant::Occupant;

pub use ordering::sort_best_first;

/// `castle_type()` value of a king-side castle
pub const KINGSIDE_CASTLE: u8 = 1;
/// `castle_type()` value of a queen-side castle
pub const QUEENSIDE_CASTLE: u8 = 2;

const PROMOTION_BIT: u8 = 0b1000;
const CAPTURE_BIT: u8 = 0b0100;
const SPECIAL_BITS: u8 = 0b0011;

/// Lowercase piece letters indexed by [`Role`] discriminant (pawn = 1).
const PIECE_LETTERS: [char; 7] = ['.', 'p', 'n', 'b', 'r', 'q', 'k'];

/// Error when a move is requested with arguments the encoding cannot hold.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    /// A castle cannot also be a promotion
    #[error("a move cannot be both a promotion and a castle")]
    PromotionWithCastle,
    /// A castle never captures
    #[error("a castling move cannot be a capture")]
    CastleWithCapture,
    /// Pawns only promote to knight, bishop, rook or queen
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(Role),
    /// The source square holds no piece
    #[error("no piece on source square {0}")]
    EmptySource(Square),
    /// Drops have no source square to encode
    #[error("piece drop to {0} has no source square")]
    PieceDrop(Square),
    /// Only corner rooks can be restored from a castle side
    #[error("castling rook on {0} is not on a corner square")]
    NonStandardCastle(Square),
    /// A capture needs a piece on the destination to rebuild it
    #[error("capture onto empty square {0}")]
    EmptyCapture(Square),
}

/// What kind of move this is, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Any move without a special meaning, capturing or not
    Normal,
    /// A pawn's initial two-square advance
    DoublePush,
    /// A pawn capture landing on the empty square behind a double-pushed pawn
    EnPassant,
    /// King and rook repositioning on the given side
    Castle(CastlingSide),
    /// A pawn promoting to the given role
    Promotion(Role),
}

impl MoveKind {
    /// Kind requested by the caller, before pawn geometry is consulted.
    fn requested(promotion: Option<Role>, castle: Option<CastlingSide>) -> Self {
        match (castle, promotion) {
            (Some(side), _) => MoveKind::Castle(side),
            (None, Some(role)) => MoveKind::Promotion(role),
            (None, None) => MoveKind::Normal,
        }
    }
}

/// A single pseudo-legal move.
///
/// Every classification query answers from the kind and capture flag decided
/// in [`Move::new`]; the source and destination are never re-inspected.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    src: Occupant,
    dest: Occupant,
    score: i32,
    kind: MoveKind,
    capture: bool,
}

impl Move {
    /// Create a non-capturing move, optionally a castle.
    ///
    /// Pawn geometry still applies: a pawn moving two ranks becomes a double
    /// push and a pawn moving diagonally onto an empty square becomes an en
    /// passant capture.
    pub fn quiet(src: Occupant, dest: Occupant, score: i32, castle: Option<CastlingSide>) -> Self {
        let requested = MoveKind::requested(None, castle);
        let (kind, capture) = Self::classify(&src, &dest, requested, false);
        Self {
            src,
            dest,
            score,
            kind,
            capture,
        }
    }

    /// Create a promotion and/or capture.
    ///
    /// A capture flag on a non-pawn move is taken as given; the destination
    /// should then hold the captured piece, otherwise
    /// [`to_shakmaty`](Move::to_shakmaty) refuses to rebuild it.
    pub fn tactical(
        src: Occupant,
        dest: Occupant,
        promotion: Option<Role>,
        score: i32,
        capture: bool,
    ) -> Result<Self, MoveError> {
        Self::new(src, dest, score, promotion, capture, None)
    }

    /// Create a move from every argument the encoding knows about.
    ///
    /// Arguments are applied in a fixed order, later steps winning:
    /// 1. capture, castle side and promotion piece as given,
    /// 2. a pawn moving exactly two ranks is a double push (never a capture),
    /// 3. a pawn changing file onto an empty square is an en passant capture.
    ///
    /// # Errors
    ///
    /// Fails when promotion and castle are both given, when a castle is
    /// flagged as a capture, or when the promotion role is a pawn or king.
    pub fn new(
        src: Occupant,
        dest: Occupant,
        score: i32,
        promotion: Option<Role>,
        capture: bool,
        castle: Option<CastlingSide>,
    ) -> Result<Self, MoveError> {
        if promotion.is_some() && castle.is_some() {
            return Err(MoveError::PromotionWithCastle);
        }
        if castle.is_some() && capture {
            return Err(MoveError::CastleWithCapture);
        }
        if let Some(role) = promotion
            && matches!(role, Role::Pawn | Role::King)
        {
            return Err(MoveError::InvalidPromotion(role));
        }

        let requested = MoveKind::requested(promotion, castle);
        let (kind, capture) = Self::classify(&src, &dest, requested, capture);
        Ok(Self {
            src,
            dest,
            score,
            kind,
            capture,
        })
    }

    /// Apply the pawn geometry overrides on top of the requested kind.
    fn classify(
        src: &Occupant,
        dest: &Occupant,
        requested: MoveKind,
        capture: bool,
    ) -> (MoveKind, bool) {
        let mut decided = (requested, capture);

        if src.is_pawn() && (src.rank() as i32 - dest.rank() as i32).abs() == 2 {
            decided = (MoveKind::DoublePush, false);
        }

        if src.is_pawn() && dest.is_empty() && src.file() != dest.file() {
            decided = (MoveKind::EnPassant, true);
        }

        let discarded = requested != MoveKind::Normal || (capture && !decided.1);
        if decided.0 != requested && discarded {
            log::debug!(
                "{}{}: pawn geometry overrides requested {:?} (capture: {}) with {:?}",
                src,
                dest,
                requested,
                capture,
                decided.0
            );
        }

        decided
    }

    /// Origin square and the moving piece
    #[inline]
    pub const fn src(&self) -> Occupant {
        self.src
    }

    /// Destination square and the piece captured there, if any
    #[inline]
    pub const fn dest(&self) -> Occupant {
        self.dest
    }

    /// Externally assigned ranking value; only used for ordering
    #[inline]
    pub const fn score(&self) -> i32 {
        self.score
    }

    /// Classification decided at construction
    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Check if this is a pawn's two-square advance
    #[inline]
    pub fn is_double_push(&self) -> bool {
        self.kind == MoveKind::DoublePush
    }

    /// Check if this is an en passant capture
    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    /// True for normal captures, capturing promotions and en passant
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.capture
    }

    /// Check if this is a castle on either side
    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle(_))
    }

    /// Side of the castle, if this is one
    #[inline]
    pub const fn castle_side(&self) -> Option<CastlingSide> {
        match self.kind {
            MoveKind::Castle(side) => Some(side),
            _ => None,
        }
    }

    /// Numeric castle kind: 0 if not a castle, otherwise [`KINGSIDE_CASTLE`]
    /// or [`QUEENSIDE_CASTLE`].
    #[inline]
    pub const fn castle_type(&self) -> u8 {
        match self.castle_side() {
            None => 0,
            Some(CastlingSide::KingSide) => KINGSIDE_CASTLE,
            Some(CastlingSide::QueenSide) => QUEENSIDE_CASTLE,
        }
    }

    /// Check if a pawn promotes with this move
    #[inline]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion(_))
    }

    /// Role the pawn promotes to, if this is a promotion
    #[inline]
    pub const fn promotion_piece(&self) -> Option<Role> {
        match self.kind {
            MoveKind::Promotion(role) => Some(role),
            _ => None,
        }
    }

    /// Packed 4-bit classification code.
    ///
    /// ```text
    /// bit  3:   promotion
    /// bit  2:   capture
    /// bits 0-1: 00 normal, 01 double push, 10 king-side castle,
    ///           11 queen-side castle (en passant with bit 2 set),
    ///           promotion piece - 1 when bit 3 is set (knight = 1 .. queen = 4)
    /// ```
    pub fn flags(&self) -> u8 {
        let capture = if self.capture { CAPTURE_BIT } else { 0 };
        match self.kind {
            MoveKind::Normal => capture,
            MoveKind::DoublePush => 0b0001,
            MoveKind::EnPassant => 0b0101,
            MoveKind::Castle(CastlingSide::KingSide) => 0b0010,
            MoveKind::Castle(CastlingSide::QueenSide) => 0b0011,
            MoveKind::Promotion(role) => {
                // Knight is the lowest promotion role and encodes as 0.
                let special = (role as u8).wrapping_sub(Role::Knight as u8) & SPECIAL_BITS;
                PROMOTION_BIT | capture | special
            }
        }
    }
}

/// Display in coordinate notation (e.g., "e2e4", "a7a8q").
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.src, self.dest)?;
        if let Some(role) = self.promotion_piece() {
            write!(f, "{}", PIECE_LETTERS[role as usize])?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Move")
            .field("src", &format_args!("{}", self.src))
            .field("dest", &format_args!("{}", self.dest))
            .field("score", &self.score)
            .field("kind", &self.kind)
            .field("capture", &self.capture)
            .field("flags", &format_args!("{:#06b}", self.flags()))
            .finish()
    }
}
