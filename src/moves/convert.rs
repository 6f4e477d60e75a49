//! Conversion between [`Move`] and moves generated by `shakmaty`.

use shakmaty::{Board, CastlingSide, File, Rank, Square};

use super::{Move, MoveError, MoveKind};
use crate::occupant::Occupant;

impl Move {
    /// Encode a generated move, reading both occupants from the board it is
    /// played on.
    ///
    /// Castles are stored as the king's own source and destination squares.
    /// Only the castle side survives, so castles with a rook off the corner
    /// of the king's rank (Chess960) are rejected.
    pub fn from_shakmaty(
        board: &Board,
        mv: &shakmaty::Move,
        score: i32,
    ) -> Result<Self, MoveError> {
        let encoded = match *mv {
            shakmaty::Move::Put { to, .. } => return Err(MoveError::PieceDrop(to)),
            shakmaty::Move::Castle { king, rook } => {
                let side = CastlingSide::from_king_side(king.file() < rook.file());
                if rook != corner_rook(side, king.rank()) {
                    return Err(MoveError::NonStandardCastle(rook));
                }
                let to = Square::from_coords(side.king_to_file(), king.rank());
                Move::quiet(
                    Occupant::on(board, king),
                    Occupant::on(board, to),
                    score,
                    Some(side),
                )
            }
            shakmaty::Move::Normal { from, to, .. } | shakmaty::Move::EnPassant { from, to } => {
                Move::tactical(
                    Occupant::on(board, from),
                    Occupant::on(board, to),
                    mv.promotion(),
                    score,
                    mv.is_capture(),
                )?
            }
        };

        log::trace!("encoded {} as {:?}", encoded, encoded);
        Ok(encoded)
    }

    /// Rebuild the `shakmaty` move for playing this move on a position.
    ///
    /// Castling rooks are taken from the corner of the king's rank.
    pub fn to_shakmaty(&self) -> Result<shakmaty::Move, MoveError> {
        let from = self.src.square();
        let to = self.dest.square();
        let role = self.src.role().ok_or(MoveError::EmptySource(from))?;

        Ok(match self.kind {
            MoveKind::EnPassant => shakmaty::Move::EnPassant { from, to },
            MoveKind::Castle(side) => shakmaty::Move::Castle {
                king: from,
                rook: corner_rook(side, from.rank()),
            },
            MoveKind::Normal | MoveKind::DoublePush | MoveKind::Promotion(_) => {
                let capture = if self.capture {
                    Some(self.dest.role().ok_or(MoveError::EmptyCapture(to))?)
                } else {
                    None
                };
                shakmaty::Move::Normal {
                    role,
                    from,
                    capture,
                    to,
                    promotion: self.promotion_piece(),
                }
            }
        })
    }
}

/// Standard-chess rook square for castling on `side` along `rank`.
fn corner_rook(side: CastlingSide, rank: Rank) -> Square {
    let file = match side {
        CastlingSide::KingSide => File::H,
        CastlingSide::QueenSide => File::A,
    };
    Square::from_coords(file, rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{CastlingMode, Chess, Position, Role, fen::Fen};

    fn position(fen: &str) -> Chess {
        fen.parse::<Fen>()
            .expect("invalid FEN")
            .into_position(CastlingMode::Standard)
            .expect("invalid position")
    }

    fn find(pos: &Chess, uci: &str) -> shakmaty::Move {
        pos.legal_moves()
            .into_iter()
            .find(|mv| {
                let encoded = Move::from_shakmaty(pos.board(), mv, 0).expect("encodable move");
                encoded.to_string() == uci
            })
            .unwrap_or_else(|| panic!("no legal move {uci}"))
    }

    #[test]
    fn test_double_push_from_start() {
        let pos = Chess::default();
        let mv = find(&pos, "e2e4");

        let encoded = Move::from_shakmaty(pos.board(), &mv, 7).unwrap();

        assert!(encoded.is_double_push());
        assert_eq!(encoded.score(), 7);
        assert_eq!(encoded.to_shakmaty(), Ok(mv));
    }

    #[test]
    fn test_en_passant_round_trip() {
        let pos = position("rnbqkbnr/1pp1pppp/p7/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1");
        let mv = find(&pos, "e5d6");

        let encoded = Move::from_shakmaty(pos.board(), &mv, 0).unwrap();

        assert!(encoded.is_en_passant());
        assert!(encoded.is_capture());
        assert_eq!(encoded.to_shakmaty(), Ok(mv));
    }

    #[test]
    fn test_castle_uses_king_destination() {
        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let mv = shakmaty::Move::Castle {
            king: Square::E1,
            rook: Square::A1,
        };
        assert!(pos.legal_moves().contains(&mv));

        let encoded = Move::from_shakmaty(pos.board(), &mv, 0).unwrap();

        assert_eq!(encoded.castle_side(), Some(CastlingSide::QueenSide));
        assert_eq!(encoded.dest().square(), Square::C1);
        assert_eq!(encoded.to_string(), "e1c1");
        assert_eq!(encoded.to_shakmaty(), Ok(mv));
    }

    #[test]
    fn test_chess960_castle_rejected() {
        let pos: Chess = "4k3/8/8/8/8/8/8/1R2K1R1 w GB - 0 1"
            .parse::<Fen>()
            .expect("invalid FEN")
            .into_position(CastlingMode::Chess960)
            .expect("invalid position");
        let mv = shakmaty::Move::Castle {
            king: Square::E1,
            rook: Square::G1,
        };
        assert!(pos.legal_moves().contains(&mv));

        assert_eq!(
            Move::from_shakmaty(pos.board(), &mv, 0),
            Err(MoveError::NonStandardCastle(Square::G1))
        );
    }

    #[test]
    fn test_capturing_promotion_round_trip() {
        let pos = position("r7/1P4k1/8/8/8/8/6K1/8 w - - 0 1");
        let mv = find(&pos, "b7a8q");

        let encoded = Move::from_shakmaty(pos.board(), &mv, 0).unwrap();

        assert_eq!(encoded.promotion_piece(), Some(Role::Queen));
        assert!(encoded.is_capture());
        assert_eq!(encoded.to_shakmaty(), Ok(mv));
    }

    #[test]
    fn test_piece_drop_rejected() {
        let mv = shakmaty::Move::Put {
            role: Role::Knight,
            to: Square::E4,
        };
        assert_eq!(
            Move::from_shakmaty(Chess::default().board(), &mv, 0),
            Err(MoveError::PieceDrop(Square::E4))
        );
    }

    #[test]
    fn test_capture_onto_empty_square_rejected() {
        let white_rook = Some(shakmaty::Piece {
            color: shakmaty::Color::White,
            role: Role::Rook,
        });
        let mv = Move::tactical(
            Occupant::new(Square::A1, white_rook),
            Occupant::empty(Square::A5),
            None,
            0,
            true,
        )
        .unwrap();

        assert!(mv.is_capture());
        assert_eq!(mv.to_shakmaty(), Err(MoveError::EmptyCapture(Square::A5)));
    }

    #[test]
    fn test_empty_source_rejected() {
        let mv = Move::quiet(
            Occupant::empty(Square::D4),
            Occupant::empty(Square::D5),
            0,
            None,
        );
        assert_eq!(mv.to_shakmaty(), Err(MoveError::EmptySource(Square::D4)));
    }
}
