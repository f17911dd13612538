use std::fmt::{self, Display, Formatter};

use crate::{
    castling::CastlingRights,
    piece::{Piece, PieceKind},
    square::Square,
};

/// Everything needed to take a move back exactly.
///
/// Piece snapshots are taken before the move, so they carry the prior
/// `square` and `has_moved` of whatever was touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub piece: Piece,
    pub destination: Square,
    /// Its `square` differs from `destination` for en passant.
    pub captured: Option<Piece>,
    pub castling_rook: Option<(Piece, Square)>,
    pub promotion: Option<PieceKind>,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
}
impl MoveRecord {
    pub fn origin(&self) -> Square {
        self.piece.square
    }
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
    pub fn is_castling(&self) -> bool {
        self.castling_rook.is_some()
    }
}
impl Display for MoveRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin(), self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.lowercase())?;
        }
        Ok(())
    }
}
