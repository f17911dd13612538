use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{board::Board, error::InvalidByte, movement, player::Player, square::Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const PROMOTION_CHOICES: [Self; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
    pub fn lowercase(self) -> char {
        self.uppercase().to_ascii_lowercase()
    }
    pub fn from_fen(c: char) -> Result<Self, InvalidFenPiece> {
        let piece = match c {
            'p' | 'P' => PieceKind::Pawn,
            'n' | 'N' => PieceKind::Knight,
            'b' | 'B' => PieceKind::Bishop,
            'r' | 'R' => PieceKind::Rook,
            'q' | 'Q' => PieceKind::Queen,
            'k' | 'K' => PieceKind::King,
            c => return Err(InvalidFenPiece(c)),
        };
        Ok(piece)
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}
impl TryFrom<u8> for PieceKind {
    type Error = InvalidByte;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let piece = match value {
            1 => PieceKind::Pawn,
            2 => PieceKind::Knight,
            3 => PieceKind::Bishop,
            4 => PieceKind::Rook,
            5 => PieceKind::Queen,
            6 => PieceKind::King,
            _ => return Err(InvalidByte(value)),
        };
        Ok(piece)
    }
}

/// A piece standing on the board.
///
/// The cell holding it owns it; moving the piece rewrites `square` and
/// `has_moved` on the same value rather than creating a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub player: Player,
    pub square: Square,
    pub has_moved: bool,
}
impl Piece {
    pub fn new(kind: PieceKind, player: Player, square: Square) -> Self {
        Piece {
            kind,
            player,
            square,
            has_moved: false,
        }
    }
    pub fn is_player(self, player: Player) -> bool {
        self.player == player
    }
    /// Key of the sprite a front end draws for this piece, e.g. `white_king`.
    pub fn name(self) -> String {
        format!("{}_{}", self.player, self.kind)
    }
    pub fn fen(self) -> char {
        match self.player {
            Player::White => self.kind.uppercase(),
            Player::Black => self.kind.lowercase(),
        }
    }
    pub fn figurine(self) -> char {
        match (self.player, self.kind) {
            (Player::White, PieceKind::Pawn) => '♙',
            (Player::White, PieceKind::Knight) => '♘',
            (Player::White, PieceKind::Bishop) => '♗',
            (Player::White, PieceKind::Rook) => '♖',
            (Player::White, PieceKind::Queen) => '♕',
            (Player::White, PieceKind::King) => '♔',
            (Player::Black, PieceKind::Pawn) => '♟',
            (Player::Black, PieceKind::Knight) => '♞',
            (Player::Black, PieceKind::Bishop) => '♝',
            (Player::Black, PieceKind::Rook) => '♜',
            (Player::Black, PieceKind::Queen) => '♛',
            (Player::Black, PieceKind::King) => '♚',
        }
    }
    /// Pseudo-legal destinations: what the piece's movement rule reaches on
    /// the current occupancy, without regard to the safety of its own king.
    pub fn valid_piece_moves(self, board: &Board) -> Vec<Square> {
        match self.kind {
            PieceKind::Pawn => movement::pawn_moves(self, board),
            PieceKind::Knight => movement::knight_moves(self, board),
            PieceKind::Bishop => movement::bishop_moves(self, board),
            PieceKind::Rook => movement::rook_moves(self, board),
            PieceKind::Queen => movement::queen_moves(self, board),
            PieceKind::King => movement::king_moves(self, board),
        }
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.player, self.kind, self.square)?;
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidFenPiece(pub char);
impl Display for InvalidFenPiece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found `{}`, expected one of `p`, `n`, `b`, `r`, `k`, `q`, or uppercase forms of these letters",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidFenPiece {}

#[cfg(test)]
mod test {
    use crate::{
        piece::{Piece, PieceKind},
        player::Player,
        square::Square,
    };

    #[test]
    fn asset_name() {
        let piece = Piece::new(PieceKind::King, Player::White, Square::new(0, 4));
        assert_eq!(piece.name(), "white_king");
        assert_eq!(piece.fen(), 'K');
        assert_eq!(
            Piece::new(PieceKind::Knight, Player::Black, Square::new(7, 1)).fen(),
            'n'
        );
    }
    #[test]
    fn fen_letters() {
        for kind in [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ] {
            assert_eq!(PieceKind::from_fen(kind.uppercase()), Ok(kind));
            assert_eq!(PieceKind::from_fen(kind.lowercase()), Ok(kind));
            assert_eq!(PieceKind::try_from(kind as u8), Ok(kind));
        }
        assert!(PieceKind::from_fen('x').is_err());
    }
}
