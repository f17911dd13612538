use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    board::{Board, InvalidBoard},
    castling::{CastlingRights, InvalidCastlingCharacter},
    piece::{InvalidFenPiece, PieceKind},
    player::{ParsePlayerError, Player},
    square::{Offset, ParseSquareError, Square},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseFenError {
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    ExceedingRows,
    UnexpectedEol,
    InvalidFenPiece(InvalidFenPiece),
    ParsePlayerError(ParsePlayerError),
    InvalidCastlingCharacter(InvalidCastlingCharacter),
    ParseSquareError(ParseSquareError),
    InvalidBoard(InvalidBoard),
    Unexpected(char),
}
impl From<InvalidFenPiece> for ParseFenError {
    fn from(value: InvalidFenPiece) -> Self {
        ParseFenError::InvalidFenPiece(value)
    }
}
impl From<ParsePlayerError> for ParseFenError {
    fn from(value: ParsePlayerError) -> Self {
        ParseFenError::ParsePlayerError(value)
    }
}
impl From<InvalidCastlingCharacter> for ParseFenError {
    fn from(value: InvalidCastlingCharacter) -> Self {
        ParseFenError::InvalidCastlingCharacter(value)
    }
}
impl From<ParseSquareError> for ParseFenError {
    fn from(value: ParseSquareError) -> Self {
        ParseFenError::ParseSquareError(value)
    }
}
impl From<InvalidBoard> for ParseFenError {
    fn from(value: InvalidBoard) -> Self {
        ParseFenError::InvalidBoard(value)
    }
}
impl Display for ParseFenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::NotEnoughSquaresOnRow => write!(f, "not enough squares on a row")?,
            ParseFenError::ExceedingSquaresOnRow => write!(f, "exceeding squares on a row")?,
            ParseFenError::ExceedingRows => write!(f, "found more than 8 rows")?,
            ParseFenError::UnexpectedEol => write!(f, "unexpected end of input")?,
            ParseFenError::InvalidFenPiece(err) => write!(f, "{err}")?,
            ParseFenError::ParsePlayerError(err) => write!(f, "{err}")?,
            ParseFenError::InvalidCastlingCharacter(err) => write!(f, "{err}")?,
            ParseFenError::ParseSquareError(err) => write!(f, "{err}")?,
            ParseFenError::InvalidBoard(err) => write!(f, "{err}")?,
            ParseFenError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::InvalidFenPiece(err) => Some(err),
            ParseFenError::ParsePlayerError(err) => Some(err),
            ParseFenError::InvalidCastlingCharacter(err) => Some(err),
            ParseFenError::ParseSquareError(err) => Some(err),
            ParseFenError::InvalidBoard(err) => Some(err),
            _ => None,
        }
    }
}

/// A position in Forsyth–Edwards Notation. The clocks are accepted on input
/// and written as `0 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fen(pub Board);

fn parse_placement(placement: &str) -> Result<Vec<(Square, Player, PieceKind)>, ParseFenError> {
    let mut pieces = Vec::new();
    let mut rows = placement.split('/');
    for row in (0..8).rev() {
        let text = rows.next().ok_or(ParseFenError::UnexpectedEol)?;
        let mut col: u8 = 0;
        for c in text.chars() {
            if let Some(empty) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                col += u8::try_from(empty).map_err(|_| ParseFenError::Unexpected(c))?;
            } else {
                if col >= 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
                let kind = PieceKind::from_fen(c)?;
                let player = if c.is_ascii_uppercase() {
                    Player::White
                } else {
                    Player::Black
                };
                pieces.push((Square::new(row, col), player, kind));
                col += 1;
            }
            if col > 8 {
                return Err(ParseFenError::ExceedingSquaresOnRow);
            }
        }
        if col < 8 {
            return Err(ParseFenError::NotEnoughSquaresOnRow);
        }
    }
    if rows.next().is_some() {
        return Err(ParseFenError::ExceedingRows);
    }
    Ok(pieces)
}
impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let pieces = parse_placement(fields.next().ok_or(ParseFenError::UnexpectedEol)?)?;
        let current_player: Player = fields.next().ok_or(ParseFenError::UnexpectedEol)?.parse()?;
        let castling_rights: CastlingRights = fields.next().unwrap_or("-").parse()?;
        let en_passant = match fields.next().unwrap_or("-") {
            "-" => None,
            square => Some(square.parse()?),
        };
        // half-move and full-move clocks are not tracked
        Ok(Fen(Board::setup(
            pieces,
            current_player,
            castling_rights,
            en_passant,
        )?))
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let board = &self.0;
        for row in (0..8).rev() {
            let mut empty = 0;
            for col in 0..8 {
                match board[Square::new(row, col)] {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.fen())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if row > 0 {
                write!(f, "/")?;
            }
        }
        write!(f, " {}", board.current_player().lowercase())?;
        write!(f, " {}", board.castling_rights())?;
        // only written when a pawn can actually take en passant
        let capturable = board.en_passant().filter(|target| {
            let player = board.current_player();
            board.en_passant_capture(player, *target).is_some()
                && Offset::pawn_captures(!player)
                    .into_iter()
                    .filter_map(|offset| target.move_by(offset))
                    .any(|square| {
                        board[square].is_some_and(|piece| {
                            piece.is_player(player) && piece.kind == PieceKind::Pawn
                        })
                    })
        });
        match capturable {
            Some(square) => write!(f, " {square}")?,
            None => write!(f, " -")?,
        }
        write!(f, " 0 1")?;
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        fen::{Fen, ParseFenError},
        piece::PieceKind,
        player::Player,
        square::Square,
    };

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn starting_position() {
        let fen: Fen = START.parse().unwrap();
        assert_eq!(fen.0, Board::starting_position());
        assert_eq!(Fen(Board::starting_position()).to_string(), START);
    }
    #[test]
    fn orientation() {
        let fen: Fen = "4k3/8/8/8/8/8/8/R3K3 b Q - 0 1".parse().unwrap();
        let rook = fen.0[Square::new(0, 0)].unwrap();
        assert_eq!(rook.kind, PieceKind::Rook);
        assert_eq!(rook.player, Player::White);
        assert!(!rook.has_moved);
        assert_eq!(fen.0.current_player(), Player::Black);
        assert!(fen.0[Square::new(7, 4)].is_some());
    }
    #[test]
    fn unmoved_flags_follow_castling_rights() {
        let fen: Fen = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1".parse().unwrap();
        let board = fen.0;
        let has_moved = |square: &str| board[square.parse().unwrap()].unwrap().has_moved;
        assert!(!has_moved("e1"));
        assert!(!has_moved("h1"));
        assert!(has_moved("a1"));
        assert!(!has_moved("a8"));
        assert!(has_moved("h8"));
    }
    #[test]
    fn en_passant_is_kept_only_when_capturable() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
        assert_eq!(fen.parse::<Fen>().unwrap().to_string(), fen);
        let fen: Fen = "4k3/8/8/3p4/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        assert_eq!(fen.to_string(), "4k3/8/8/3p4/8/8/8/4K3 w - - 0 1");
    }
    #[test]
    fn trimmed_clocks() {
        assert!("4k3/8/8/8/8/8/8/4K3 w - -".parse::<Fen>().is_ok());
        assert!("4k3/8/8/8/8/8/8/4K3 w".parse::<Fen>().is_ok());
    }
    #[test]
    fn malformed() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::NotEnoughSquaresOnRow)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::ExceedingSquaresOnRow)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::UnexpectedEol)
        );
        assert!("4k3/8/8/8/8/8/8/4K3/8 w - - 0 1".parse::<Fen>().is_err());
        assert!("4x3/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Fen>().is_err());
        assert!("4k3/8/8/8/8/8/8/4K3 x - - 0 1".parse::<Fen>().is_err());
    }
}
