use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    piece::{InvalidFenPiece, PieceKind},
    square::{ParseSquareError, Square},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseLanError {
    InvalidChar,
    ParseSquareError(ParseSquareError),
    InvalidFenPiece(InvalidFenPiece),
    Unexpected(char),
}
impl From<ParseSquareError> for ParseLanError {
    fn from(value: ParseSquareError) -> Self {
        ParseLanError::ParseSquareError(value)
    }
}
impl From<InvalidFenPiece> for ParseLanError {
    fn from(value: InvalidFenPiece) -> Self {
        ParseLanError::InvalidFenPiece(value)
    }
}
impl Display for ParseLanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseLanError::InvalidChar => write!(f, "provided string contains invalid character")?,
            ParseLanError::ParseSquareError(err) => write!(f, "{err}")?,
            ParseLanError::InvalidFenPiece(err) => write!(f, "{err}")?,
            ParseLanError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseLanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseLanError::ParseSquareError(err) => Some(err),
            ParseLanError::InvalidFenPiece(err) => Some(err),
            _ => None,
        }
    }
}

/// A move in long algebraic notation, such as `e2e4` or `e7e8q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lan {
    pub origin: Square,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}
impl Display for Lan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.lowercase())?;
        }
        Ok(())
    }
}
impl FromStr for Lan {
    type Err = ParseLanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let origin = s.get(0..2).ok_or(ParseLanError::InvalidChar)?.parse()?;
        let destination = s.get(2..4).ok_or(ParseLanError::InvalidChar)?.parse()?;
        let mut rest = s
            .get(4..)
            .ok_or(ParseLanError::InvalidChar)?
            .chars()
            .fuse();
        let promotion = rest.next().map(PieceKind::from_fen).transpose()?;

        if let Some(c) = rest.next() {
            return Err(ParseLanError::Unexpected(c));
        }
        Ok(Lan {
            origin,
            destination,
            promotion,
        })
    }
}
