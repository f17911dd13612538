use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::Not,
    str::FromStr,
};

use crate::error::InvalidByte;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsePlayerError;
impl Display for ParsePlayerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "provided string was not `w`, `b`, `W`, `B`, `white`, or `black`"
        )?;
        Ok(())
    }
}
impl Error for ParsePlayerError {}

/// One of the two sides. `White` is the first player and sits on row 0.
///
/// Empty cells are `None` on the board, there is no "empty" player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Player {
    White = 1,
    Black = 0,
}
impl Player {
    pub const BOTH: [Self; 2] = [Player::White, Player::Black];

    pub fn lowercase(self) -> char {
        match self {
            Player::White => 'w',
            Player::Black => 'b',
        }
    }
    pub fn home_row(self) -> u8 {
        match self {
            Player::White => 0,
            Player::Black => 7,
        }
    }
    pub fn pawn_row(self) -> u8 {
        match self {
            Player::White => 1,
            Player::Black => 6,
        }
    }
    pub fn promotion_row(self) -> u8 {
        (!self).home_row()
    }
    /// Row step of a pawn push.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }
}
impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "white")?,
            Player::Black => write!(f, "black")?,
        }
        Ok(())
    }
}
impl FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let player = match s {
            "w" | "W" | "white" => Player::White,
            "b" | "B" | "black" => Player::Black,
            _ => return Err(ParsePlayerError),
        };
        Ok(player)
    }
}
impl TryFrom<u8> for Player {
    type Error = InvalidByte;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let player = match value {
            0 => Player::Black,
            1 => Player::White,
            2.. => return Err(InvalidByte(value)),
        };
        Ok(player)
    }
}
impl From<Player> for u8 {
    fn from(value: Player) -> Self {
        match value {
            Player::White => 1,
            Player::Black => 0,
        }
    }
}
impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }
}
