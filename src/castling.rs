use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{player::Player, square::Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidCastlingCharacter(pub char);

impl Display for InvalidCastlingCharacter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found {}, expected one of `k`, `q`, `-`, or uppercase forms of these letters",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidCastlingCharacter {}

pub const KING_COLUMN: u8 = 4;

/// `QueenSide` castles toward column 0 ("left"), `KingSide` toward column 7
/// ("right").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    QueenSide,
    KingSide,
}
impl CastleSide {
    pub const BOTH: [Self; 2] = [CastleSide::QueenSide, CastleSide::KingSide];

    fn bit(self) -> u8 {
        match self {
            CastleSide::QueenSide => 0b_01,
            CastleSide::KingSide => 0b_10,
        }
    }
    pub fn rook_origin(self, player: Player) -> Square {
        let col = match self {
            CastleSide::QueenSide => 0,
            CastleSide::KingSide => 7,
        };
        Square::new(player.home_row(), col)
    }
    pub fn rook_destination(self, player: Player) -> Square {
        let col = match self {
            CastleSide::QueenSide => 3,
            CastleSide::KingSide => 5,
        };
        Square::new(player.home_row(), col)
    }
    pub fn king_origin(player: Player) -> Square {
        Square::new(player.home_row(), KING_COLUMN)
    }
    pub fn king_destination(self, player: Player) -> Square {
        let col = match self {
            CastleSide::QueenSide => 2,
            CastleSide::KingSide => 6,
        };
        Square::new(player.home_row(), col)
    }
    /// The side a two-column king move from its home square castles to.
    pub fn from_king_move(origin: Square, destination: Square) -> Option<Self> {
        if origin.row != destination.row || origin.col != KING_COLUMN {
            return None;
        }
        match destination.col {
            2 => Some(CastleSide::QueenSide),
            6 => Some(CastleSide::KingSide),
            _ => None,
        }
    }
    /// The side whose rook starts on `square` for `player`, if any.
    pub fn of_rook_origin(player: Player, square: Square) -> Option<Self> {
        CastleSide::BOTH
            .into_iter()
            .find(|side| side.rook_origin(player) == square)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    white: u8,
    black: u8,
}
impl CastlingRights {
    pub fn none() -> Self {
        CastlingRights { white: 0, black: 0 }
    }
    pub fn all() -> Self {
        CastlingRights {
            white: 0b_11,
            black: 0b_11,
        }
    }
    fn byte(self, player: Player) -> u8 {
        match player {
            Player::White => self.white,
            Player::Black => self.black,
        }
    }
    fn byte_mut(&mut self, player: Player) -> &mut u8 {
        match player {
            Player::White => &mut self.white,
            Player::Black => &mut self.black,
        }
    }
    pub fn get(self, player: Player, side: CastleSide) -> bool {
        self.byte(player) & side.bit() != 0
    }
    pub fn any(self, player: Player) -> bool {
        self.byte(player) != 0
    }
    pub fn add(&mut self, player: Player, side: CastleSide) {
        *self.byte_mut(player) |= side.bit();
    }
    pub fn remove(&mut self, player: Player, side: CastleSide) {
        *self.byte_mut(player) &= !side.bit();
    }
    pub fn clear(&mut self, player: Player) {
        *self.byte_mut(player) = 0;
    }
    /// Drops the right tied to a rook leaving, or being captured on, `square`.
    pub fn remove_for_rook(&mut self, player: Player, square: Square) {
        if let Some(side) = CastleSide::of_rook_origin(player, square) {
            self.remove(player, side);
        }
    }
}
impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::all()
    }
}
impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for player in Player::BOTH {
            for (side, c) in [(CastleSide::KingSide, 'K'), (CastleSide::QueenSide, 'Q')] {
                if self.get(player, side) {
                    written = true;
                    let c = match player {
                        Player::White => c,
                        Player::Black => c.to_ascii_lowercase(),
                    };
                    write!(f, "{c}")?;
                }
            }
        }
        if !written {
            write!(f, "-")?;
        }
        Ok(())
    }
}
impl FromStr for CastlingRights {
    type Err = InvalidCastlingCharacter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut castling_rights = CastlingRights::none();
        for c in s.chars() {
            match c {
                'K' => castling_rights.add(Player::White, CastleSide::KingSide),
                'Q' => castling_rights.add(Player::White, CastleSide::QueenSide),
                'k' => castling_rights.add(Player::Black, CastleSide::KingSide),
                'q' => castling_rights.add(Player::Black, CastleSide::QueenSide),
                '-' => (),
                c => return Err(InvalidCastlingCharacter(c)),
            }
        }
        Ok(castling_rights)
    }
}
