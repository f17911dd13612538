use std::fmt::{self, Display, Formatter};

use crate::player::Player;

/// Result of inspecting the position for the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win(Player),
    Stalemate,
    Ongoing,
}
impl Outcome {
    pub const BLACK_WINS: u8 = 0;
    pub const WHITE_WINS: u8 = 1;
    pub const STALEMATE: u8 = 2;
    pub const ONGOING: u8 = 3;

    pub fn is_over(self) -> bool {
        self != Outcome::Ongoing
    }
}
impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "{player} wins")?,
            Outcome::Stalemate => write!(f, "stalemate")?,
            Outcome::Ongoing => write!(f, "ongoing")?,
        }
        Ok(())
    }
}
impl From<Outcome> for u8 {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Win(Player::Black) => Outcome::BLACK_WINS,
            Outcome::Win(Player::White) => Outcome::WHITE_WINS,
            Outcome::Stalemate => Outcome::STALEMATE,
            Outcome::Ongoing => Outcome::ONGOING,
        }
    }
}
