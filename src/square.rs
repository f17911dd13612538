use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::{Mul, Neg},
    str::FromStr,
};

use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseSquareError {
    InvalidColumn(char),
    InvalidRow(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseSquareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseSquareError::InvalidColumn(c) => write!(
                f,
                "found `{c}`, characters from `a` to `h` were expected instead"
            )?,
            ParseSquareError::InvalidRow(c) => write!(
                f,
                "found `{c}`, characters from `1` to `8` were expected instead"
            )?,
            ParseSquareError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseSquareError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseSquareError {}

/// A cell of the board. Row 0 is rank 1, column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}
impl Square {
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8, "{row} should be < 8");
        debug_assert!(col < 8, "{col} should be < 8");
        Square { row, col }
    }
    pub fn new_checked(row: u8, col: u8) -> Option<Self> {
        (row < 8 && col < 8).then_some(Square { row, col })
    }
    /// `false` for a square built by hand with out of range fields.
    pub fn is_on_board(self) -> bool {
        self.row < 8 && self.col < 8
    }
    pub fn from_chars(col: char, row: char) -> Result<Self, ParseSquareError> {
        let col = match col {
            'a'..='h' => col as u8 - b'a',
            _ => return Err(ParseSquareError::InvalidColumn(col)),
        };
        let row = match row {
            '1'..='8' => row as u8 - b'1',
            _ => return Err(ParseSquareError::InvalidRow(row)),
        };
        Ok(Square::new(row, col))
    }
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square::new(row, col)))
    }
    pub fn move_by(self, offset: Offset) -> Option<Self> {
        Square::new_checked(
            self.row.checked_add_signed(offset.row)?,
            self.col.checked_add_signed(offset.col)?,
        )
    }
    /// Squares walked from here in `direction`, excluding this one, until the edge.
    pub fn line(self, direction: Offset) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Offset::ZERO);
        (1..).map_while(move |distance| self.move_by(direction * distance))
    }
    /// Squares strictly between two squares on the same row.
    pub fn between_on_row(self, other: Self) -> impl Iterator<Item = Self> {
        debug_assert_eq!(self.row, other.row);
        let row = self.row;
        (Ord::min(self.col, other.col) + 1..Ord::max(self.col, other.col))
            .map(move |col| Square::new(row, col))
    }
    /// Colour of the cell itself, used for rendering.
    pub fn shade(self) -> Player {
        match (self.row + self.col) % 2 {
            0 => Player::Black,
            _ => Player::White,
        }
    }
}
impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let col = (self.col + b'a') as char;
        let row = self.row + 1;
        write!(f, "{col}{row}")?;
        Ok(())
    }
}
impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(col) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacter(0));
        };
        let Some(row) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseSquareError::Unexpected(c));
        }
        Square::from_chars(col, row)
    }
}
impl From<(u8, u8)> for Square {
    fn from((row, col): (u8, u8)) -> Self {
        Square::new(row, col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub row: i8,
    pub col: i8,
}
impl Offset {
    pub const ZERO: Self = Offset { row: 0, col: 0 };

    pub const KNIGHT_MOVES: [Self; 8] = [
        Offset { row: -2, col: -1 },
        Offset { row: -2, col: 1 },
        Offset { row: -1, col: -2 },
        Offset { row: -1, col: 2 },
        Offset { row: 1, col: -2 },
        Offset { row: 1, col: 2 },
        Offset { row: 2, col: -1 },
        Offset { row: 2, col: 1 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Offset { row: -1, col: -1 },
        Offset { row: -1, col: 0 },
        Offset { row: -1, col: 1 },
        Offset { row: 0, col: -1 },
        Offset { row: 0, col: 1 },
        Offset { row: 1, col: -1 },
        Offset { row: 1, col: 0 },
        Offset { row: 1, col: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Offset { row: 0, col: -1 },
        Offset { row: 0, col: 1 },
        Offset { row: 1, col: 0 },
        Offset { row: -1, col: 0 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Offset { row: -1, col: -1 },
        Offset { row: -1, col: 1 },
        Offset { row: 1, col: -1 },
        Offset { row: 1, col: 1 },
    ];

    pub fn new(row: i8, col: i8) -> Self {
        Offset { row, col }
    }
    pub fn pawn_push(player: Player) -> Self {
        Offset {
            row: player.pawn_direction(),
            col: 0,
        }
    }
    pub fn pawn_captures(player: Player) -> [Self; 2] {
        let row = player.pawn_direction();
        [Offset { row, col: -1 }, Offset { row, col: 1 }]
    }
}
impl Mul<i8> for Offset {
    type Output = Self;

    fn mul(self, rhs: i8) -> Self::Output {
        Offset {
            row: self.row * rhs,
            col: self.col * rhs,
        }
    }
}
impl Neg for Offset {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Offset {
            row: -self.row,
            col: -self.col,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::square::{Offset, ParseSquareError, Square};

    #[test]
    fn algebraic() {
        assert_eq!("a1".parse(), Ok(Square::new(0, 0)));
        assert_eq!("e2".parse(), Ok(Square::new(1, 4)));
        assert_eq!("h8".parse(), Ok(Square::new(7, 7)));
        assert_eq!(Square::new(3, 2).to_string(), "c4");
        assert_eq!(
            "i1".parse::<Square>(),
            Err(ParseSquareError::InvalidColumn('i'))
        );
        assert_eq!(
            "a9".parse::<Square>(),
            Err(ParseSquareError::InvalidRow('9'))
        );
        assert_eq!(
            "e".parse::<Square>(),
            Err(ParseSquareError::NotEnoughCharacter(1))
        );
        assert_eq!("e44".parse::<Square>(), Err(ParseSquareError::Unexpected('4')));
    }
    #[test]
    fn off_board() {
        assert_eq!(Square::new(0, 0).move_by(Offset::new(-1, 0)), None);
        assert_eq!(Square::new(7, 7).move_by(Offset::new(0, 1)), None);
        assert_eq!(Square::new_checked(8, 0), None);
        assert!(!Square { row: 9, col: 0 }.is_on_board());
        assert!(Square::new(7, 7).is_on_board());
    }
    #[test]
    fn line_stops_at_edge() {
        let line: Vec<_> = Square::new(0, 5).line(Offset::new(1, 1)).collect();
        assert_eq!(line, [Square::new(1, 6), Square::new(2, 7)]);
    }
    #[test]
    fn between() {
        let between: Vec<_> = Square::new(0, 4).between_on_row(Square::new(0, 0)).collect();
        assert_eq!(
            between,
            [Square::new(0, 1), Square::new(0, 2), Square::new(0, 3)]
        );
    }
}
