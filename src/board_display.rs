use std::fmt::{self, Display, Formatter};

use crate::{board::Board, player::Player, square::Square};

const WHITE: &str = "\x1b[30;107m";
const BLACK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

/// Renders a board with ANSI colours, one line of `info` beside each row.
pub struct BoardDisplay<'a, 'b> {
    pub board: &'a Board,
    pub view: Player,
    pub highlighted: &'a [Square],
    pub info: &'b str,
}
impl<'a> BoardDisplay<'a, '_> {
    pub fn new(board: &'a Board) -> Self {
        BoardDisplay {
            board,
            view: Player::White,
            highlighted: &[],
            info: "",
        }
    }
}
impl Display for BoardDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for row in 0..8 {
            let row = match self.view {
                Player::White => 7 - row,
                Player::Black => row,
            };
            for col in 0..8 {
                let col = match self.view {
                    Player::White => col,
                    Player::Black => 7 - col,
                };
                let square = Square::new(row, col);
                let color = if self.highlighted.contains(&square) {
                    HIGHLIGHTED
                } else {
                    match square.shade() {
                        Player::White => WHITE,
                        Player::Black => BLACK,
                    }
                };
                let figurine = self.board[square].map_or(' ', |piece| piece.figurine());
                write!(f, "{color}{figurine} {RESET}")?;
            }
            write!(f, "{}", row + 1)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Player::White => write!(f, "a b c d e f g h")?,
            Player::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
