use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidByte(pub u8);

impl Display for InvalidByte {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "invalid byte `{}`", self.0)?;
        Ok(())
    }
}
impl Error for InvalidByte {}

/// Returned when a piece is selected that can't be moved by the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveError {
    /// The origin is empty or holds an opponent's piece.
    InvalidSelection,
    /// The destination is not among the legal moves of the selected piece.
    IllegalMove,
}
impl Display for MoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidSelection => {
                write!(f, "no piece of the player to move on the origin square")?;
            }
            MoveError::IllegalMove => write!(f, "the destination is not a legal move")?,
        }
        Ok(())
    }
}
impl Error for MoveError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyUndo;

impl Display for EmptyUndo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "there are no moves to undo")?;
        Ok(())
    }
}
impl Error for EmptyUndo {}
