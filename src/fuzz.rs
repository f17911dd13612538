//! Cross-checks move generation against the `chess` crate on random games.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::{
    board::Board, board_display::BoardDisplay, fen::Fen, game::GameState, lan::Lan,
    outcome::Outcome, piece::PieceKind, square::Square,
};

/// Games longer than this are abandoned; most random games end by then.
const MAX_PLIES: usize = 300;

impl From<chess::Piece> for PieceKind {
    fn from(value: chess::Piece) -> Self {
        match value {
            chess::Piece::Pawn => PieceKind::Pawn,
            chess::Piece::Knight => PieceKind::Knight,
            chess::Piece::Bishop => PieceKind::Bishop,
            chess::Piece::Rook => PieceKind::Rook,
            chess::Piece::Queen => PieceKind::Queen,
            chess::Piece::King => PieceKind::King,
        }
    }
}
impl From<chess::Square> for Square {
    fn from(value: chess::Square) -> Self {
        let index = value.to_int();
        Square::new(index / 8, index % 8)
    }
}
impl From<chess::ChessMove> for Lan {
    fn from(value: chess::ChessMove) -> Self {
        Lan {
            origin: value.get_source().into(),
            destination: value.get_dest().into(),
            promotion: value.get_promotion().map(Into::into),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// The reference rejected the exported position.
    Export { board: Board },
    /// A move was found that the reference considers illegal.
    Extra { board: Board, movement: Lan },
    /// A legal move was not found.
    Missing { board: Board, movement: Lan },
    Outcome { board: Board, outcome: Outcome },
    /// Applying then reverting a move did not restore the position.
    Revert { board: Board, movement: Lan },
    /// Undoing the whole game did not lead back to the starting position.
    Undo { board: Board },
}
impl Mismatch {
    pub fn board(&self) -> &Board {
        match self {
            Mismatch::Export { board }
            | Mismatch::Extra { board, .. }
            | Mismatch::Missing { board, .. }
            | Mismatch::Outcome { board, .. }
            | Mismatch::Revert { board, .. }
            | Mismatch::Undo { board } => board,
        }
    }
}
impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Export { .. } => write!(f, "the position was rejected by the reference")?,
            Mismatch::Extra { movement, .. } => write!(f, "found {movement} but it's not a legal move")?,
            Mismatch::Missing { movement, .. } => write!(f, "{movement} not found")?,
            Mismatch::Outcome { outcome, .. } => write!(f, "reported {outcome}")?,
            Mismatch::Revert { movement, .. } => {
                write!(f, "reverting {movement} did not restore the position")?;
            }
            Mismatch::Undo { .. } => write!(f, "undoing every move did not restore the starting position")?,
        }
        writeln!(f)?;
        write!(f, "{}", BoardDisplay::new(self.board()))?;
        write!(f, "{}", Fen(*self.board()))?;
        Ok(())
    }
}
impl Error for Mismatch {}

fn check_position(board: &Board) -> Result<(), Mismatch> {
    let moves: FxHashSet<(Square, Square)> = board.all_valid_moves().into_iter().collect();
    let reference: chess::Board = Fen(*board)
        .to_string()
        .parse()
        .map_err(|_| Mismatch::Export { board: *board })?;
    let reference_moves: FxHashSet<(Square, Square)> = chess::MoveGen::new_legal(&reference)
        .map(Lan::from)
        .map(|movement| (movement.origin, movement.destination))
        .collect();
    let lan = |(origin, destination): (Square, Square)| Lan {
        origin,
        destination,
        promotion: None,
    };
    if let Some(movement) = moves.difference(&reference_moves).next() {
        return Err(Mismatch::Extra {
            board: *board,
            movement: lan(*movement),
        });
    }
    if let Some(movement) = reference_moves.difference(&moves).next() {
        return Err(Mismatch::Missing {
            board: *board,
            movement: lan(*movement),
        });
    }
    let outcome = board.outcome();
    let expected = match reference.status() {
        chess::BoardStatus::Ongoing => !outcome.is_over(),
        chess::BoardStatus::Stalemate => outcome == Outcome::Stalemate,
        chess::BoardStatus::Checkmate => outcome == Outcome::Win(!board.current_player()),
    };
    if !expected {
        return Err(Mismatch::Outcome {
            board: *board,
            outcome,
        });
    }
    for (origin, destination) in moves {
        let mut after = *board;
        let record = after.apply(origin, destination, None);
        if let Some(record) = record {
            after.revert(&record);
        }
        if record.is_none() || after != *board {
            return Err(Mismatch::Revert {
                board: *board,
                movement: lan((origin, destination)),
            });
        }
    }
    Ok(())
}
/// Plays `games` random games, comparing every position along the way.
pub fn fuzz(games: usize, rng: &mut impl Rng) -> Result<(), Mismatch> {
    for _ in 0..games {
        let mut game = GameState::new();
        for _ in 0..MAX_PLIES {
            check_position(game.board())?;
            let moves = game.all_valid_moves();
            if moves.is_empty() {
                break;
            }
            let (origin, destination) = moves[rng.random_range(0..moves.len())];
            game.move_piece(origin, destination, true);
        }
        // walking back the whole game must land on the starting position
        while game.undo_move() {}
        if *game.board() != Board::starting_position() {
            return Err(Mismatch::Undo {
                board: *game.board(),
            });
        }
    }
    Ok(())
}
