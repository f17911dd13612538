//! Movement rules of each piece kind.
//!
//! Every function here yields pseudo-legal destinations: they read occupancy
//! only and never ask whether the mover's king ends up attacked.

use crate::{
    board::Board,
    castling::CastleSide,
    piece::Piece,
    square::{Offset, Square},
};

fn step(piece: Piece, board: &Board, offsets: &[Offset]) -> Vec<Square> {
    offsets
        .iter()
        .copied()
        .filter_map(|offset| piece.square.move_by(offset))
        .filter(|destination| board[*destination].is_none_or(|other| other.player != piece.player))
        .collect()
}
/// Walks each direction until the first occupied square, which is kept only
/// when it holds an opponent's piece.
fn slide(piece: Piece, board: &Board, directions: &[Offset]) -> Vec<Square> {
    let mut moves = Vec::new();
    for direction in directions.iter().copied() {
        for destination in piece.square.line(direction) {
            match board[destination] {
                None => moves.push(destination),
                Some(other) => {
                    if other.player != piece.player {
                        moves.push(destination);
                    }
                    break;
                }
            }
        }
    }
    moves
}
pub fn rook_moves(piece: Piece, board: &Board) -> Vec<Square> {
    slide(piece, board, &Offset::ROOK_DIRECTIONS)
}
pub fn bishop_moves(piece: Piece, board: &Board) -> Vec<Square> {
    slide(piece, board, &Offset::BISHOP_DIRECTIONS)
}
pub fn queen_moves(piece: Piece, board: &Board) -> Vec<Square> {
    let mut moves = rook_moves(piece, board);
    moves.extend(bishop_moves(piece, board));
    moves
}
pub fn knight_moves(piece: Piece, board: &Board) -> Vec<Square> {
    step(piece, board, &Offset::KNIGHT_MOVES)
}
pub fn king_moves(piece: Piece, board: &Board) -> Vec<Square> {
    let mut moves = step(piece, board, &Offset::KING_MOVES);
    moves.extend(
        CastleSide::BOTH
            .into_iter()
            .filter(|side| board.king_can_castle(piece.player, *side))
            .map(|side| side.king_destination(piece.player)),
    );
    moves
}
pub fn pawn_moves(piece: Piece, board: &Board) -> Vec<Square> {
    let forward_jumps = if piece.square.row == piece.player.pawn_row() {
        2
    } else {
        1
    };
    let mut moves: Vec<_> = piece
        .square
        .line(Offset::pawn_push(piece.player))
        .take(forward_jumps)
        .take_while(|destination| board[*destination].is_none())
        .collect();
    moves.extend(
        Offset::pawn_captures(piece.player)
            .into_iter()
            .filter_map(|offset| piece.square.move_by(offset))
            .filter(|destination| match board[*destination] {
                Some(other) => other.player != piece.player,
                None => board.en_passant_capture(piece.player, *destination).is_some(),
            }),
    );
    moves
}
