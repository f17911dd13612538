#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

//! Rules of chess for two players sharing one screen: move generation,
//! legality filtering, castling, en passant, promotion, checkmate and
//! stalemate detection, and undo.

pub mod board;
pub mod board_display;
pub mod castling;
pub mod error;
pub mod fen;
pub mod fuzz;
pub mod game;
pub mod history;
pub mod lan;
pub mod movement;
pub mod outcome;
pub mod piece;
pub mod player;
pub mod repl;
pub mod square;
