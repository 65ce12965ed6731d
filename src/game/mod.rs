//! # Chess API
//! This module contains everything chess related: the board, move generation
//! and execution, check detection, and the game state machine built on top of
//! them.

pub mod attacks;
pub mod board;
pub mod castling_rights;
pub mod colour;
pub mod fen;
pub mod history;
pub mod movegen;
pub mod moves;
#[cfg(feature = "perft")]
pub mod perft;
pub mod piece;
pub mod position;
pub mod square;
pub mod state;
pub mod status;
mod zobrist;

pub use board::{Board, InvariantViolation};
pub use colour::Colour;
pub use moves::{AppliedMove, Move};
pub use piece::{Piece, PieceKind};
pub use position::{MoveError, Position, Signature};
pub use square::Square;
pub use state::{Game, GameConfig, MoveOutcome, PromotionPolicy};
pub use status::{DrawKind, GameResult, GameStatus, StatusReport};
