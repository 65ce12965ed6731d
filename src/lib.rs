//! # Arbiter
//! A chess rules engine: given a position and a proposed move, it decides
//! legality, applies the move, and derives the state of the game (check,
//! checkmate, stalemate, draws).
//!
//! It is usable as both a library to embed into your own projects and a standalone
//! binary to play or inspect games from a terminal.

pub mod console;
pub mod game;

#[cfg(test)]
mod tests;
