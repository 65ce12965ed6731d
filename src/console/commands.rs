//! # Console commands
//! One command per line. Anything that is not a known verb is read as a move in
//! coordinate notation, `<from><to>[promotion]`.

use thiserror::Error;

use crate::game::{
    moves::{Move, MoveParseError},
    square::{Square, SquareParseError},
};

/// Commands accepted by the console.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ConsoleCommand {
    Play(Move),
    /// Lists the destinations of the piece on a square.
    Moves(Square),
    Undo,
    Reset,
    Fen,
    History,
    Status,
    Board,
    Help,
    Quit,
}

#[derive(Clone, Debug, Hash, Eq, PartialEq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Expected a square after 'moves'")]
    MissingSquare,
    #[error(transparent)]
    InvalidSquare(#[from] SquareParseError),
    #[error("Unknown command '{0}' ({1})")]
    Unknown(String, MoveParseError),
    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

impl std::str::FromStr for ConsoleCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let verb = tokens.next().ok_or(CommandError::Empty)?;
        let command = match verb.to_ascii_lowercase().as_str() {
            "moves" => {
                let square = tokens.next().ok_or(CommandError::MissingSquare)?;
                Self::Moves(square.parse()?)
            }
            "undo" => Self::Undo,
            "reset" | "new" => Self::Reset,
            "fen" => Self::Fen,
            "history" => Self::History,
            "status" => Self::Status,
            "board" => Self::Board,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            mv => Self::Play(
                mv.parse()
                    .map_err(|e| CommandError::Unknown(verb.to_string(), e))?,
            ),
        };
        match tokens.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

pub const HELP: &str = "\
commands:
  <from><to>[q|r|b|n]  play a move, like e2e4 or e7e8q
  moves <square>       list where the piece on <square> can go
  undo                 take back the last move
  reset                start a new game
  fen                  print the position as FEN
  history              print the moves played so far
  status               print the state of the game
  board                print the board
  help                 print this message
  quit                 leave";
