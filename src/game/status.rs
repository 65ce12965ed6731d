//! # Game status
//! Status is always derived from the current position and the repetition
//! bookkeeping, never stored independently of them.

use super::colour::Colour;

/// Reasons for a drawn game.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum DrawKind {
    Stalemate,
    /// The same position occurred three times.
    Repetition,
    /// A hundred half-moves without a capture or pawn move.
    FiftyMoveRule,
    InsufficientMaterial,
}
impl std::fmt::Display for DrawKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stalemate => write!(f, "stalemate"),
            Self::Repetition => write!(f, "threefold repetition"),
            Self::FiftyMoveRule => write!(f, "fifty-move rule"),
            Self::InsufficientMaterial => write!(f, "insufficient material"),
        }
    }
}

/// Outcome of a finished game.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum GameResult {
    /// The given colour has been checkmated.
    Checkmate(Colour),
    Draw(DrawKind),
}
impl GameResult {
    /// Colour of the winning side, if any.
    pub fn winner(self) -> Option<Colour> {
        match self {
            Self::Checkmate(loser) => Some(loser.inverse()),
            Self::Draw(_) => None,
        }
    }
}
impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Checkmate(loser) => write!(f, "{} wins by checkmate", loser.inverse()),
            Self::Draw(kind) => write!(f, "draw by {kind}"),
        }
    }
}

/// State of the game as seen from the side to move.
///
/// Precedence when several conditions hold at once: checkmate, then stalemate,
/// then the other draws, then check.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum GameStatus {
    InProgress,
    Check,
    Checkmate,
    Stalemate,
    Draw(DrawKind),
}
impl GameStatus {
    /// Whether no more moves can be played.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress | Self::Check)
    }
}

/// Snapshot of the status of a game, for presentation layers.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct StatusReport {
    pub side_to_move: Colour,
    pub status: GameStatus,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    /// Also set for stalemate, which is a draw.
    pub is_draw: bool,
}
impl StatusReport {
    pub fn new(side_to_move: Colour, status: GameStatus, is_check: bool) -> Self {
        Self {
            side_to_move,
            status,
            is_check,
            is_checkmate: status == GameStatus::Checkmate,
            is_stalemate: status == GameStatus::Stalemate,
            is_draw: matches!(status, GameStatus::Stalemate | GameStatus::Draw(_)),
        }
    }

    /// Result of the game if it is over.
    pub fn result(&self) -> Option<GameResult> {
        match self.status {
            GameStatus::Checkmate => Some(GameResult::Checkmate(self.side_to_move)),
            GameStatus::Stalemate => Some(GameResult::Draw(DrawKind::Stalemate)),
            GameStatus::Draw(kind) => Some(GameResult::Draw(kind)),
            GameStatus::InProgress | GameStatus::Check => None,
        }
    }
}
impl std::fmt::Display for StatusReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.result() {
            Some(result) => write!(f, "{result}"),
            None if self.is_check => write!(f, "{} to move, in check", self.side_to_move),
            None => write!(f, "{} to move", self.side_to_move),
        }
    }
}
