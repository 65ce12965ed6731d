//! # Moves
//! A [`Move`] is a request to move a piece, it carries no information about its
//! legality. Once a move has been validated and played, it becomes an
//! [`AppliedMove`] describing all of its side effects.

use thiserror::Error;

use super::{
    castling_rights::CastlingSide,
    piece::{Piece, PieceKind},
    square::{File, Rank, Square},
};

/// Moves available from a single square.
///
/// A queen has at most 27 targets, and a pawn at most 12 once promotions are
/// expanded, so this never overflows.
pub type MoveList = heapless::Vec<Move, 32>;

/// Describes a move using a from-to \<promotion\> approach.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}
impl Move {
    /// Creates a move without promotion.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a promoting move.
    #[inline]
    pub const fn new_promotion(from: Square, to: Square, promoting_to: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promoting_to),
        }
    }

    /// Creates the four promoting variants of a pawn move, queen first.
    pub fn new_promotions(from: Square, to: Square) -> [Self; 4] {
        PieceKind::PROMOTION_TARGETS.map(|kind| Self::new_promotion(from, to, kind))
    }
}
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{kind}")?
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum MoveParseError {
    #[error("Invalid origin square")]
    InvalidOrigin,
    #[error("Invalid target square")]
    InvalidTarget,
    #[error("Cannot promote to {0:?}")]
    InvalidPromotion(char),
    #[error("Coordinate moves are at least 4 characters, got {0}")]
    TooShort(usize),
    #[error("Coordinate moves are at most 5 characters, got {0}")]
    TooLong(usize),
    #[error("Coordinate moves only use ASCII characters")]
    NonAscii,
}

impl std::str::FromStr for Move {
    type Err = MoveParseError;

    /// Parses pure coordinate notation, like `e2e4` or `e7e8q`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() {
            return Err(MoveParseError::NonAscii);
        }
        let len = s.len();
        if len < 4 {
            return Err(MoveParseError::TooShort(len));
        }
        if len > 5 {
            return Err(MoveParseError::TooLong(len));
        }
        let from: Square = s[0..2].parse().map_err(|_| MoveParseError::InvalidOrigin)?;
        let to: Square = s[2..4].parse().map_err(|_| MoveParseError::InvalidTarget)?;
        let promotion = match s[4..].chars().next() {
            Some(c) => match PieceKind::try_from(c) {
                Ok(kind) if kind.is_valid_promotion_target() => Some(kind),
                _ => return Err(MoveParseError::InvalidPromotion(c)),
            },
            None => None,
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

/// Executed record of a move, with every side effect it had on the position.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub struct AppliedMove {
    /// The move as played. Promotions always carry the kind that was placed.
    pub mv: Move,
    /// The piece that moved, as it stood on the origin square.
    pub moved: Piece,
    /// The piece that was captured, if any.
    pub captured: Option<Piece>,
    /// Whether the capture was en passant (the captured pawn was not on `mv.to`).
    pub is_en_passant: bool,
    /// Set for castling king moves.
    pub castling: Option<CastlingSide>,
    /// Whether the move left the opponent in check.
    pub gives_check: bool,
}
impl AppliedMove {
    /// Checks if a piece was captured.
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// The piece standing on the target square after the move.
    pub fn placed(&self) -> Piece {
        match self.mv.promotion {
            Some(kind) => Piece::new(kind, self.moved.colour),
            None => self.moved,
        }
    }
}
impl std::fmt::Display for AppliedMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mv)
    }
}

/// Check markers appended to SAN moves.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum CheckKind {
    Check,
    Checkmate,
}

/// Standard Algebraic Notation encoded move, used for the move history and
/// human-readable output.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub struct SanMove {
    pub move_kind: SanMoveKind,
    pub check: Option<CheckKind>,
}

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub enum SanMoveKind {
    PawnPush {
        target: Square,
        promoting_to: Option<PieceKind>,
    },
    PawnCapture {
        origin_file: File,
        target: Square,
        promoting_to: Option<PieceKind>,
    },
    PieceMove {
        moving_piece: PieceKind,
        origin_file: Option<File>,
        origin_rank: Option<Rank>,
        is_capture: bool,
        target: Square,
    },
    KingSideCastle,
    QueenSideCastle,
}
impl std::fmt::Display for SanMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.move_kind {
            SanMoveKind::PawnPush {
                target,
                promoting_to,
            } => {
                write!(f, "{target}")?;
                if let Some(kind) = promoting_to {
                    write!(f, "={}", kind.letter())?
                }
            }
            SanMoveKind::PawnCapture {
                origin_file,
                target,
                promoting_to,
            } => {
                write!(f, "{origin_file}x{target}")?;
                if let Some(kind) = promoting_to {
                    write!(f, "={}", kind.letter())?
                }
            }
            SanMoveKind::PieceMove {
                moving_piece,
                origin_file,
                origin_rank,
                is_capture,
                target,
            } => {
                write!(f, "{}", moving_piece.letter())?;
                if let Some(file) = origin_file {
                    write!(f, "{file}")?
                }
                if let Some(rank) = origin_rank {
                    write!(f, "{rank}")?
                }
                if is_capture {
                    write!(f, "x")?
                }
                write!(f, "{target}")?
            }
            SanMoveKind::KingSideCastle => write!(f, "O-O")?,
            SanMoveKind::QueenSideCastle => write!(f, "O-O-O")?,
        }
        match self.check {
            Some(CheckKind::Check) => write!(f, "+"),
            Some(CheckKind::Checkmate) => write!(f, "#"),
            None => Ok(()),
        }
    }
}
