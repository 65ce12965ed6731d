//! Piece types encoding.

use std::str::FromStr;

use thiserror::Error;

use super::colour::Colour;

/// Total number of different piece kinds (6).
pub const NUM_PIECES: usize = 6;

const PIECE_SYMBOLS: [char; 12] = ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];

/// Complete set of information for identifying a piece.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub colour: Colour,
}
impl Piece {
    /// Creates a new piece of the given kind and colour.
    #[inline]
    pub const fn new(kind: PieceKind, colour: Colour) -> Self {
        Self { kind, colour }
    }

    /// FEN symbol of the piece: uppercase for white, lowercase for black.
    pub const fn symbol(self) -> char {
        PIECE_SYMBOLS[self.colour as usize * NUM_PIECES + self.kind as usize]
    }
}
impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Error)]
#[error("Invalid piece symbol")]
pub struct PieceParseError;

impl TryFrom<char> for Piece {
    type Error = PieceParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let kind = PieceKind::try_from(c)?;
        Ok(Self {
            kind,
            colour: c.is_ascii_lowercase().into(),
        })
    }
}
impl FromStr for Piece {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(PieceParseError),
        }
    }
}

/// The kind of a piece, one of Pawn, Knight, Bishop, Rook, Queen or King. Usually
/// with supplementary information about the colour of the piece, in the form of
/// the [`Piece`] struct.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}
impl PieceKind {
    /// Pieces that a pawn can promote to, strongest first.
    pub const PROMOTION_TARGETS: [Self; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Checks if this piece kind is a diagonal slider (bishops and queens).
    #[inline(always)]
    pub fn is_diagonal_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Queen)
    }
    /// Checks if this piece kind is an orthogonal slider (rooks and queens).
    #[inline(always)]
    pub fn is_orthogonal_slider(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Queen)
    }

    /// Checks if this piece is a knight or a bishop.
    #[inline(always)]
    pub fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }

    /// Checks if this piece kind can be promoted to.
    ///
    /// Returns true for all pieces but pawns and kings.
    pub fn is_valid_promotion_target(&self) -> bool {
        !matches!(self, PieceKind::Pawn | PieceKind::King)
    }

    /// Uppercase letter used for this piece in algebraic notation.
    pub const fn letter(self) -> char {
        PIECE_SYMBOLS[self as usize]
    }
}
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PIECE_SYMBOLS[NUM_PIECES + *self as usize])
    }
}
impl TryFrom<char> for PieceKind {
    type Error = PieceParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => Err(PieceParseError)?,
        })
    }
}
impl FromStr for PieceKind {
    type Err = PieceParseError;

    /// Parses either a single letter (`q`, `N`) or the full name (`queen`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "pawn" => PieceKind::Pawn,
            "knight" => PieceKind::Knight,
            "bishop" => PieceKind::Bishop,
            "rook" => PieceKind::Rook,
            "queen" => PieceKind::Queen,
            "king" => PieceKind::King,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => PieceKind::try_from(c)?,
                    _ => Err(PieceParseError)?,
                }
            }
        })
    }
}
