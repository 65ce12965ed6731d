//! # Board
//! Pure 8x8 container of pieces. It knows nothing of the rules, which live in
//! [`movegen`](super::movegen), [`attacks`](super::attacks) and
//! [`position`](super::position).

use thiserror::Error;

use super::{
    colour::Colour,
    piece::{Piece, PieceKind},
    square::{File, Rank, Square},
};

/// Internal consistency failures. These indicate a bug and should never surface
/// when the engine is used through a [`Position`](super::position::Position).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("No {0} king on the board")]
    MissingKing(Colour),
    #[error("Tried to move from the empty square {0}")]
    EmptyOrigin(Square),
}

/// Mapping from squares to optional pieces.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}
impl Default for Board {
    /// A board with no pieces.
    fn default() -> Self {
        Self {
            squares: [None; 64],
        }
    }
}
impl Board {
    const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// A board with no pieces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard starting arrangement.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (file, kind) in File::FILES.into_iter().zip(Self::BACK_RANK) {
            board.set(
                Square::new(file, Rank::One),
                Some(Piece::new(kind, Colour::White)),
            );
            board.set(
                Square::new(file, Rank::Two),
                Some(Piece::new(PieceKind::Pawn, Colour::White)),
            );
            board.set(
                Square::new(file, Rank::Seven),
                Some(Piece::new(PieceKind::Pawn, Colour::Black)),
            );
            board.set(
                Square::new(file, Rank::Eight),
                Some(Piece::new(kind, Colour::Black)),
            );
        }
        board
    }

    /// Returns the piece sitting on a given square if any.
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    /// Places (or removes, with `None`) a piece on a square.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square as usize] = piece
    }

    /// Removes and returns the piece on a square.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square as usize].take()
    }

    /// Returns the square of the king of the given colour.
    ///
    /// # Errors
    /// Fails if there is no such king, which breaks the invariants of any
    /// initialized game.
    pub fn find_king(&self, colour: Colour) -> Result<Square, InvariantViolation> {
        let king = Piece::new(PieceKind::King, colour);
        self.pieces()
            .find_map(|(sq, piece)| (piece == king).then_some(sq))
            .ok_or(InvariantViolation::MissingKing(colour))
    }

    /// Iterator over all occupied squares and their pieces, from A1 to H8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::squares_iter().filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Iterator over the pieces of a given colour.
    pub fn pieces_of(&self, colour: Colour) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.colour == colour)
    }

    /// Counts the pieces of a given kind and colour.
    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|&(_, p)| p == piece).count()
    }
}
impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in Rank::RANKS.into_iter().rev() {
            write!(f, "{rank} ")?;
            for file in File::FILES {
                match self.get(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece} ")?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?
        }
        write!(f, "  a b c d e f g h")
    }
}
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
