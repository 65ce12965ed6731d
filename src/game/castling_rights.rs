//! # Representation of castling rights
//!
//! Rights can only ever be revoked during a game. The only way to obtain rights
//! that are not full is to parse them from a FEN string.

use std::str::FromStr;

use thiserror::Error;

use super::{
    colour::Colour,
    square::{File, Square},
};

/// Which side of the board a castling move happens on.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}
impl CastlingSide {
    pub const SIDES: [Self; 2] = [Self::Kingside, Self::Queenside];

    /// Square the king starts from.
    pub const fn king_origin(colour: Colour) -> Square {
        Square::new(File::E, colour.back_rank())
    }

    /// Square the king lands on after castling on this side.
    pub const fn king_target(self, colour: Colour) -> Square {
        let file = match self {
            Self::Kingside => File::G,
            Self::Queenside => File::C,
        };
        Square::new(file, colour.back_rank())
    }

    /// Square the rook starts from.
    pub const fn rook_origin(self, colour: Colour) -> Square {
        let file = match self {
            Self::Kingside => File::H,
            Self::Queenside => File::A,
        };
        Square::new(file, colour.back_rank())
    }

    /// Square the rook lands on after castling on this side.
    pub const fn rook_target(self, colour: Colour) -> Square {
        let file = match self {
            Self::Kingside => File::F,
            Self::Queenside => File::D,
        };
        Square::new(file, colour.back_rank())
    }

    /// Files between king and rook, which must all be empty to castle.
    pub const fn between_files(self) -> &'static [File] {
        match self {
            Self::Kingside => &[File::F, File::G],
            Self::Queenside => &[File::B, File::C, File::D],
        }
    }

    /// Squares the king stands on, crosses, and lands on. None of them may be
    /// attacked.
    pub fn king_path(self, colour: Colour) -> [Square; 3] {
        let rank = colour.back_rank();
        match self {
            Self::Kingside => [
                Square::new(File::E, rank),
                Square::new(File::F, rank),
                Square::new(File::G, rank),
            ],
            Self::Queenside => [
                Square::new(File::E, rank),
                Square::new(File::D, rank),
                Square::new(File::C, rank),
            ],
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CastlingRights(u8);
impl CastlingRights {
    const KINGSIDE_BLACK: u8 = 0b0001;
    const QUEENSIDE_BLACK: u8 = 0b0010;
    const KINGSIDE_WHITE: u8 = 0b0100;
    const QUEENSIDE_WHITE: u8 = 0b1000;
    const FULL: u8 =
        Self::KINGSIDE_BLACK | Self::KINGSIDE_WHITE | Self::QUEENSIDE_BLACK | Self::QUEENSIDE_WHITE;
    const EMPTY: u8 = 0;

    /// Full castling rights for both sides.
    pub const fn full() -> Self {
        Self(Self::FULL)
    }

    /// No castling rights for any sides.
    pub const fn none() -> Self {
        Self(Self::EMPTY)
    }

    /// Checks if no one can castle.
    pub const fn is_none(self) -> bool {
        self.0 == Self::EMPTY
    }

    const fn flag(side: CastlingSide, colour: Colour) -> u8 {
        match (side, colour) {
            (CastlingSide::Kingside, Colour::White) => Self::KINGSIDE_WHITE,
            (CastlingSide::Queenside, Colour::White) => Self::QUEENSIDE_WHITE,
            (CastlingSide::Kingside, Colour::Black) => Self::KINGSIDE_BLACK,
            (CastlingSide::Queenside, Colour::Black) => Self::QUEENSIDE_BLACK,
        }
    }

    /// Index of the flag in `0..4`, used for hashing.
    pub(crate) const fn index(side: CastlingSide, colour: Colour) -> usize {
        Self::flag(side, colour).trailing_zeros() as usize
    }

    /// Checks if castling on `side` is still allowed for a certain colour.
    #[inline(always)]
    pub const fn allowed(self, side: CastlingSide, colour: Colour) -> bool {
        self.0 & Self::flag(side, colour) != 0
    }

    /// Checks if kingside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn kingside_castle_allowed(self, colour: Colour) -> bool {
        self.allowed(CastlingSide::Kingside, colour)
    }
    /// Checks if queenside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn queenside_castle_allowed(self, colour: Colour) -> bool {
        self.allowed(CastlingSide::Queenside, colour)
    }

    /// Permanently revokes castling on `side` for a given colour.
    #[inline(always)]
    pub fn revoke(&mut self, side: CastlingSide, colour: Colour) {
        self.0 &= !Self::flag(side, colour)
    }

    /// Permanently revokes castling on both sides for a given colour.
    pub fn disallow(&mut self, colour: Colour) {
        self.revoke(CastlingSide::Kingside, colour);
        self.revoke(CastlingSide::Queenside, colour);
    }

    /// Revokes whatever right depends on a piece standing on `square`.
    ///
    /// Called with both squares of every move: a king or rook leaving its
    /// original square, or a rook being captured on it, loses the right.
    pub fn revoke_for_square(&mut self, square: Square) {
        for colour in Colour::COLOURS {
            if square == CastlingSide::king_origin(colour) {
                self.disallow(colour)
            }
            for side in CastlingSide::SIDES {
                if square == side.rook_origin(colour) {
                    self.revoke(side, colour)
                }
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Error)]
#[error("Invalid castling rights, expected '-' or a subset of 'KQkq'")]
pub struct CastlingRightsParseError;

impl FromStr for CastlingRights {
    type Err = CastlingRightsParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Self::none());
        }
        if s.is_empty() {
            return Err(CastlingRightsParseError);
        }
        let mut rights = 0;
        for c in s.chars() {
            rights |= match c {
                'k' => Self::KINGSIDE_BLACK,
                'q' => Self::QUEENSIDE_BLACK,
                'K' => Self::KINGSIDE_WHITE,
                'Q' => Self::QUEENSIDE_WHITE,
                _ => return Err(CastlingRightsParseError),
            }
        }
        Ok(Self(rights))
    }
}
impl std::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }

        for (colour, kingside, queenside) in [(Colour::White, 'K', 'Q'), (Colour::Black, 'k', 'q')]
        {
            if self.kingside_castle_allowed(colour) {
                write!(f, "{kingside}")?
            }
            if self.queenside_castle_allowed(colour) {
                write!(f, "{queenside}")?
            }
        }
        Ok(())
    }
}
