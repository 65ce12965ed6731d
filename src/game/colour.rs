//! Colours for each players and their pieces, and the board geometry that
//! depends on them.

use super::square::Rank;

/// Number of different colours (2).
pub const NUM_COLOURS: usize = 2;

/// Colour enumeration.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum Colour {
    White = 0,
    Black = 1,
}
impl Colour {
    /// Both colours, white first.
    pub const COLOURS: [Self; NUM_COLOURS] = [Colour::White, Colour::Black];

    /// Inverts the colour in place.
    #[inline]
    pub fn invert(&mut self) {
        *self = self.inverse()
    }

    /// Returns the inverse of this colour.
    #[inline]
    pub const fn inverse(&self) -> Self {
        if self.is_black() {
            Colour::White
        } else {
            Colour::Black
        }
    }

    /// Checks if the colour variant is white.
    #[inline]
    pub const fn is_white(&self) -> bool {
        matches!(self, Colour::White)
    }

    /// Checks if the colour variant is black.
    #[inline]
    pub const fn is_black(&self) -> bool {
        matches!(self, Colour::Black)
    }

    /// Rank the king and rooks of this colour start on.
    pub const fn back_rank(self) -> Rank {
        match self {
            Colour::White => Rank::One,
            Colour::Black => Rank::Eight,
        }
    }

    /// Rank pawns of this colour start on, and may push two squares from.
    pub const fn pawn_rank(self) -> Rank {
        match self {
            Colour::White => Rank::Two,
            Colour::Black => Rank::Seven,
        }
    }

    /// Rank on which pawns of this colour promote.
    pub const fn promotion_rank(self) -> Rank {
        self.inverse().back_rank()
    }
}
impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.is_white() { "white" } else { "black" })
    }
}
impl From<bool> for Colour {
    /// `true` is black, matching the case of FEN piece symbols.
    fn from(value: bool) -> Self {
        if value {
            Self::Black
        } else {
            Self::White
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ranks_mirror_each_other() {
        assert_eq!(Colour::White.back_rank(), Rank::One);
        assert_eq!(Colour::Black.pawn_rank(), Rank::Seven);
        assert_eq!(Colour::White.promotion_rank(), Rank::Eight);
        assert_eq!(Colour::Black.promotion_rank(), Rank::One);
        assert_eq!(Colour::White.inverse(), Colour::Black);
    }
}
