//! Enumerations of chessboard accessing constants, such as files, ranks and squares.

use thiserror::Error;

use super::colour::Colour;

/// Files of a chessboard (A-H).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}
impl File {
    /// All files, from A to H.
    pub const FILES: [Self; 8] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    /// A file from a given index.
    ///
    /// Fails if the index is more than 7.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::FILES[index as usize])
        } else {
            None
        }
    }
}
impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}
impl TryFrom<char> for File {
    type Error = SquareParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            c @ 'a'..='h' => Ok(Self::FILES[(c as u8 - b'a') as usize]),
            _ => Err(SquareParseError),
        }
    }
}

/// Ranks of a chessboard (1-8).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}
impl Rank {
    /// All ranks, from one to eight.
    pub const RANKS: [Self; 8] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    /// A rank from a given index.
    ///
    /// Fails if the index is more than 7.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::RANKS[index as usize])
        } else {
            None
        }
    }
}
impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", 1 + *self as u8)
    }
}
impl TryFrom<char> for Rank {
    type Error = SquareParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '1'..='8' => Ok(Self::RANKS[(c as u8 - b'1') as usize]),
            _ => Err(SquareParseError),
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
#[error("Invalid square, expected a file (a-h) followed by a rank (1-8)")]
pub struct SquareParseError;

/// General square indexing for an 8x8 board, ordered from A1 to H8.
#[repr(u8)]
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}
impl Square {
    #[rustfmt::skip]
    const SQUARES: [Self; 64] = {
        use Square::*;
        [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ]
    };

    /// Instantiates a new square based on file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::SQUARES[(rank as usize) << 3 | file as usize]
    }

    /// Instantiates a new square from its index.
    ///
    /// Returns `None` if the index is more than 63.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Self::SQUARES[index as usize])
        } else {
            None
        }
    }

    /// Instantiates a square from raw file and rank coordinates (0-7 each).
    #[inline]
    pub const fn from_coords(file: u8, rank: u8) -> Option<Self> {
        match (File::from_index(file), Rank::from_index(rank)) {
            (Some(file), Some(rank)) => Some(Self::new(file, rank)),
            _ => None,
        }
    }

    /// Returns the rank of the square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::RANKS[(self as usize) >> 3]
    }
    /// Returns the file of the square.
    #[inline]
    pub const fn file(self) -> File {
        File::FILES[(self as usize) & 7]
    }

    /// Checks if this is a light square (h1 is light, a1 is dark).
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.file() as u8 + self.rank() as u8) % 2 == 1
    }

    /// Translates this square by a given delta.
    ///
    /// Returns `None` if the translation would go out of the board.
    #[inline]
    pub const fn translate(self, delta: Delta) -> Option<Self> {
        let (df, dr) = delta.offsets();
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if file < 0 || rank < 0 {
            None
        } else {
            Self::from_coords(file as u8, rank as u8)
        }
    }

    /// Walks from this square in the direction of `delta`, excluding the starting
    /// square, until the edge of the board.
    pub fn ray(self, delta: Delta) -> impl Iterator<Item = Self> {
        std::iter::successors(self.translate(delta), move |sq| sq.translate(delta))
    }

    /// An iterator over all squares, ordered from A1 to H8.
    pub fn squares_iter() -> impl Iterator<Item = Self> {
        Self::SQUARES.into_iter()
    }

    /// An iterator over all squares, ordered in big-endian rank/little-endian file.
    pub fn squares_fen_iter() -> impl Iterator<Item = Self> {
        Rank::RANKS
            .into_iter()
            .rev()
            .flat_map(|rank| File::FILES.into_iter().map(move |file| Square::new(file, rank)))
    }
}
impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}
impl std::str::FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => {
                Ok(Self::new(File::try_from(file)?, Rank::try_from(rank)?))
            }
            _ => Err(SquareParseError),
        }
    }
}

/// Deltas represent directions in which pieces can move.
///
/// They can be applied to [Square]s through [`Square::translate`] to obtain the
/// target of the translation following this delta.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Delta {
    North,
    South,
    East,
    West,

    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,

    KnightNorthEast,
    KnightNorthWest,
    KnightSouthEast,
    KnightSouthWest,
    KnightEastNorth,
    KnightWestNorth,
    KnightEastSouth,
    KnightWestSouth,
}
impl Delta {
    pub const KNIGHT_DELTAS: [Self; 8] = [
        Self::KnightNorthEast,
        Self::KnightNorthWest,
        Self::KnightSouthEast,
        Self::KnightSouthWest,
        Self::KnightEastNorth,
        Self::KnightWestNorth,
        Self::KnightEastSouth,
        Self::KnightWestSouth,
    ];
    pub const ORTHOGONAL_DELTAS: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];
    pub const DIAGONAL_DELTAS: [Self; 4] = [
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];
    pub const QUEEN_DELTAS: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// (file, rank) offsets of this delta.
    pub const fn offsets(self) -> (i8, i8) {
        match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::NorthEast => (1, 1),
            Self::NorthWest => (-1, 1),
            Self::SouthEast => (1, -1),
            Self::SouthWest => (-1, -1),
            Self::KnightNorthEast => (1, 2),
            Self::KnightNorthWest => (-1, 2),
            Self::KnightSouthEast => (1, -2),
            Self::KnightSouthWest => (-1, -2),
            Self::KnightEastNorth => (2, 1),
            Self::KnightWestNorth => (-2, 1),
            Self::KnightEastSouth => (2, -1),
            Self::KnightWestSouth => (-2, -1),
        }
    }

    /// Push, and the two capture directions, of a pawn of the given colour.
    pub const fn pawn_deltas(colour: Colour) -> (Self, Self, Self) {
        match colour {
            Colour::White => (Self::North, Self::NorthEast, Self::NorthWest),
            Colour::Black => (Self::South, Self::SouthEast, Self::SouthWest),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coordinates_round_trip_through_index() {
        for sq in Square::squares_iter() {
            assert_eq!(Square::new(sq.file(), sq.rank()), sq);
            assert_eq!(Square::from_index(sq as u8), Some(sq));
        }
        assert_eq!(Square::from_index(64), None);
        assert_eq!(Square::from_coords(4, 3), Some(Square::E4));
        assert_eq!(Square::from_coords(8, 0), None);
    }

    #[test]
    fn translation_stops_at_the_edge() {
        assert_eq!(Square::A1.translate(Delta::West), None);
        assert_eq!(Square::A1.translate(Delta::KnightEastNorth), Some(Square::C2));
        assert_eq!(Square::H8.translate(Delta::North), None);
        assert_eq!(
            Square::D4.ray(Delta::NorthEast).collect::<Vec<_>>(),
            vec![Square::E5, Square::F6, Square::G7, Square::H8]
        );
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("e4".parse(), Ok(Square::E4));
        assert_eq!("H8".parse(), Ok(Square::H8));
        assert_eq!("i1".parse::<Square>(), Err(SquareParseError));
        assert_eq!("e44".parse::<Square>(), Err(SquareParseError));
        assert_eq!(Square::C7.to_string(), "c7");
    }

    #[test]
    fn fen_order_starts_on_a8() {
        let squares: Vec<_> = Square::squares_fen_iter().collect();
        assert_eq!(squares[0], Square::A8);
        assert_eq!(squares[7], Square::H8);
        assert_eq!(squares[63], Square::H1);
    }

    #[test]
    fn square_colours() {
        assert!(!Square::A1.is_light());
        assert!(Square::H1.is_light());
        assert!(Square::D1.is_light());
        assert!(!Square::E1.is_light());
    }
}
