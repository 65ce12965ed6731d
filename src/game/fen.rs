//! # FEN string utilities
//! Only what is needed to set up and report positions: piece placement, side to
//! move, castling rights, en passant target and the two move counters.

use thiserror::Error;

use super::{
    board::Board,
    castling_rights::CastlingRights,
    colour::Colour,
    piece::{Piece, PieceKind},
    square::{Rank, Square},
};

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
/// FEN parsing errors.
pub enum FenError {
    #[error("Unexpected character at index {index}: {val}")]
    UnexpectedToken { index: usize, val: char },
    #[error("FEN string missing the {0} section")]
    Incomplete(&'static str),
    #[error("Found a non-ASCII character")]
    NonAscii,
    #[error("Failed to parse the {0} section")]
    ParseError(&'static str),
    #[error("Piece section only defines {0} squares out of 8")]
    IncompletePieceSection(u8),
    #[error("The piece section defines too many squares")]
    TooManySquares,
    #[error("Expected exactly one {colour} king, found {count}")]
    KingCount { colour: Colour, count: usize },
}

/// Decoded content of a FEN string.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Fen {
    pub board: Board,
    pub side_to_move: Colour,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_counter: u16,
}
impl Fen {
    /// FEN of the standard starting position.
    pub const INITIAL: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        fen.parse()
    }

    /// Piece placement section alone.
    pub fn placement(board: &Board) -> String {
        let mut placement = String::new();
        let mut empty = 0;
        for (i, square) in Square::squares_fen_iter().enumerate() {
            if i % 8 == 0 && i != 0 {
                if empty != 0 {
                    placement.push_str(&empty.to_string());
                    empty = 0
                }
                placement.push('/')
            }
            match board.get(square) {
                Some(piece) => {
                    if empty != 0 {
                        placement.push_str(&empty.to_string());
                        empty = 0
                    }
                    placement.push(piece.symbol())
                }
                None => empty += 1,
            }
        }
        if empty != 0 {
            placement.push_str(&empty.to_string())
        }
        placement
    }

    fn parse_placement(pieces_str: &str) -> Result<Board, FenError> {
        let mut board = Board::empty();
        let mut squares = Square::squares_fen_iter();
        let mut in_rank = 0u8;
        for (index, c) in pieces_str.chars().enumerate() {
            match c {
                '/' => {
                    if in_rank != 8 {
                        return Err(FenError::IncompletePieceSection(in_rank));
                    }
                    in_rank = 0
                }
                '1'..='8' => {
                    let skip = c as u8 - b'0';
                    in_rank += skip;
                    for _ in 0..skip {
                        squares.next().ok_or(FenError::TooManySquares)?;
                    }
                }
                c => {
                    let piece = Piece::try_from(c)
                        .map_err(|_| FenError::UnexpectedToken { index, val: c })?;
                    board.set(squares.next().ok_or(FenError::TooManySquares)?, Some(piece));
                    in_rank += 1
                }
            }
            if in_rank > 8 {
                return Err(FenError::TooManySquares);
            }
        }
        if in_rank != 8 || squares.next().is_some() {
            return Err(FenError::IncompletePieceSection(in_rank));
        }

        for colour in Colour::COLOURS {
            let count = board.count(Piece::new(PieceKind::King, colour));
            if count != 1 {
                return Err(FenError::KingCount { colour, count });
            }
        }
        Ok(board)
    }
}
impl std::str::FromStr for Fen {
    type Err = FenError;

    fn from_str(fen_str: &str) -> Result<Self, Self::Err> {
        if !fen_str.is_ascii() {
            return Err(FenError::NonAscii);
        }

        let mut sections = fen_str.split_ascii_whitespace();
        let board = Self::parse_placement(sections.next().ok_or(FenError::Incomplete("pieces"))?)?;

        let side_to_move = match sections.next() {
            Some("w") => Colour::White,
            Some("b") => Colour::Black,
            Some(_) => return Err(FenError::ParseError("side to move")),
            None => return Err(FenError::Incomplete("side to move")),
        };

        let castling_rights = sections
            .next()
            .ok_or(FenError::Incomplete("castling rights"))?
            .parse()
            .map_err(|_| FenError::ParseError("castling rights"))?;

        let en_passant = match sections.next().ok_or(FenError::Incomplete("en passant"))? {
            "-" => None,
            sq => {
                let sq: Square = sq.parse().map_err(|_| FenError::ParseError("en passant"))?;
                if !matches!(sq.rank(), Rank::Three | Rank::Six) {
                    return Err(FenError::ParseError("en passant"));
                }
                Some(sq)
            }
        };

        // Move counters are often left out, default to a fresh game.
        let halfmove_clock = match sections.next() {
            Some(s) => s.parse().map_err(|_| FenError::ParseError("halfmove clock"))?,
            None => 0,
        };
        let fullmove_counter = match sections.next() {
            Some(s) => s.parse().map_err(|_| FenError::ParseError("fullmove counter"))?,
            None => 1,
        };

        Ok(Self {
            board,
            side_to_move,
            castling_rights,
            en_passant,
            halfmove_clock,
            fullmove_counter,
        })
    }
}
impl std::fmt::Display for Fen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            Self::placement(&self.board),
            if self.side_to_move.is_white() { 'w' } else { 'b' },
            self.castling_rights,
            self.en_passant
                .map(|sq| sq.to_string())
                .unwrap_or_else(|| String::from("-")),
            self.halfmove_clock,
            self.fullmove_counter
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn initial_position_round_trip() {
        let fen = Fen::parse(Fen::INITIAL).unwrap();
        assert_eq!(fen.board, Board::initial());
        assert_eq!(fen.side_to_move, Colour::White);
        assert_eq!(fen.castling_rights, CastlingRights::full());
        assert_eq!(fen.to_string(), Fen::INITIAL);
    }

    #[test]
    fn counters_default_when_missing() {
        let fen = Fen::parse("r3k2r/8/8/8/8/8/8/R3K2R b Kq e3").unwrap();
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_counter, 1);
        assert_eq!(fen.en_passant, Some(Square::E3));
        assert_eq!(fen.to_string(), "r3k2r/8/8/8/8/8/8/R3K2R b Kq e3 0 1");
    }

    #[test]
    fn malformed_strings_are_rejected() {
        assert_eq!(Fen::parse(""), Err(FenError::Incomplete("pieces")));
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(FenError::Incomplete("side to move"))
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::IncompletePieceSection(7))
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::UnexpectedToken { index: 18, val: '9' })
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(FenError::ParseError("side to move"))
        );
    }

    #[test]
    fn positions_need_one_king_each() {
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::KingCount {
                colour: Colour::Black,
                count: 0
            })
        );
        assert_eq!(
            Fen::parse("k7/8/8/8/8/8/8/K3K3 w - - 0 1"),
            Err(FenError::KingCount {
                colour: Colour::White,
                count: 2
            })
        );
    }
}
