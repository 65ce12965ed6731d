//! Main API to represent and interact with a chess position.
//!
//! A [`Position`] is a board together with everything needed to know which moves
//! are legal on it: side to move, castling rights, en passant target, and the
//! move counters. Move generation lives in [`movegen`](super::movegen).

use thiserror::Error;

use super::{
    attacks,
    board::{Board, InvariantViolation},
    castling_rights::{CastlingRights, CastlingSide},
    colour::Colour,
    fen::{Fen, FenError},
    moves::{AppliedMove, Move, SanMove, SanMoveKind},
    piece::{Piece, PieceKind},
    square::Square,
    status::GameResult,
    zobrist,
};

/// The part of a position that decides whether it repeats an earlier one.
///
/// Two signatures are equal only if every field matches. Hashing uses the
/// position's Zobrist key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Signature {
    board: Board,
    side_to_move: Colour,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
}
impl Signature {
    /// Zobrist key of the signed position.
    pub fn zobrist_key(&self) -> u64 {
        let mut hash = 0;
        for (square, piece) in self.board.pieces() {
            hash ^= zobrist::piece_hash(piece, square)
        }
        if self.side_to_move.is_black() {
            hash ^= zobrist::side_to_move_hash()
        }
        hash ^= zobrist::castling_rights_hash(self.castling_rights);
        if let Some(ep) = self.en_passant {
            hash ^= zobrist::en_passant_file_hash(ep.file())
        }
        hash
    }
}
impl std::hash::Hash for Signature {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.zobrist_key())
    }
}

/// Reasons a move request can be refused.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum MoveError {
    #[error("There is no piece on {0}")]
    NoPieceSelected(Square),
    #[error("The piece on {square} is {colour}, but it is {side_to_move}'s turn")]
    NotYourTurn {
        square: Square,
        colour: Colour,
        side_to_move: Colour,
    },
    #[error("{0} is not a legal move")]
    IllegalMove(Move),
    #[error("The game is over ({0})")]
    GameOver(GameResult),
    #[error(transparent)]
    InvariantViolation(#[from] InvariantViolation),
}

/// Represents a valid chess position and defines an API to interact with said
/// position (making and generating moves, reading FEN strings, etc).
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Colour,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
}
impl Default for Position {
    /// The initial position of chess.
    fn default() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Colour::White,
            castling_rights: CastlingRights::full(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}
impl Position {
    /// The initial position of chess.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Creates a position from a FEN string.
    /// # Errors
    /// This function returns an error if the FEN string passed is invalid or badly
    /// formatted, or if it does not have exactly one king per side.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fen: Fen = fen.parse()?;
        Ok(Self {
            board: fen.board,
            side_to_move: fen.side_to_move,
            castling_rights: fen.castling_rights,
            en_passant: fen.en_passant,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_counter,
        })
    }

    /// Returns a FEN string describing the position.
    pub fn fen(&self) -> String {
        Fen {
            board: self.board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_counter: self.fullmove_number,
        }
        .to_string()
    }

    /// Read-only view of the board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece sitting on a given square if any.
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    /// Returns the current side to move.
    #[inline]
    pub fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    /// Returns the remaining castling rights.
    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Square skipped by a pawn double push on the previous move, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Number of half-moves since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Starts at 1 and is incremented after each black move.
    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Checks if the side to move is in check.
    pub fn in_check(&self) -> Result<bool, InvariantViolation> {
        attacks::is_in_check(&self.board, self.side_to_move)
    }

    /// Makes a move on the board, modifying the position.
    ///
    /// A promoting move given without a promotion kind promotes to a queen.
    ///
    /// # Errors
    /// This function returns an error if the move is illegal, in which case the
    /// position is left untouched.
    pub fn apply(&mut self, mv: Move) -> Result<AppliedMove, MoveError> {
        let legal = self.legal_moves(mv.from)?;
        let mv = legal
            .iter()
            .copied()
            .find(|candidate| {
                candidate.to == mv.to
                    && (candidate.promotion == mv.promotion
                        || (mv.promotion.is_none()
                            && candidate.promotion == Some(PieceKind::Queen)))
            })
            .ok_or(MoveError::IllegalMove(mv))?;

        let mut next = *self;
        let mut applied = next.make(mv)?;
        applied.gives_check = attacks::is_in_check(&next.board, next.side_to_move)?;
        *self = next;
        Ok(applied)
    }

    /// Plays a move without checking its legality.
    ///
    /// The move must at least be pseudo-legal, otherwise the position will be
    /// left in an inconsistent state. `gives_check` is never computed here.
    pub(crate) fn make(&mut self, mv: Move) -> Result<AppliedMove, InvariantViolation> {
        let origin = mv.from;
        let target = mv.to;
        let moved = self
            .board
            .take(origin)
            .ok_or(InvariantViolation::EmptyOrigin(origin))?;
        let colour = moved.colour;
        let is_pawn = moved.kind == PieceKind::Pawn;

        let is_en_passant = is_pawn
            && self.en_passant == Some(target)
            && origin.file() != target.file()
            && self.board.get(target).is_none();
        let captured = if is_en_passant {
            self.board.take(Square::new(target.file(), origin.rank()))
        } else {
            self.board.get(target)
        };

        let castling = if moved.kind == PieceKind::King && origin == CastlingSide::king_origin(colour)
        {
            CastlingSide::SIDES
                .into_iter()
                .find(|side| side.king_target(colour) == target)
        } else {
            None
        };

        let promotion = if is_pawn && target.rank() == colour.promotion_rank() {
            Some(mv.promotion.unwrap_or(PieceKind::Queen))
        } else {
            None
        };
        let placed = Piece::new(promotion.unwrap_or(moved.kind), colour);
        self.board.set(target, Some(placed));

        if let Some(side) = castling {
            let rook = self.board.take(side.rook_origin(colour));
            self.board.set(side.rook_target(colour), rook);
        }

        self.castling_rights.revoke_for_square(origin);
        self.castling_rights.revoke_for_square(target);

        self.en_passant = if is_pawn && (origin.rank() as u8).abs_diff(target.rank() as u8) == 2 {
            Square::from_coords(
                origin.file() as u8,
                (origin.rank() as u8 + target.rank() as u8) / 2,
            )
        } else {
            None
        };

        if is_pawn || captured.is_some() {
            self.halfmove_clock = 0
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1)
        }
        if colour.is_black() {
            self.fullmove_number = self.fullmove_number.saturating_add(1)
        }
        self.side_to_move.invert();

        Ok(AppliedMove {
            mv: Move {
                from: origin,
                to: target,
                promotion,
            },
            moved,
            captured,
            is_en_passant,
            castling,
            gives_check: false,
        })
    }

    /// Tries to convert a legal [`Move`] into a [`SanMove`].
    ///
    /// This does not encode check/checkmate information into the resulting
    /// [`SanMove`], which can only be known once the move is played.
    ///
    /// # Errors
    /// Returns an error if `mv` is not legal in this position.
    pub fn san(&self, mv: Move) -> Result<SanMove, MoveError> {
        let moved = self
            .piece_on(mv.from)
            .ok_or(MoveError::NoPieceSelected(mv.from))?;
        if !self.legal_moves(mv.from)?.contains(&mv) {
            return Err(MoveError::IllegalMove(mv));
        }

        let move_kind = match moved.kind {
            PieceKind::King if (mv.from.file() as u8).abs_diff(mv.to.file() as u8) == 2 => {
                if mv.to.file() > mv.from.file() {
                    SanMoveKind::KingSideCastle
                } else {
                    SanMoveKind::QueenSideCastle
                }
            }
            PieceKind::Pawn if mv.from.file() != mv.to.file() => SanMoveKind::PawnCapture {
                origin_file: mv.from.file(),
                target: mv.to,
                promoting_to: mv.promotion,
            },
            PieceKind::Pawn => SanMoveKind::PawnPush {
                target: mv.to,
                promoting_to: mv.promotion,
            },
            moving_piece => {
                let mut candidates = vec![];
                for (origin, piece) in self.board.pieces_of(moved.colour) {
                    if piece.kind == moving_piece
                        && origin != mv.from
                        && self.legal_moves(origin)?.iter().any(|m| m.to == mv.to)
                    {
                        candidates.push(origin)
                    }
                }

                let (origin_file, origin_rank) = if candidates.is_empty() {
                    (None, None)
                } else if candidates.iter().all(|o| o.file() != mv.from.file()) {
                    (Some(mv.from.file()), None)
                } else if candidates.iter().all(|o| o.rank() != mv.from.rank()) {
                    (None, Some(mv.from.rank()))
                } else {
                    (Some(mv.from.file()), Some(mv.from.rank()))
                };
                SanMoveKind::PieceMove {
                    moving_piece,
                    origin_file,
                    origin_rank,
                    is_capture: self.board.get(mv.to).is_some(),
                    target: mv.to,
                }
            }
        };

        Ok(SanMove {
            move_kind,
            check: None,
        })
    }

    /// Signature identifying this position for repetition detection: the board,
    /// side to move, castling rights and en passant target.
    pub fn signature(&self) -> Signature {
        Signature {
            board: self.board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
        }
    }

    /// Checks if this position is drawn by the fifty-move rule.
    pub fn fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Checks if neither side has the material to deliver checkmate.
    ///
    /// It checks for the following scenarios:
    /// - King vs King
    /// - King + Minor piece vs King
    /// - Kings and any number of bishops, all standing on squares of one colour
    pub fn insufficient_material(&self) -> bool {
        let others: Vec<_> = self
            .board
            .pieces()
            .filter(|(_, piece)| piece.kind != PieceKind::King)
            .collect();

        match others.as_slice() {
            [] => true,
            [(_, piece)] if piece.kind.is_minor() => true,
            [(first, _), ..] => others.iter().all(|(square, piece)| {
                piece.kind == PieceKind::Bishop && square.is_light() == first.is_light()
            }),
        }
    }
}
impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self.board)?;
        writeln!(f, "side to move: {}", self.side_to_move)?;
        writeln!(f, "castling rights: {}", self.castling_rights)?;
        writeln!(
            f,
            "en passant: {}",
            self.en_passant
                .map(|sq| sq.to_string())
                .unwrap_or_else(|| "-".to_string())
        )?;
        writeln!(f, "halfmove clock: {}", self.halfmove_clock)?;
        write!(f, "fen: {}", self.fen())
    }
}
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn play(position: &mut Position, moves: &[&str]) {
        for mv in moves {
            position.apply(mv.parse().unwrap()).unwrap();
        }
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let mut pos = Position::initial();
        let applied = pos.apply(Move::new(Square::E2, Square::E4)).unwrap();
        assert_eq!(pos.en_passant(), Some(Square::E3));
        assert_eq!(pos.side_to_move(), Colour::Black);
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
        assert!(!applied.is_capture());

        pos.apply(Move::new(Square::G8, Square::F6)).unwrap();
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.halfmove_clock(), 1);
        assert_eq!(pos.fullmove_number(), 2);
    }

    #[test]
    fn illegal_move_leaves_position_untouched() {
        let mut pos = Position::initial();
        let before = pos;
        assert_eq!(
            pos.apply(Move::new(Square::E2, Square::E5)),
            Err(MoveError::IllegalMove(Move::new(Square::E2, Square::E5)))
        );
        assert_eq!(pos, before);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let mut pos = Position::initial();
        play(&mut pos, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        let applied = pos.apply(Move::new(Square::E5, Square::D6)).unwrap();
        assert!(applied.is_en_passant);
        assert_eq!(
            applied.captured,
            Some(Piece::new(PieceKind::Pawn, Colour::Black))
        );
        assert_eq!(pos.piece_on(Square::D5), None);
        assert_eq!(
            pos.piece_on(Square::D6),
            Some(Piece::new(PieceKind::Pawn, Colour::White))
        );
    }

    #[test]
    fn castling_moves_the_rook() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let applied = pos.apply(Move::new(Square::E1, Square::G1)).unwrap();
        assert_eq!(applied.castling, Some(CastlingSide::Kingside));
        assert_eq!(
            pos.piece_on(Square::F1),
            Some(Piece::new(PieceKind::Rook, Colour::White))
        );
        assert_eq!(pos.piece_on(Square::H1), None);
        assert_eq!(pos.castling_rights().to_string(), "kq");

        pos.apply(Move::new(Square::E8, Square::C8)).unwrap();
        assert_eq!(
            pos.piece_on(Square::D8),
            Some(Piece::new(PieceKind::Rook, Colour::Black))
        );
        assert!(pos.castling_rights().is_none());
    }

    #[test]
    fn capturing_a_rook_revokes_its_right() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        pos.apply(Move::new(Square::A1, Square::A8)).unwrap();
        assert_eq!(pos.castling_rights().to_string(), "Kk");
    }

    #[test]
    fn missing_promotion_defaults_to_queen() {
        let mut pos = Position::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let applied = pos.apply(Move::new(Square::A7, Square::A8)).unwrap();
        assert_eq!(applied.mv.promotion, Some(PieceKind::Queen));
        assert_eq!(
            pos.piece_on(Square::A8),
            Some(Piece::new(PieceKind::Queen, Colour::White))
        );
        assert!(applied.gives_check);
    }

    #[test]
    fn san_disambiguation() {
        // Knights on b1 and f1 can both reach d2, rooks on a1 and a5 can both reach a3.
        let pos = Position::from_fen("4k3/8/8/R7/8/8/8/RN2KN2 w - - 0 1").unwrap();
        let san = |s: &str| pos.san(s.parse().unwrap()).unwrap().to_string();
        assert_eq!(san("b1d2"), "Nbd2");
        assert_eq!(san("f1g3"), "Ng3");
        assert_eq!(san("a1a3"), "R1a3");
        assert_eq!(san("a5a3"), "R5a3");
        assert_eq!(san("e1d1"), "Kd1");
        assert!(pos.san("e1e3".parse().unwrap()).is_err());
    }

    #[test]
    fn signature_tracks_side_rights_and_en_passant() {
        let initial = Position::initial();
        let mut knights = initial;
        play(&mut knights, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert_eq!(initial.signature(), knights.signature());

        let mut pushed = initial;
        play(&mut pushed, &["e2e4"]);
        let same_board = Position::from_fen(&pushed.fen().replace(" e3 ", " - ")).unwrap();
        assert_ne!(pushed.signature(), same_board.signature());
        assert_ne!(
            pushed.signature().zobrist_key(),
            same_board.signature().zobrist_key()
        );
    }

    #[test]
    fn signatures_compare_every_field() {
        let initial = Position::initial();
        let mut moved = initial;
        play(&mut moved, &["g1f3"]);

        let forged = Signature {
            board: *moved.board(),
            ..initial.signature()
        };
        assert_ne!(forged, initial.signature());

        let mut counts = std::collections::HashMap::new();
        *counts.entry(initial.signature()).or_insert(0) += 1;
        *counts.entry(forged).or_insert(0) += 1;
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&initial.signature()], 1);
    }

    #[test]
    fn insufficient_material_cases() {
        for fen in [
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4KN2 w - - 0 1",
            "4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1",
        ] {
            assert!(Position::from_fen(fen).unwrap().insufficient_material(), "{fen}");
        }
        for fen in [
            "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/3NKN2 w - - 0 1",
            "4k1b1/8/8/8/8/8/8/2B1K3 w - - 0 1",
        ] {
            assert!(!Position::from_fen(fen).unwrap().insufficient_material(), "{fen}");
        }
    }
}
