//! # Move generation
//! Moves are first generated from piece geometry alone (pseudo-legal moves),
//! then filtered by playing each of them on a scratch copy of the position and
//! rejecting those that leave the mover's own king attacked.
//!
//! Castling is the exception: its safety conditions (not castling out of,
//! through, or into check) are checked at generation time, since they are not
//! about where the king ends up.

use super::{
    attacks,
    board::InvariantViolation,
    castling_rights::CastlingSide,
    colour::Colour,
    moves::{Move, MoveList},
    piece::{Piece, PieceKind},
    position::Position,
    square::{Delta, Square},
};

#[inline(always)]
fn push(moves: &mut MoveList, mv: Move) {
    let pushed = moves.push(mv);
    debug_assert!(pushed.is_ok(), "move list overflow while adding {mv}");
}

impl Position {
    /// Generates every move the piece on `origin` could make according to how it
    /// moves, without considering whether its own king would be left in check.
    ///
    /// Returns an empty list for an empty square.
    pub fn pseudo_legal_moves(&self, origin: Square) -> MoveList {
        let mut moves = MoveList::new();
        let Some(piece) = self.board.get(origin) else {
            return moves;
        };

        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(origin, piece.colour, &mut moves),
            PieceKind::Knight => {
                self.step_moves(origin, piece.colour, &Delta::KNIGHT_DELTAS, &mut moves)
            }
            PieceKind::Bishop => {
                self.slider_moves(origin, piece.colour, &Delta::DIAGONAL_DELTAS, &mut moves)
            }
            PieceKind::Rook => {
                self.slider_moves(origin, piece.colour, &Delta::ORTHOGONAL_DELTAS, &mut moves)
            }
            PieceKind::Queen => {
                self.slider_moves(origin, piece.colour, &Delta::QUEEN_DELTAS, &mut moves)
            }
            PieceKind::King => {
                self.step_moves(origin, piece.colour, &Delta::QUEEN_DELTAS, &mut moves);
                self.castling_moves(origin, piece.colour, &mut moves)
            }
        }
        moves
    }

    fn step_moves(&self, origin: Square, colour: Colour, deltas: &[Delta], moves: &mut MoveList) {
        for &delta in deltas {
            if let Some(target) = origin.translate(delta) {
                if self.board.get(target).map_or(true, |p| p.colour != colour) {
                    push(moves, Move::new(origin, target))
                }
            }
        }
    }

    fn slider_moves(&self, origin: Square, colour: Colour, deltas: &[Delta], moves: &mut MoveList) {
        for &delta in deltas {
            for target in origin.ray(delta) {
                match self.board.get(target) {
                    None => push(moves, Move::new(origin, target)),
                    Some(blocker) => {
                        if blocker.colour != colour {
                            push(moves, Move::new(origin, target))
                        }
                        break;
                    }
                }
            }
        }
    }

    fn pawn_moves(&self, origin: Square, colour: Colour, moves: &mut MoveList) {
        let promotion_rank = colour.promotion_rank();
        let mut add = |target: Square| {
            if target.rank() == promotion_rank {
                for mv in Move::new_promotions(origin, target) {
                    push(moves, mv)
                }
            } else {
                push(moves, Move::new(origin, target))
            }
        };

        let (forward, east, west) = Delta::pawn_deltas(colour);
        if let Some(single) = origin.translate(forward) {
            if self.board.get(single).is_none() {
                add(single);
                if origin.rank() == colour.pawn_rank() {
                    if let Some(double) = single.translate(forward) {
                        if self.board.get(double).is_none() {
                            add(double)
                        }
                    }
                }
            }
        }

        for target in [east, west].into_iter().filter_map(|d| origin.translate(d)) {
            match self.board.get(target) {
                Some(victim) if victim.colour != colour => add(target),
                Some(_) => {}
                None => {
                    // En passant only belongs to the side to move, and needs the
                    // pawn that just double pushed beside us.
                    let passed = Square::new(target.file(), origin.rank());
                    if self.en_passant == Some(target)
                        && colour == self.side_to_move
                        && self.board.get(passed) == Some(Piece::new(PieceKind::Pawn, colour.inverse()))
                    {
                        add(target)
                    }
                }
            }
        }
    }

    fn castling_moves(&self, origin: Square, colour: Colour, moves: &mut MoveList) {
        if origin != CastlingSide::king_origin(colour) {
            return;
        }
        let back_rank = origin.rank();
        let rook = Some(Piece::new(PieceKind::Rook, colour));
        for side in CastlingSide::SIDES {
            let possible = self.castling_rights.allowed(side, colour)
                && self.board.get(side.rook_origin(colour)) == rook
                && side
                    .between_files()
                    .iter()
                    .all(|&file| self.board.get(Square::new(file, back_rank)).is_none())
                && side
                    .king_path(colour)
                    .into_iter()
                    .all(|sq| !attacks::is_attacked(&self.board, sq, colour.inverse()));
            if possible {
                push(moves, Move::new(origin, side.king_target(colour)))
            }
        }
    }

    /// Generates the legal moves of the piece on `origin`.
    ///
    /// Squares that are empty or hold a piece of the side not to move have no
    /// legal moves.
    ///
    /// # Errors
    /// Fails if a king is missing from the board.
    pub fn legal_moves(&self, origin: Square) -> Result<MoveList, InvariantViolation> {
        let mut legal = MoveList::new();
        match self.board.get(origin) {
            Some(piece) if piece.colour == self.side_to_move => {}
            _ => return Ok(legal),
        }

        for mv in self.pseudo_legal_moves(origin) {
            let mut scratch = *self;
            scratch.make(mv)?;
            if attacks::is_in_check(&scratch.board, self.side_to_move)? {
                log::trace!("{mv} rejected, it leaves the {} king in check", self.side_to_move);
            } else {
                push(&mut legal, mv)
            }
        }
        Ok(legal)
    }

    /// Generates every legal move of the side to move.
    pub fn all_legal_moves(&self) -> Result<Vec<Move>, InvariantViolation> {
        let mut moves = Vec::new();
        for (origin, _) in self.board.pieces_of(self.side_to_move) {
            moves.extend(self.legal_moves(origin)?)
        }
        Ok(moves)
    }

    /// Checks if the side to move has at least one legal move.
    pub fn has_legal_move(&self) -> Result<bool, InvariantViolation> {
        for (origin, _) in self.board.pieces_of(self.side_to_move) {
            if !self.legal_moves(origin)?.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn targets(position: &Position, origin: Square) -> Vec<Square> {
        let mut targets: Vec<_> = position
            .legal_moves(origin)
            .unwrap()
            .iter()
            .map(|mv| mv.to)
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    #[test]
    fn initial_position_has_twenty_moves() {
        let pos = Position::initial();
        assert_eq!(pos.all_legal_moves().unwrap().len(), 20);
        assert_eq!(targets(&pos, Square::G1), vec![Square::F3, Square::H3]);
        assert_eq!(targets(&pos, Square::E2), vec![Square::E3, Square::E4]);
        assert!(targets(&pos, Square::D1).is_empty());
        // Black pieces cannot move on white's turn.
        assert!(targets(&pos, Square::E7).is_empty());
        assert_eq!(pos.pseudo_legal_moves(Square::E7).len(), 2);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        let pos = Position::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert!(targets(&pos, Square::E2).is_empty());
        assert!(!pos.pseudo_legal_moves(Square::E2).is_empty());
    }

    #[test]
    fn promotions_are_expanded() {
        let pos = Position::from_fen("1n5k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let moves = pos.legal_moves(Square::A7).unwrap();
        assert_eq!(moves.len(), 8);
        assert!(moves.contains(&Move::new_promotion(Square::A7, Square::B8, PieceKind::Knight)));
    }

    #[test]
    fn en_passant_discovering_check_is_illegal() {
        // Taking en passant would remove both pawns from the fifth rank and
        // expose the white king to the rook.
        let pos = Position::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1").unwrap();
        assert!(pos.pseudo_legal_moves(Square::E5).contains(&Move::new(Square::E5, Square::D6)));
        assert_eq!(targets(&pos, Square::E5), vec![Square::E6]);
    }

    #[test]
    fn en_passant_needs_the_passed_pawn() {
        let pos = Position::from_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(targets(&pos, Square::E5), vec![Square::E6]);
    }

    #[test]
    fn castling_through_attack_is_illegal() {
        // The bishop on a6 covers f1.
        let pos = Position::from_fen("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let king = targets(&pos, Square::E1);
        assert!(!king.contains(&Square::G1));
        assert!(king.contains(&Square::C1));
    }

    #[test]
    fn castling_out_of_check_is_illegal() {
        let pos = Position::from_fen("4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let king = targets(&pos, Square::E1);
        assert!(!king.contains(&Square::G1));
        assert!(!king.contains(&Square::C1));
    }

    #[test]
    fn blocked_castling_is_illegal() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1").unwrap();
        let king = targets(&pos, Square::E1);
        assert!(king.contains(&Square::G1));
        assert!(!king.contains(&Square::C1));
    }

    #[test]
    fn queenside_castling_allows_an_attacked_b_file() {
        let pos = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(targets(&pos, Square::E1).contains(&Square::C1));
    }

    #[test]
    fn checkmated_side_has_no_moves() {
        let pos =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert_eq!(pos.has_legal_move(), Ok(false));
        assert!(pos.all_legal_moves().unwrap().is_empty());
    }
}
