//! # Check detection
//! Attacks are computed from the geometry of each piece only. They never depend
//! on move legality, so check detection can be used while filtering legal moves
//! without recursing.
//!
//! Pawn pushes and castling are not attacks: a pawn only attacks the two squares
//! diagonally in front of it, whether they are occupied or not.

use super::{
    board::{Board, InvariantViolation},
    colour::Colour,
    piece::{Piece, PieceKind},
    square::{Delta, Square},
};

/// Checks if any piece of colour `by` attacks `square`.
pub fn is_attacked(board: &Board, square: Square, by: Colour) -> bool {
    let hits = |delta: Delta, kind: PieceKind| {
        square.translate(delta).and_then(|sq| board.get(sq)) == Some(Piece::new(kind, by))
    };

    // Pawns of `by` attack forward, so look backward from the attacked square
    // using the deltas of the other side.
    let (_, pawn_east, pawn_west) = Delta::pawn_deltas(by.inverse());
    if hits(pawn_east, PieceKind::Pawn) || hits(pawn_west, PieceKind::Pawn) {
        return true;
    }

    if Delta::KNIGHT_DELTAS
        .into_iter()
        .any(|delta| hits(delta, PieceKind::Knight))
    {
        return true;
    }

    if Delta::QUEEN_DELTAS
        .into_iter()
        .any(|delta| hits(delta, PieceKind::King))
    {
        return true;
    }

    let slider_hits = |delta: Delta, is_slider: fn(PieceKind) -> bool| {
        square
            .ray(delta)
            .find_map(|sq| board.get(sq))
            .is_some_and(|piece| piece.colour == by && is_slider(piece.kind))
    };
    Delta::ORTHOGONAL_DELTAS
        .into_iter()
        .any(|delta| slider_hits(delta, PieceKind::is_orthogonal_slider))
        || Delta::DIAGONAL_DELTAS
            .into_iter()
            .any(|delta| slider_hits(delta, PieceKind::is_diagonal_slider))
}

/// Checks if the king of the given colour is attacked.
///
/// # Errors
/// Fails if that king is missing from the board.
pub fn is_in_check(board: &Board, colour: Colour) -> Result<bool, InvariantViolation> {
    let king = board.find_king(colour)?;
    Ok(is_attacked(board, king, colour.inverse()))
}
