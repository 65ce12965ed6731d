//! # Zobrist hashing keys and utilities
//! Keys used to hash position signatures: the board, side to move, castling
//! rights and en passant target.

use std::sync::LazyLock;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::{
    castling_rights::{CastlingRights, CastlingSide},
    colour::Colour,
    piece::{Piece, NUM_PIECES},
    square::{File, Square},
};

// We need :
// - one number from piece on each square (64 * 12)
// - one number for side to move
// - four numbers for castling rights
// - eight numbers for en passant file
const SIDE_TO_MOVE_OFFSET: usize = 64 * 12;
const CASTLING_RIGHTS_OFFSET: usize = SIDE_TO_MOVE_OFFSET + 1;
const EN_PASSANT_OFFSET: usize = CASTLING_RIGHTS_OFFSET + 4;
const NUM_KEYS: usize = EN_PASSANT_OFFSET + 8;

// Fixed seed so that signatures are stable from one run to the next.
const SEED: u64 = 0x5EED_C4E5_5B0A_4D00;

static ZOBRIST_KEYS: LazyLock<[u64; NUM_KEYS]> = LazyLock::new(|| {
    let mut rng = SmallRng::seed_from_u64(SEED);
    let mut keys = [0; NUM_KEYS];
    for key in &mut keys {
        *key = rng.gen()
    }
    keys
});

#[inline(always)]
pub fn piece_hash(piece: Piece, square: Square) -> u64 {
    let piece_index = piece.colour as usize * NUM_PIECES + piece.kind as usize;
    ZOBRIST_KEYS[piece_index * 64 + square as usize]
}
#[inline(always)]
pub fn side_to_move_hash() -> u64 {
    ZOBRIST_KEYS[SIDE_TO_MOVE_OFFSET]
}
#[inline(always)]
pub fn castling_rights_hash(rights: CastlingRights) -> u64 {
    let mut hash = 0;
    for colour in Colour::COLOURS {
        for side in CastlingSide::SIDES {
            if rights.allowed(side, colour) {
                hash ^= ZOBRIST_KEYS[CASTLING_RIGHTS_OFFSET + CastlingRights::index(side, colour)]
            }
        }
    }
    hash
}
#[inline(always)]
pub fn en_passant_file_hash(file: File) -> u64 {
    ZOBRIST_KEYS[EN_PASSANT_OFFSET + file as usize]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::piece::PieceKind;

    #[test]
    fn keys_are_distinct() {
        let white_pawn = Piece::new(PieceKind::Pawn, Colour::White);
        let black_pawn = Piece::new(PieceKind::Pawn, Colour::Black);
        assert_ne!(piece_hash(white_pawn, Square::E4), piece_hash(black_pawn, Square::E4));
        assert_ne!(piece_hash(white_pawn, Square::E4), piece_hash(white_pawn, Square::E5));
        assert_ne!(
            castling_rights_hash(CastlingRights::full()),
            castling_rights_hash(CastlingRights::none())
        );
        assert_eq!(castling_rights_hash(CastlingRights::none()), 0);
    }
}
