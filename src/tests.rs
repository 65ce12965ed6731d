use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

use crate::game::{
    attacks,
    board::InvariantViolation,
    colour::Colour,
    moves::Move,
    piece::{Piece, PieceKind},
    position::{MoveError, Position},
    square::Square,
    state::{Game, GameConfig, MoveOutcome},
    status::{DrawKind, GameResult, GameStatus},
};

fn play(game: &mut Game, moves: &[&str]) {
    for mv in moves {
        let mv: Move = mv.parse().unwrap();
        let outcome = game.attempt_move(mv.from, mv.to, mv.promotion);
        assert!(
            matches!(outcome, Ok(MoveOutcome::Played(_))),
            "{mv} was refused: {outcome:?}"
        );
    }
}

fn game_from(fen: &str) -> Game {
    Game::with_config(GameConfig::default().with_start_fen(fen)).unwrap()
}

#[test]
fn npo_for_enums() {
    use crate::game::square::{File, Rank};
    use std::mem::size_of;
    assert_eq!(size_of::<PieceKind>(), size_of::<Option<PieceKind>>());
    assert_eq!(size_of::<File>(), size_of::<Option<File>>());
    assert_eq!(size_of::<Rank>(), size_of::<Option<Rank>>());
    assert_eq!(size_of::<Square>(), size_of::<Option<Square>>());
    assert_eq!(size_of::<Piece>(), size_of::<Option<Piece>>());
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    let status = game.status();
    assert!(status.is_checkmate);
    assert!(status.is_check);
    assert!(!status.is_stalemate);
    assert!(!status.is_draw);
    assert_eq!(status.side_to_move, Colour::White);
    assert_eq!(game.result(), Some(GameResult::Checkmate(Colour::White)));
    assert_eq!(game.history(), vec!["f3", "e5", "g4", "Qh4#"]);

    for (square, _) in game.position().board().pieces_of(Colour::White) {
        assert!(game.position().legal_moves(square).unwrap().is_empty());
        assert!(game.legal_destinations(square).unwrap().is_empty());
    }
    assert_eq!(
        game.attempt_move(Square::E2, Square::E4, None),
        Err(MoveError::GameOver(GameResult::Checkmate(Colour::White)))
    );
}

#[test]
fn stalemate() {
    let mut game = game_from("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1");
    play(&mut game, &["f1f7"]);

    let status = game.status();
    assert_eq!(status.status, GameStatus::Stalemate);
    assert!(status.is_stalemate);
    assert!(!status.is_checkmate);
    assert!(!status.is_check);
    assert!(status.is_draw);
    assert_eq!(
        game.attempt_move(Square::H8, Square::G8, None),
        Err(MoveError::GameOver(GameResult::Draw(DrawKind::Stalemate)))
    );
}

#[test]
fn en_passant_is_only_available_immediately() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(game.position().en_passant(), Some(Square::D6));
    assert!(game.legal_destinations(Square::E5).unwrap().contains(&Square::D6));

    play(&mut game, &["h2h3", "h7h6"]);
    assert_eq!(game.position().en_passant(), None);
    assert_eq!(
        game.attempt_move(Square::E5, Square::D6, None),
        Err(MoveError::IllegalMove(Move::new(Square::E5, Square::D6)))
    );
    assert_eq!(game.legal_destinations(Square::E5).unwrap(), vec![Square::E6]);
}

#[test]
fn en_passant_capture_is_recorded() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "e5d6"]);
    assert_eq!(game.piece_at(Square::D5), None);
    assert_eq!(
        game.captured_pieces(Colour::White),
        vec![Piece::new(PieceKind::Pawn, Colour::Black)]
    );
    assert_eq!(game.history().last().map(String::as_str), Some("exd6"));
    assert!(game.last_move().is_some_and(|m| m.is_en_passant));
}

#[test]
fn moving_a_rook_revokes_castling_for_good() {
    let mut game = game_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    play(&mut game, &["h1h2", "a8a7", "h2h1", "a7a8"]);
    assert_eq!(game.position().castling_rights().to_string(), "Qk");
    assert_eq!(
        game.attempt_move(Square::E1, Square::G1, None),
        Err(MoveError::IllegalMove(Move::new(Square::E1, Square::G1)))
    );

    play(&mut game, &["e1c1"]);
    assert_eq!(
        game.attempt_move(Square::E8, Square::C8, None),
        Err(MoveError::IllegalMove(Move::new(Square::E8, Square::C8)))
    );
    play(&mut game, &["e8g8"]);
    assert_eq!(game.history()[4..], ["O-O-O", "O-O"]);
    assert!(game.position().castling_rights().is_none());
}

#[test]
fn fifty_move_rule() {
    let mut game = game_from("4k3/8/8/8/8/8/8/R3K3 w - - 98 60");
    play(&mut game, &["a1a2"]);
    assert!(!game.status().is_draw);
    play(&mut game, &["e8d8"]);

    let status = game.status();
    assert!(status.is_draw);
    assert!(!status.is_stalemate);
    assert_eq!(status.status, GameStatus::Draw(DrawKind::FiftyMoveRule));
    assert_eq!(game.position().halfmove_clock(), 100);
}

#[test]
fn pawn_moves_reset_the_halfmove_clock() {
    let mut game = game_from("4k3/4p3/8/8/8/8/8/R3K3 b - - 99 60");
    play(&mut game, &["e7e6"]);
    assert_eq!(game.position().halfmove_clock(), 0);
    assert!(!game.status().is_draw);
}

#[test]
fn promotion_requires_a_choice() {
    let mut game = game_from("7k/P7/8/8/8/8/8/K7 w - - 0 1");
    let before = *game.position();
    assert_eq!(
        game.attempt_move(Square::A7, Square::A8, None),
        Ok(MoveOutcome::PromotionRequired {
            from: Square::A7,
            to: Square::A8,
            colour: Colour::White
        })
    );
    assert_eq!(game.position(), &before);
    assert!(game.history().is_empty());

    let Ok(MoveOutcome::Played(applied)) =
        game.attempt_move(Square::A7, Square::A8, Some(PieceKind::Queen))
    else {
        panic!("promotion was not played")
    };
    let queen = Piece::new(PieceKind::Queen, Colour::White);
    assert_eq!(applied.placed(), queen);
    assert_eq!(applied.moved, Piece::new(PieceKind::Pawn, Colour::White));
    assert_eq!(applied.captured, None);
    assert_eq!(game.piece_at(Square::A8), Some(queen));
    assert_eq!(game.history(), vec!["a8=Q+"]);
}

#[test]
fn promotion_to_a_king_is_illegal() {
    let mut game = game_from("1n5k/P7/8/8/8/8/8/K7 w - - 0 1");
    assert_eq!(
        game.attempt_move(Square::A7, Square::B8, Some(PieceKind::King)),
        Err(MoveError::IllegalMove(Move::new_promotion(
            Square::A7,
            Square::B8,
            PieceKind::King
        )))
    );
    play(&mut game, &["a7b8r"]);
    assert_eq!(
        game.captured_pieces(Colour::White),
        vec![Piece::new(PieceKind::Knight, Colour::Black)]
    );
    assert_eq!(game.history(), vec!["axb8=R+"]);
}

#[test]
fn undo_restores_the_previous_state() {
    let moves = [
        "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1", "f6e4", "d2d4", "e5d4", "f1e1",
        "d7d5", "c4d5", "d8d5", "b1c3",
    ];
    let mut game = Game::new();
    for mv in moves {
        let before = *game.position();
        let history = game.history();
        play(&mut game, &[mv]);
        let undone = game.undo().unwrap().unwrap();
        assert_eq!(undone.mv.to_string(), mv);
        assert_eq!(game.position(), &before);
        assert_eq!(game.history(), history);
        play(&mut game, &[mv]);
    }
    assert_eq!(game.history().len(), moves.len());
}

#[test]
fn undo_clears_a_finished_game() {
    let mut game = Game::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    game.undo().unwrap();
    assert_eq!(game.result(), None);
    play(&mut game, &["d8g5"]);
    assert_eq!(game.status().status, GameStatus::InProgress);
}

#[test]
fn reset_returns_to_the_initial_position() {
    let mut game = game_from("4k3/8/8/8/8/8/8/R3K3 w - - 98 60");
    play(&mut game, &["a1a2"]);
    game.reset();
    assert_eq!(game.position(), &Position::initial());
    assert!(game.history().is_empty());
    assert_eq!(game.status().status, GameStatus::InProgress);
}

#[test]
fn executor_failures_leave_the_position_untouched() {
    let mut position = Position::initial();
    position.board.set(Square::E8, None);
    let before = position;
    assert_eq!(
        position.apply(Move::new(Square::E2, Square::E4)),
        Err(MoveError::InvariantViolation(InvariantViolation::MissingKing(
            Colour::Black
        )))
    );
    assert_eq!(position, before);
}

/// Plays random games and checks, independently of the move generator, that no
/// legal move ever leaves the mover in check.
#[test]
fn legal_moves_never_leave_the_king_in_check() {
    let mut rng = SmallRng::seed_from_u64(0xC4E55);
    for _ in 0..20 {
        let mut game = Game::new();
        for _ in 0..150 {
            if game.result().is_some() {
                break;
            }
            let position = *game.position();
            let moves = position.all_legal_moves().unwrap();
            for &mv in &moves {
                let mut next = position;
                next.apply(mv).unwrap();
                let king = next.board().find_king(position.side_to_move()).unwrap();
                assert!(
                    !attacks::is_attacked(next.board(), king, next.side_to_move()),
                    "{mv} leaves the king in check in {}",
                    position.fen()
                );
            }
            let Some(&mv) = moves.choose(&mut rng) else {
                panic!("no legal moves in an unfinished game: {}", position.fen())
            };
            game.attempt_move(mv.from, mv.to, mv.promotion).unwrap();
        }
    }
}
