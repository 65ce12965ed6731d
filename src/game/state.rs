//! # Game state machine
//! A [`Game`] owns the live position, the move history and the repetition
//! bookkeeping. [`Game::attempt_move`] is the only way to change it during
//! play, and every failed attempt leaves it untouched.

use std::collections::HashMap;

use super::{
    board::InvariantViolation,
    colour::Colour,
    fen::FenError,
    history::{History, HistoryEntry},
    moves::{AppliedMove, CheckKind, Move, MoveList},
    piece::{Piece, PieceKind},
    position::{MoveError, Position, Signature},
    square::Square,
    status::{DrawKind, GameResult, GameStatus, StatusReport},
};

/// What to do when a pawn reaches the last rank and no piece was chosen.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum PromotionPolicy {
    /// Report [`MoveOutcome::PromotionRequired`] and wait for the caller to
    /// retry with a piece.
    #[default]
    Ask,
    /// Promote to a queen.
    AutoQueen,
}

/// Builder pattern to configure a game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub promotion_policy: PromotionPolicy,
    pub start_fen: Option<String>,
}
impl GameConfig {
    /// Sets how missing promotion choices are handled.
    pub fn with_promotion_policy(mut self, policy: PromotionPolicy) -> Self {
        self.promotion_policy = policy;
        self
    }

    /// Starts the game from the given FEN instead of the initial position.
    pub fn with_start_fen(mut self, fen: impl Into<String>) -> Self {
        self.start_fen = Some(fen.into());
        self
    }
}

/// Successful result of [`Game::attempt_move`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum MoveOutcome {
    /// The move was played.
    Played(AppliedMove),
    /// The move is a promotion but no piece was chosen. Nothing was played,
    /// the move must be attempted again with a promotion kind.
    PromotionRequired {
        from: Square,
        to: Square,
        colour: Colour,
    },
}

/// A game of chess between two players.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    start: Position,
    position: Position,
    history: History,
    position_counts: HashMap<Signature, u8>,
    status: GameStatus,
    in_check: bool,
    fault: Option<InvariantViolation>,
}
impl Default for Game {
    fn default() -> Self {
        Self::from_position(GameConfig::default(), Position::initial())
    }
}
impl Game {
    /// A new game from the initial position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a game with a given configuration.
    /// # Errors
    /// Fails if the configuration holds an invalid starting FEN.
    pub fn with_config(config: GameConfig) -> Result<Self, FenError> {
        let start = match &config.start_fen {
            Some(fen) => Position::from_fen(fen)?,
            None => Position::initial(),
        };
        Ok(Self::from_position(config, start))
    }

    fn from_position(config: GameConfig, start: Position) -> Self {
        let mut game = Self {
            config,
            start,
            position: start,
            history: History::new(),
            position_counts: HashMap::from([(start.signature(), 1)]),
            status: GameStatus::InProgress,
            in_check: false,
            fault: None,
        };
        game.evaluate();
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Position the game started from, which moves are replayed from.
    pub fn start_position(&self) -> &Position {
        &self.start
    }

    /// Returns the piece on a given square, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.piece_on(square)
    }

    pub fn side_to_move(&self) -> Colour {
        self.position.side_to_move()
    }

    /// FEN of the current position.
    pub fn fen(&self) -> String {
        self.position.fen()
    }

    /// Legal moves of the piece on `square`. Empty once the game is over.
    /// # Errors
    /// Fails if the game is faulted.
    pub fn legal_moves(&self, square: Square) -> Result<MoveList, InvariantViolation> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        if self.status.is_terminal() {
            return Ok(MoveList::new());
        }
        self.position.legal_moves(square)
    }

    /// Squares the piece on `square` can move to, with promotion variants
    /// merged into a single target.
    pub fn legal_destinations(&self, square: Square) -> Result<Vec<Square>, InvariantViolation> {
        let mut targets: Vec<_> = self.legal_moves(square)?.iter().map(|mv| mv.to).collect();
        targets.sort_unstable();
        targets.dedup();
        Ok(targets)
    }

    /// Tries to play a move.
    ///
    /// A pawn move to the last rank without `promotion` returns
    /// [`MoveOutcome::PromotionRequired`] under [`PromotionPolicy::Ask`], and
    /// promotes to a queen under [`PromotionPolicy::AutoQueen`].
    ///
    /// # Errors
    /// The game is left untouched on error. [`MoveError::InvariantViolation`]
    /// additionally faults the game until [`Game::reset`].
    pub fn attempt_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome, MoveError> {
        let outcome = self.try_move(from, to, promotion);
        match &outcome {
            Err(MoveError::InvariantViolation(_)) => {}
            Err(err) => log::debug!("Rejected move from {from} to {to}: {err}"),
            Ok(MoveOutcome::PromotionRequired { .. }) => {
                log::debug!("Move from {from} to {to} needs a promotion choice")
            }
            Ok(MoveOutcome::Played(_)) => {}
        }
        outcome
    }

    fn try_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome, MoveError> {
        if let Some(fault) = self.fault {
            return Err(fault.into());
        }
        if let Some(result) = self.result() {
            return Err(MoveError::GameOver(result));
        }

        let piece = self
            .position
            .piece_on(from)
            .ok_or(MoveError::NoPieceSelected(from))?;
        let side_to_move = self.position.side_to_move();
        if piece.colour != side_to_move {
            return Err(MoveError::NotYourTurn {
                square: from,
                colour: piece.colour,
                side_to_move,
            });
        }

        let legal = self
            .position
            .legal_moves(from)
            .map_err(|v| self.set_fault(v))?;
        let requested = Move {
            from,
            to,
            promotion,
        };
        let promotes = legal
            .iter()
            .any(|mv| mv.to == to && mv.promotion.is_some());
        let mv = match promotion {
            None if promotes => match self.config.promotion_policy {
                PromotionPolicy::Ask => {
                    return Ok(MoveOutcome::PromotionRequired {
                        from,
                        to,
                        colour: side_to_move,
                    })
                }
                PromotionPolicy::AutoQueen => Move::new_promotion(from, to, PieceKind::Queen),
            },
            _ => requested,
        };
        if !legal.contains(&mv) {
            return Err(MoveError::IllegalMove(requested));
        }

        let mut san = self.position.san(mv).map_err(|e| self.escalate(e))?;
        let mut next = self.position;
        let applied = next.apply(mv).map_err(|e| self.escalate(e))?;

        self.position = next;
        let signature = next.signature();
        *self.position_counts.entry(signature).or_default() += 1;
        self.evaluate();

        san.check = if self.status == GameStatus::Checkmate {
            Some(CheckKind::Checkmate)
        } else if applied.gives_check {
            Some(CheckKind::Check)
        } else {
            None
        };
        self.history.push(HistoryEntry {
            applied,
            san,
            signature,
        });
        log::info!("{} played {san} ({applied})", applied.moved.colour);

        Ok(MoveOutcome::Played(applied))
    }

    /// Current status of the game.
    pub fn status(&self) -> StatusReport {
        StatusReport::new(self.position.side_to_move(), self.status, self.in_check)
    }

    /// Result of the game if it is over.
    pub fn result(&self) -> Option<GameResult> {
        self.status().result()
    }

    /// Whether an internal inconsistency stopped the game.
    pub fn fault(&self) -> Option<InvariantViolation> {
        self.fault
    }

    /// SAN of every move played, in order.
    pub fn history(&self) -> Vec<String> {
        self.history.san()
    }

    /// Full move log.
    pub fn moves(&self) -> &History {
        &self.history
    }

    pub fn last_move(&self) -> Option<&AppliedMove> {
        self.history.last().map(|entry| &entry.applied)
    }

    /// Pieces captured so far by the given colour.
    pub fn captured_pieces(&self, by: Colour) -> Vec<Piece> {
        self.history.captured_by(by)
    }

    /// Takes back the last move, returning it.
    ///
    /// The state is rebuilt by replaying the remaining moves from the starting
    /// position. Returns `Ok(None)` if no move has been played.
    pub fn undo(&mut self) -> Result<Option<AppliedMove>, MoveError> {
        if let Some(fault) = self.fault {
            return Err(fault.into());
        }
        let Some(undone) = self.history.last().copied() else {
            return Ok(None);
        };
        let replay: Vec<Move> = self
            .history
            .iter()
            .take(self.history.len() - 1)
            .map(|entry| entry.applied.mv)
            .collect();

        let mut position = self.start;
        let mut counts: HashMap<Signature, u8> = HashMap::from([(position.signature(), 1)]);
        for mv in replay {
            position.apply(mv).map_err(|e| self.escalate(e))?;
            *counts.entry(position.signature()).or_default() += 1;
        }
        self.history.pop();
        self.position = position;
        self.position_counts = counts;
        self.evaluate();

        log::info!("Took back {}", undone.san);
        Ok(Some(undone.applied))
    }

    /// Starts over from the standard initial position, keeping the
    /// configuration. Clears the history and any fault.
    pub fn reset(&mut self) {
        let config = std::mem::take(&mut self.config);
        *self = Self::from_position(config, Position::initial());
        log::info!("Game reset");
    }

    /// Recomputes the status from the current position.
    fn evaluate(&mut self) {
        match self.compute_status() {
            Ok((status, in_check)) => {
                if status.is_terminal() && status != self.status {
                    let report = StatusReport::new(self.position.side_to_move(), status, in_check);
                    log::info!("Game over: {report}")
                }
                self.status = status;
                self.in_check = in_check;
            }
            Err(violation) => {
                self.set_fault(violation);
            }
        }
    }

    fn compute_status(&self) -> Result<(GameStatus, bool), InvariantViolation> {
        let position = &self.position;
        let in_check = position.in_check()?;
        let has_move = position.has_legal_move()?;
        let repetitions = self
            .position_counts
            .get(&position.signature())
            .copied()
            .unwrap_or(0);

        let status = match (in_check, has_move) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            _ if repetitions >= 3 => GameStatus::Draw(DrawKind::Repetition),
            _ if position.fifty_move_draw() => GameStatus::Draw(DrawKind::FiftyMoveRule),
            _ if position.insufficient_material() => {
                GameStatus::Draw(DrawKind::InsufficientMaterial)
            }
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::InProgress,
        };
        Ok((status, in_check))
    }

    fn set_fault(&mut self, violation: InvariantViolation) -> MoveError {
        log::error!("Invariant violation, the game cannot continue: {violation}");
        self.fault = Some(violation);
        MoveError::InvariantViolation(violation)
    }

    /// Faults the game if the error is an invariant violation.
    fn escalate(&mut self, err: MoveError) -> MoveError {
        match err {
            MoveError::InvariantViolation(violation) => self.set_fault(violation),
            err => err,
        }
    }
}
