//! # Text console
//! A line-based front-end to play a [`Game`] from a terminal, or from any pair of
//! reader and writer.
//!
//! The console holds no game logic: it parses commands, forwards them to the
//! game and prints what comes back. Rejected moves are reported and the console
//! keeps reading.

use std::io::{BufRead, BufReader, BufWriter, Read, Write};

use crate::game::{
    piece::PieceKind,
    state::{Game, MoveOutcome},
    square::Square,
};

pub mod commands;

use commands::{CommandError, ConsoleCommand, HELP};

pub struct ConsoleReader<I: Read> {
    inner: BufReader<I>,
}
impl<I: Read> ConsoleReader<I> {
    /// Creates a new reader over the given input stream.
    pub fn new(input: I) -> Self {
        Self {
            inner: BufReader::new(input),
        }
    }

    /// Reads one line, returning `None` at the end of the input.
    pub fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut buffer = String::new();
        if self.inner.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim().to_string()))
    }

    /// Reads a command, skipping blank lines.
    pub fn read_command(
        &mut self,
    ) -> std::io::Result<Option<Result<ConsoleCommand, CommandError>>> {
        loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(line) if line.is_empty() => continue,
                Some(line) => return Ok(Some(line.parse())),
            }
        }
    }
}

/// Runs the console until `quit` or the end of the input.
pub fn run(game: &mut Game, input: impl Read, output: impl Write) -> std::io::Result<()> {
    let mut reader = ConsoleReader::new(input);
    let mut out = BufWriter::new(output);

    writeln!(out, "{}", game.position().board())?;
    writeln!(out, "{}", game.status())?;
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let command = match reader.read_command()? {
            None => break,
            Some(Ok(command)) => command,
            Some(Err(e)) => {
                writeln!(out, "{e}, type 'help' for a list of commands")?;
                continue;
            }
        };
        log::debug!("Received command {command:?}");

        match command {
            ConsoleCommand::Play(mv) => {
                play(game, mv.from, mv.to, mv.promotion, &mut reader, &mut out)?
            }
            ConsoleCommand::Moves(square) => match game.legal_destinations(square) {
                Ok(targets) if targets.is_empty() => writeln!(out, "no moves from {square}")?,
                Ok(targets) => {
                    let targets: Vec<_> = targets.iter().map(Square::to_string).collect();
                    writeln!(out, "{}", targets.join(" "))?
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            ConsoleCommand::Undo => match game.undo() {
                Ok(Some(undone)) => {
                    writeln!(out, "took back {undone}")?;
                    writeln!(out, "{}", game.position().board())?
                }
                Ok(None) => writeln!(out, "no move to take back")?,
                Err(e) => writeln!(out, "{e}")?,
            },
            ConsoleCommand::Reset => {
                game.reset();
                writeln!(out, "{}", game.position().board())?
            }
            ConsoleCommand::Fen => writeln!(out, "{}", game.fen())?,
            ConsoleCommand::History => {
                let start = game.start_position();
                let numbered = game
                    .moves()
                    .numbered(start.fullmove_number(), start.side_to_move().is_black());
                writeln!(out, "{numbered}")?
            }
            ConsoleCommand::Status => writeln!(out, "{}", game.status())?,
            ConsoleCommand::Board => writeln!(out, "{}", game.position().board())?,
            ConsoleCommand::Help => writeln!(out, "{HELP}")?,
            ConsoleCommand::Quit => break,
        }
    }
    out.flush()
}

fn play<I: Read, O: Write>(
    game: &mut Game,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
    reader: &mut ConsoleReader<I>,
    out: &mut O,
) -> std::io::Result<()> {
    let outcome = match game.attempt_move(from, to, promotion) {
        Ok(MoveOutcome::PromotionRequired { colour, .. }) => {
            write!(out, "promote the {colour} pawn to (q/r/b/n)? ")?;
            out.flush()?;
            let choice = reader.read_line()?.unwrap_or_default();
            match choice.parse::<PieceKind>() {
                Ok(kind) if kind.is_valid_promotion_target() => {
                    game.attempt_move(from, to, Some(kind))
                }
                _ => {
                    writeln!(out, "no promotion chosen, move cancelled")?;
                    return Ok(());
                }
            }
        }
        outcome => outcome,
    };

    match outcome {
        Ok(MoveOutcome::Played(_)) => {
            let san = game.history().last().cloned().unwrap_or_default();
            writeln!(out, "{san}")?;
            writeln!(out, "{}", game.position().board())?;
            writeln!(out, "{}", game.status())
        }
        Ok(MoveOutcome::PromotionRequired { .. }) => {
            writeln!(out, "a promotion piece is needed")
        }
        Err(e) => writeln!(out, "{e}"),
    }
}
