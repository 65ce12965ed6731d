//! # Perft testing/benchmarking
//! Counts the legal move paths of a given length from a position. Comparing the
//! counts with published reference values validates the move generator.

use std::time::Instant;

use super::{board::InvariantViolation, position::Position};

/// Builder pattern to configure a Perft test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerftConfig {
    pub depth: u8,
    pub iterative: bool,
    pub divide: bool,
    pub bench: bool,
}
impl PerftConfig {
    /// Sets the maximum depth of the perft run.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// If set to true, the run will start from all depth between 1 and the maximum.
    pub fn iterative_deepening(mut self, value: bool) -> Self {
        self.iterative = value;
        self
    }

    /// Shows perft results per legal move at the starting position.
    pub fn divide_moves(mut self, value: bool) -> Self {
        self.divide = value;
        self
    }

    /// Measures the time it takes to complete one depth.
    pub fn benchmark(mut self, value: bool) -> Self {
        self.bench = value;
        self
    }

    /// Runs a Perft test on the given position, writing results to `out`.
    ///
    /// Returns the node count of the deepest run.
    pub fn go(
        &self,
        position: &Position,
        out: &mut impl std::io::Write,
    ) -> Result<u64, PerftError> {
        let mut nodes = 0;
        let first = if self.iterative { 1 } else { self.depth.max(1) };
        for depth in first..=self.depth.max(1) {
            if self.iterative && self.divide {
                writeln!(out, "====== DEPTH {depth} ======")?
            }
            let start = Instant::now();
            nodes = 0;
            for mv in position.all_legal_moves()? {
                let mut next = *position;
                next.make(mv)?;
                let mv_nodes = perft(&next, depth - 1)?;
                if self.divide {
                    writeln!(out, "{mv}: {mv_nodes}")?
                }
                nodes += mv_nodes
            }
            let elapsed = start.elapsed().as_secs_f64();
            writeln!(out, "depth {depth}: {nodes} nodes")?;
            if self.bench {
                writeln!(
                    out,
                    "\ttook {} ({})",
                    human_readable_time(elapsed),
                    human_readable_nps(nodes as f64 / elapsed)
                )?
            }
        }
        Ok(nodes)
    }
}

/// Errors interrupting a perft run.
#[derive(Debug, thiserror::Error)]
pub enum PerftError {
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),
}

/// Traverses all nodes accessible from a given position, returning the number of
/// leaf nodes at `depth`.
pub fn perft(position: &Position, depth: u8) -> Result<u64, InvariantViolation> {
    if depth == 0 {
        return Ok(1);
    }
    let moves = position.all_legal_moves()?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }
    let mut nodes = 0;
    for mv in moves {
        let mut next = *position;
        next.make(mv)?;
        nodes += perft(&next, depth - 1)?
    }
    Ok(nodes)
}

fn human_readable_time(secs: f64) -> String {
    if secs < 0.001 {
        format!("{:.3}μs", secs * 1_000_000.)
    } else if secs < 1. {
        format!("{:.3}ms", secs * 1_000.)
    } else {
        format!("{secs:.3}s")
    }
}

fn human_readable_nps(nps: f64) -> String {
    if nps > 1_000_000. {
        format!("{:.3}Mnps", nps / 1_000_000.)
    } else if nps > 1_000. {
        format!("{:.3}Knps", nps / 1_000.)
    } else {
        format!("{nps:.3}nps")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn check_matching(fen: &str, expected: &[u64]) {
        let position = Position::from_fen(fen).unwrap();
        for (depth, expected) in expected.iter().enumerate() {
            let actual = perft(&position, depth as u8 + 1).unwrap();
            assert_eq!(
                actual,
                *expected,
                "Expected {expected} at depth {} for {fen}, but got {actual}",
                depth + 1,
            );
        }
    }

    #[test]
    fn initial_position_perft() {
        check_matching(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            &[20, 400, 8902],
        )
    }

    #[test]
    fn kiwipete_perft() {
        check_matching(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - ",
            &[48, 2039],
        )
    }

    #[test]
    fn endgame_perft() {
        check_matching("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - ", &[14, 191, 2812])
    }

    #[test]
    fn mirrored_perft() {
        let expected = [6, 264, 9467];
        check_matching(
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            &expected,
        );
        check_matching(
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
            &expected,
        )
    }

    #[test]
    fn buggy_perft() {
        check_matching(
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            &[44, 1486, 62379],
        )
    }

    #[test]
    #[ignore]
    fn deep_initial_position_perft() {
        check_matching(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            &[20, 400, 8902, 197281, 4865609],
        )
    }

    #[test]
    #[ignore]
    fn deep_kiwipete_perft() {
        check_matching(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - ",
            &[48, 2039, 97862, 4085603],
        )
    }

    #[test]
    fn divide_output() {
        let mut out = Vec::new();
        let nodes = PerftConfig::default()
            .with_depth(1)
            .divide_moves(true)
            .go(&Position::initial(), &mut out)
            .unwrap();
        assert_eq!(nodes, 20);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("e2e4: 1"));
        assert!(out.contains("depth 1: 20 nodes"));
    }
}
