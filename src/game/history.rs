//! # History log
//! Ordered record of the moves played in a game. The log is enough to rebuild
//! any earlier state by replaying it from the starting position.

use super::{
    colour::Colour,
    moves::{AppliedMove, SanMove},
    piece::Piece,
    position::Signature,
};

/// A played move and how it is written down.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct HistoryEntry {
    pub applied: AppliedMove,
    pub san: SanMove,
    /// Signature of the position reached by this move.
    pub signature: Signature,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}
impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry)
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    /// SAN of every move, in the order they were played.
    pub fn san(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.san.to_string()).collect()
    }

    /// Pieces captured by the given colour, in the order they were taken.
    pub fn captured_by(&self, colour: Colour) -> Vec<Piece> {
        self.entries
            .iter()
            .filter(|e| e.applied.moved.colour == colour)
            .filter_map(|e| e.applied.captured)
            .collect()
    }

    /// Move list as numbered SAN pairs, like `1. e4 e5 2. Nf3`.
    ///
    /// `first_move_number` and `black_starts` describe the starting position of
    /// the game.
    pub fn numbered(&self, first_move_number: u16, black_starts: bool) -> String {
        let mut out = String::new();
        let mut number = first_move_number;
        let mut white_to_move = !black_starts;
        for (i, entry) in self.entries.iter().enumerate() {
            if white_to_move {
                if i != 0 {
                    out.push(' ')
                }
                out.push_str(&format!("{number}. {}", entry.san))
            } else if i == 0 {
                out.push_str(&format!("{number}... {}", entry.san))
            } else {
                out.push_str(&format!(" {}", entry.san))
            }
            if !white_to_move {
                number += 1
            }
            white_to_move = !white_to_move
        }
        out
    }
}
impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
