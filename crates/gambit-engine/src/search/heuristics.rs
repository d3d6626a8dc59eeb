//! Killer move table and history heuristic for quiet move ordering.

use gambit_core::{Move, Piece};

use crate::search::negamax::MAX_PLY;

/// Two killer moves per ply: quiet moves that caused beta cutoffs.
pub struct KillerTable {
    slots: [[Move; 2]; MAX_PLY],
}

impl KillerTable {
    pub fn new() -> Self {
        Self { slots: [[Move::NULL; 2]; MAX_PLY] }
    }

    /// Store a killer at `ply`, shifting the previous first killer to slot 1.
    pub fn store(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        if self.slots[ply][0] != mv {
            self.slots[ply][1] = self.slots[ply][0];
            self.slots[ply][0] = mv;
        }
    }

    /// Which killer slot `mv` occupies at `ply`, if any.
    pub fn slot_of(&self, ply: usize, mv: Move) -> Option<usize> {
        if ply >= MAX_PLY || mv.is_null() {
            return None;
        }
        self.slots[ply].iter().position(|&killer| killer == mv)
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Cap on history scores, kept below the killer ranks.
pub const HISTORY_MAX: i32 = 7_999;

/// History heuristic indexed by `[piece][target]`.
///
/// Quiet moves that raise alpha earn `depth` points.
pub struct HistoryTable {
    table: [[i32; 64]; Piece::COUNT],
}

impl HistoryTable {
    pub fn new() -> Self {
        Self { table: [[0; 64]; Piece::COUNT] }
    }

    /// Reward `mv` for raising alpha at `depth`.
    pub fn reward(&mut self, mv: Move, depth: i32) {
        let entry = &mut self.table[mv.piece().index()][mv.target().index()];
        *entry = (*entry + depth.max(0)).min(HISTORY_MAX);
    }

    pub fn score(&self, mv: Move) -> i32 {
        self.table[mv.piece().index()][mv.target().index()]
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}
