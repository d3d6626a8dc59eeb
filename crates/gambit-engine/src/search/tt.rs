//! Direct-mapped transposition table.
//!
//! One entry per slot, indexed by `key % len`. Every store overwrites the
//! slot, so a collision simply evicts the older position.
//!
//! Mate scores are stored relative to the node that wrote them and turned
//! back into root-relative distances on probe; see [`score_to_tt`].

use tracing::debug;

use crate::search::negamax::MATE_THRESHOLD;

/// Bound type stored in a TT entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Bound {
    /// Empty slot.
    #[default]
    None,
    /// The stored score is exact.
    Exact,
    /// The search failed high: the true score is at least the stored one.
    Lower,
    /// The search failed low: the true score is at most the stored one.
    Upper,
}

#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    key: u64,
    score: i32,
    depth: u8,
    bound: Bound,
}

/// Convert a root-relative score into node-relative form for storage.
///
/// A mate found `n` plies below the node is stored as mate in `n` no matter
/// how deep in the tree the node sits.
pub fn score_to_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score > MATE_THRESHOLD {
        score + ply
    } else if score < -MATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

/// Reverse [`score_to_tt`] for a probe at `ply`.
pub fn score_from_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score > MATE_THRESHOLD {
        score - ply
    } else if score < -MATE_THRESHOLD {
        score + ply
    } else {
        score
    }
}

/// Fixed-capacity hash table of search results.
pub struct TranspositionTable {
    entries: Vec<Entry>,
}

impl TranspositionTable {
    /// Default size used by a fresh engine.
    pub const DEFAULT_MB: usize = 16;

    /// Allocate a table of roughly `mb` megabytes (at least one entry).
    pub fn new(mb: usize) -> Self {
        let entries = Self::capacity_for(mb);
        debug!(mb, entries, "allocating transposition table");
        Self { entries: vec![Entry::default(); entries] }
    }

    fn capacity_for(mb: usize) -> usize {
        (mb * 1024 * 1024 / std::mem::size_of::<Entry>()).max(1)
    }

    /// Reallocate to `mb` megabytes, dropping all entries.
    pub fn resize(&mut self, mb: usize) {
        *self = Self::new(mb);
    }

    /// Empty every slot, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.fill(Entry::default());
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn slot(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    /// Look up `key` for a node at `ply` searched to `depth` in `(alpha, beta)`.
    ///
    /// Returns a score only when the entry matches, was searched at least as
    /// deep, and its bound settles the window: an exact score, an upper
    /// bound at or below `alpha` (returns `alpha`), or a lower bound at or
    /// above `beta` (returns `beta`).
    pub fn probe(&self, key: u64, depth: i32, alpha: i32, beta: i32, ply: usize) -> Option<i32> {
        let entry = &self.entries[self.slot(key)];
        if entry.bound == Bound::None || entry.key != key || i32::from(entry.depth) < depth {
            return None;
        }

        let score = score_from_tt(entry.score, ply);
        match entry.bound {
            Bound::Exact => Some(score),
            Bound::Upper if score <= alpha => Some(alpha),
            Bound::Lower if score >= beta => Some(beta),
            _ => None,
        }
    }

    /// Record a search result, replacing whatever occupied the slot.
    pub fn store(&mut self, key: u64, depth: i32, score: i32, bound: Bound, ply: usize) {
        let slot = self.slot(key);
        self.entries[slot] = Entry {
            key,
            score: score_to_tt(score, ply),
            depth: depth.clamp(0, i32::from(u8::MAX)) as u8,
            bound,
        };
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MB)
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable").field("entries", &self.entries.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::negamax::MATE_VALUE;

    #[test]
    fn entry_is_16_bytes() {
        assert_eq!(std::mem::size_of::<Entry>(), 16);
    }

    #[test]
    fn store_and_probe_exact() {
        let mut tt = TranspositionTable::new(1);
        let key = 0xDEAD_BEEF_1234_5678;
        tt.store(key, 5, 37, Bound::Exact, 0);
        assert_eq!(tt.probe(key, 5, -100, 100, 0), Some(37));
        assert_eq!(tt.probe(key, 3, -100, 100, 0), Some(37));
    }

    #[test]
    fn shallower_entry_is_not_used() {
        let mut tt = TranspositionTable::new(1);
        tt.store(42, 2, 10, Bound::Exact, 0);
        assert_eq!(tt.probe(42, 3, -100, 100, 0), None);
    }

    #[test]
    fn miss_and_key_mismatch() {
        let mut tt = TranspositionTable::new(1);
        assert_eq!(tt.probe(7, 0, -100, 100, 0), None);
        let len = tt.len() as u64;
        tt.store(7, 4, 10, Bound::Exact, 0);
        // Same slot, different key.
        assert_eq!(tt.probe(7 + len, 1, -100, 100, 0), None);
    }

    #[test]
    fn collision_overwrites() {
        let mut tt = TranspositionTable::new(1);
        let len = tt.len() as u64;
        tt.store(9, 10, 50, Bound::Exact, 0);
        tt.store(9 + len, 1, -20, Bound::Exact, 0);
        assert_eq!(tt.probe(9, 1, -100, 100, 0), None);
        assert_eq!(tt.probe(9 + len, 1, -100, 100, 0), Some(-20));
    }

    #[test]
    fn bounds_only_settle_matching_windows() {
        let mut tt = TranspositionTable::new(1);
        tt.store(1, 4, 30, Bound::Upper, 0);
        assert_eq!(tt.probe(1, 4, 40, 60, 0), Some(40));
        assert_eq!(tt.probe(1, 4, 10, 60, 0), None);

        tt.store(2, 4, 80, Bound::Lower, 0);
        assert_eq!(tt.probe(2, 4, 10, 60, 0), Some(60));
        assert_eq!(tt.probe(2, 4, 10, 90, 0), None);
    }

    #[test]
    fn mate_scores_shift_with_ply() {
        let mut tt = TranspositionTable::new(1);
        // Stored at ply 3: mate delivered 2 plies below that node (5 from root).
        let at_store = MATE_VALUE - 5;
        tt.store(77, 6, at_store, Bound::Exact, 3);
        // The same node reached at ply 7 is a mate 9 plies from root.
        assert_eq!(tt.probe(77, 6, -MATE_VALUE, MATE_VALUE, 7), Some(MATE_VALUE - 9));
        assert_eq!(tt.probe(77, 6, -MATE_VALUE, MATE_VALUE, 3), Some(at_store));

        tt.store(78, 6, -MATE_VALUE + 4, Bound::Exact, 4);
        assert_eq!(tt.probe(78, 6, -MATE_VALUE, MATE_VALUE, 1), Some(-MATE_VALUE + 1));
    }

    #[test]
    fn ordinary_scores_are_not_shifted() {
        assert_eq!(score_to_tt(120, 9), 120);
        assert_eq!(score_from_tt(-300, 9), -300);
    }

    #[test]
    fn clear_and_resize() {
        let mut tt = TranspositionTable::new(1);
        tt.store(5, 3, 1, Bound::Exact, 0);
        tt.clear();
        assert_eq!(tt.probe(5, 0, -10, 10, 0), None);
        let small = tt.len();
        tt.resize(2);
        assert_eq!(tt.len(), small * 2);
    }
}
