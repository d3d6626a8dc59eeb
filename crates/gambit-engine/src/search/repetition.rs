//! Repetition detection by position hash.

/// Hashes of the positions leading up to the current node.
///
/// Game history is pushed as moves are played; the search pushes the current
/// node's hash before each move and pops it after the unmake. A node whose
/// hash is already on the stack is treated as a draw.
#[derive(Debug, Clone, Default)]
pub struct RepetitionTable {
    keys: Vec<u64>,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self { keys: Vec::with_capacity(256) }
    }

    #[inline]
    pub fn push(&mut self, key: u64) {
        self.keys.push(key);
    }

    #[inline]
    pub fn pop(&mut self) {
        self.keys.pop();
    }

    /// Whether `key` occurred earlier on the path.
    #[inline]
    pub fn contains(&self, key: u64) -> bool {
        self.keys.contains(&key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
