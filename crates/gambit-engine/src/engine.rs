//! The [`Engine`]: one game's worth of board, history and search tables.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use gambit_core::{FenError, MoveMode, Position, find_uci_move};
use tracing::{debug, info, warn};

use crate::search::repetition::RepetitionTable;
use crate::search::tt::TranspositionTable;
use crate::search::{IterationInfo, SearchResult, iterative_deepening};
use crate::time::{SearchLimits, control_for};

/// Owns every piece of mutable engine state. Independent instances do not
/// interact.
#[derive(Debug)]
pub struct Engine {
    position: Position,
    repetition: RepetitionTable,
    tt: TranspositionTable,
}

impl Engine {
    /// Engine at the starting position with a default-sized hash table.
    pub fn new() -> Self {
        Self::with_hash_size(TranspositionTable::DEFAULT_MB)
    }

    pub fn with_hash_size(mb: usize) -> Self {
        Self {
            position: Position::starting_position(),
            repetition: RepetitionTable::new(),
            tt: TranspositionTable::new(mb),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Reset to the starting position and forget all cached results.
    pub fn new_game(&mut self) {
        self.load(Position::starting_position());
    }

    /// Load a position from the four position-bearing FEN fields.
    ///
    /// On error the current position is left untouched.
    pub fn set_position(
        &mut self,
        placement: &str,
        side: &str,
        castling: &str,
        en_passant: &str,
    ) -> Result<(), FenError> {
        let pos = Position::from_fields(placement, side, castling, en_passant)?;
        self.load(pos);
        Ok(())
    }

    /// Load a position from a full or four-field FEN string.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let pos: Position = fen.parse()?;
        self.load(pos);
        Ok(())
    }

    fn load(&mut self, pos: Position) {
        self.position = pos;
        self.repetition.clear();
        self.tt.clear();
        debug!(fen = %self.position, "position loaded");
    }

    /// Play a move given in UCI notation (`e2e4`, `e7e8q`).
    ///
    /// Returns `false` and changes nothing if the text matches no
    /// pseudo-legal move or the move leaves the king in check.
    pub fn apply_uci_move(&mut self, text: &str) -> bool {
        let Some(mv) = find_uci_move(&self.position, text) else {
            warn!(text, "no such move");
            return false;
        };
        let before = self.position.hash();
        if self.position.make_move(mv, MoveMode::AllMoves).is_none() {
            warn!(text, "illegal move");
            return false;
        }
        self.repetition.push(before);
        true
    }

    /// Search the current position.
    ///
    /// `stop` may be raised from another thread to end the search early;
    /// `on_iter` is called after every completed iteration.
    pub fn search<F>(&mut self, limits: &SearchLimits, stop: Arc<AtomicBool>, on_iter: F) -> SearchResult
    where
        F: FnMut(&IterationInfo<'_>),
    {
        let control = control_for(limits, self.position.side_to_move(), stop);
        debug!(depth = limits.max_depth(), budget = ?control.budget(), "search started");
        let result = iterative_deepening(
            &mut self.position,
            &mut self.tt,
            &mut self.repetition,
            limits.max_depth(),
            &control,
            on_iter,
        );
        debug!(best = %result.best_move, depth = result.depth, nodes = result.nodes, "search finished");
        result
    }

    /// Reallocate the hash table to `mb` megabytes.
    pub fn resize_hash(&mut self, mb: usize) {
        self.tt.resize(mb);
        info!(mb, entries = self.tt.len(), "hash resized");
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
