//! Leaf-node counting for validating move generation.

use crate::make_move::MoveMode;
use crate::movegen::{MoveList, generate_moves};
use crate::position::Position;

/// Count the legal move paths of exactly `depth` plies from `pos`.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut list = MoveList::new();
    generate_moves(pos, &mut list);

    let mut nodes = 0;
    for &mv in list.iter() {
        let Some(snapshot) = pos.make_move(mv, MoveMode::AllMoves) else {
            continue;
        };
        nodes += perft(pos, depth - 1);
        pos.unmake_move(snapshot);
    }
    nodes
}

/// Per-root-move node counts, sorted by move text.
pub fn divide(pos: &mut Position, depth: u32) -> Vec<(String, u64)> {
    let mut list = MoveList::new();
    generate_moves(pos, &mut list);

    let mut results = Vec::with_capacity(list.len());
    for &mv in list.iter() {
        if let Some(snapshot) = pos.make_move(mv, MoveMode::AllMoves) {
            let nodes = perft(pos, depth.saturating_sub(1));
            pos.unmake_move(snapshot);
            results.push((mv.to_string(), nodes));
        }
    }
    results.sort();
    results
}
