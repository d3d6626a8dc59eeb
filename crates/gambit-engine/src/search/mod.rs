//! Iterative-deepening search.

pub mod control;
pub mod heuristics;
pub mod negamax;
pub mod ordering;
pub mod pv;
pub mod repetition;
pub mod tt;

use std::fmt;
use std::time::Duration;

use gambit_core::{Move, Position, legal_moves};
use tracing::debug;

use control::SearchControl;
use negamax::{INF, MATE_THRESHOLD, MATE_VALUE, MAX_PLY, SearchContext, negamax};
use repetition::RepetitionTable;
use tt::TranspositionTable;

/// Half-width of the aspiration window around the previous score.
pub const ASPIRATION_WINDOW: i32 = 50;

/// A root score as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScore {
    Centipawns(i32),
    /// Moves to mate; negative when the side to move is being mated.
    Mate(i32),
}

impl SearchScore {
    pub fn from_raw(score: i32) -> Self {
        if score > MATE_THRESHOLD {
            SearchScore::Mate((MATE_VALUE - score + 1) / 2)
        } else if score < -MATE_THRESHOLD {
            SearchScore::Mate(-(MATE_VALUE + score) / 2)
        } else {
            SearchScore::Centipawns(score)
        }
    }
}

/// UCI `score` payload: `cp 35` or `mate -2`.
impl fmt::Display for SearchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchScore::Centipawns(cp) => write!(f, "cp {cp}"),
            SearchScore::Mate(moves) => write!(f, "mate {moves}"),
        }
    }
}

/// Snapshot emitted after every completed iteration.
#[derive(Debug, Clone, Copy)]
pub struct IterationInfo<'a> {
    pub depth: u8,
    pub score: SearchScore,
    pub nodes: u64,
    pub elapsed: Duration,
    pub pv: &'a [Move],
}

/// Result of a completed search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move at the deepest completed iteration, or [`Move::NULL`]
    /// when the root has no legal move.
    pub best_move: Move,
    pub pv: Vec<Move>,
    /// Raw score in centipawns (mate scores beyond [`MATE_THRESHOLD`]).
    pub score: i32,
    pub nodes: u64,
    /// Depth of the last completed iteration, 0 if none completed.
    pub depth: u8,
}

impl SearchResult {
    pub fn search_score(&self) -> SearchScore {
        SearchScore::from_raw(self.score)
    }
}

/// Search `pos` by iterative deepening up to `max_depth`.
///
/// Each iteration uses an aspiration window of [`ASPIRATION_WINDOW`]
/// around the previous score; a score outside it repeats the iteration
/// with a full window. `on_iter` runs after every completed iteration. An
/// iteration interrupted by `control` is discarded.
pub fn iterative_deepening<F>(
    pos: &mut Position,
    tt: &mut TranspositionTable,
    repetition: &mut RepetitionTable,
    max_depth: u8,
    control: &SearchControl,
    mut on_iter: F,
) -> SearchResult
where
    F: FnMut(&IterationInfo<'_>),
{
    let max_depth = max_depth.clamp(1, (MAX_PLY - 1) as u8);
    let mut ctx = SearchContext::new(pos, tt, repetition, control);

    let mut result = SearchResult { best_move: Move::NULL, pv: Vec::new(), score: 0, nodes: 0, depth: 0 };
    let (mut alpha, mut beta) = (-INF, INF);

    for depth in 1..=max_depth {
        ctx.follow_pv = true;
        let mut score = negamax(&mut ctx, i32::from(depth), alpha, beta);

        if !control.is_stopped() && (score <= alpha || score >= beta) {
            debug!(depth, score, alpha, beta, "aspiration window missed, re-searching");
            ctx.follow_pv = true;
            score = negamax(&mut ctx, i32::from(depth), -INF, INF);
        }

        if control.is_stopped() {
            debug!(depth, "iteration interrupted");
            break;
        }

        alpha = score - ASPIRATION_WINDOW;
        beta = score + ASPIRATION_WINDOW;

        let pv = ctx.pv.root_line().to_vec();
        result = SearchResult {
            best_move: pv.first().copied().unwrap_or(Move::NULL),
            pv: pv.clone(),
            score,
            nodes: ctx.nodes,
            depth,
        };
        ctx.prev_pv = pv;

        let info = IterationInfo {
            depth,
            score: SearchScore::from_raw(score),
            nodes: ctx.nodes,
            elapsed: control.elapsed(),
            pv: &result.pv,
        };
        debug!(depth, score = %info.score, nodes = info.nodes, best = %result.best_move, "iteration complete");
        on_iter(&info);

        if result.best_move.is_null() {
            break;
        }
    }

    result.nodes = ctx.nodes;
    drop(ctx);

    // Stopped before depth 1 finished: still answer with a legal move.
    if result.best_move.is_null()
        && let Some(&mv) = legal_moves(pos).iter().next()
    {
        result.best_move = mv;
        result.pv = vec![mv];
    }

    result
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    use super::*;

    #[test]
    fn missed_aspiration_window_is_searched_again() {
        // White's only move is Kh2, after which Rh8 mates. Depth 1 sees a
        // rook deficit; depth 2 sees the mate, far below the window.
        let fen = "r7/8/8/8/8/8/5k2/7K w - - 0 1";
        let mut pos: Position = fen.parse().unwrap();
        let mut tt = TranspositionTable::new(1);
        let mut repetition = RepetitionTable::new();
        let control = SearchControl::new_infinite(Arc::new(AtomicBool::new(false)));
        let mut scores = Vec::new();
        let result = iterative_deepening(&mut pos, &mut tt, &mut repetition, 2, &control, |info| {
            scores.push(info.score);
        });

        let SearchScore::Centipawns(shallow) = scores[0] else {
            panic!("depth 1 reported {}", scores[0]);
        };
        assert!(shallow < -ASPIRATION_WINDOW);
        assert_eq!(scores[1], SearchScore::Mate(-1));
        assert_eq!(result.score, -MATE_VALUE + 2);
        assert_eq!(result.best_move.to_string(), "h1h2");

        // A single full-window search from scratch agrees.
        let mut fresh: Position = fen.parse().unwrap();
        let mut tt = TranspositionTable::new(1);
        let mut repetition = RepetitionTable::new();
        let mut ctx = SearchContext::new(&mut fresh, &mut tt, &mut repetition, &control);
        assert_eq!(negamax(&mut ctx, 2, -INF, INF), result.score);
    }

    #[test]
    fn mate_scores_convert_to_move_counts() {
        assert_eq!(SearchScore::from_raw(MATE_VALUE - 1), SearchScore::Mate(1));
        assert_eq!(SearchScore::from_raw(MATE_VALUE - 3), SearchScore::Mate(2));
        assert_eq!(SearchScore::from_raw(-MATE_VALUE + 2), SearchScore::Mate(-1));
        assert_eq!(SearchScore::from_raw(-MATE_VALUE + 4), SearchScore::Mate(-2));
        assert_eq!(SearchScore::from_raw(-35), SearchScore::Centipawns(-35));
    }

    #[test]
    fn score_display() {
        assert_eq!(SearchScore::Centipawns(12).to_string(), "cp 12");
        assert_eq!(SearchScore::Mate(-3).to_string(), "mate -3");
    }
}
