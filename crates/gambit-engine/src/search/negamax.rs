//! Negamax alpha-beta search with quiescence.

use gambit_core::{Move, MoveList, MoveMode, Position, generate_moves};

use crate::eval::evaluate;
use crate::search::control::SearchControl;
use crate::search::heuristics::{HistoryTable, KillerTable};
use crate::search::ordering::MovePicker;
use crate::search::pv::PvTable;
use crate::search::repetition::RepetitionTable;
use crate::search::tt::{Bound, TranspositionTable};

/// Score bound wider than any reachable score.
pub const INF: i32 = 50_000;

/// Score of the side to move being checkmated at the root.
pub const MATE_VALUE: i32 = 49_000;

/// Scores beyond this magnitude are mate scores.
pub const MATE_THRESHOLD: i32 = 48_000;

/// Maximum search ply; sizes the PV and killer tables.
pub const MAX_PLY: usize = 64;

/// Score of a repeated position or stalemate.
pub const DRAW: i32 = 0;

/// Moves searched at full depth before late move reductions apply.
const FULL_DEPTH_MOVES: u32 = 4;

/// Minimum remaining depth for late move reductions.
const REDUCTION_LIMIT: i32 = 3;

/// Extra depth removed by null-move pruning.
const NULL_MOVE_REDUCTION: i32 = 2;

/// Per-search mutable state.
pub(super) struct SearchContext<'a> {
    pub pos: &'a mut Position,
    pub tt: &'a mut TranspositionTable,
    pub repetition: &'a mut RepetitionTable,
    pub control: &'a SearchControl,
    pub pv: PvTable,
    pub killers: KillerTable,
    pub history: HistoryTable,
    pub nodes: u64,
    /// Distance from the root of the node being searched.
    pub ply: usize,
    /// Principal variation of the last completed iteration.
    pub prev_pv: Vec<Move>,
    /// Whether the current path still matches `prev_pv`.
    pub follow_pv: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        pos: &'a mut Position,
        tt: &'a mut TranspositionTable,
        repetition: &'a mut RepetitionTable,
        control: &'a SearchControl,
    ) -> Self {
        Self {
            pos,
            tt,
            repetition,
            control,
            pv: PvTable::new(),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            nodes: 0,
            ply: 0,
            prev_pv: Vec::new(),
            follow_pv: false,
        }
    }

    /// The previous PV move for this ply, if the path so far follows that PV
    /// and the move is in `list`. Leaving the PV turns following off for the
    /// rest of the iteration.
    fn pv_move(&mut self, list: &MoveList) -> Option<Move> {
        if !self.follow_pv {
            return None;
        }
        match self.prev_pv.get(self.ply) {
            Some(&mv) if list.contains(mv) => Some(mv),
            _ => {
                self.follow_pv = false;
                None
            }
        }
    }
}

/// Negamax alpha-beta search (fail-hard).
///
/// Returns the score of `ctx.pos` for the side to move, clamped to
/// `[alpha, beta]`. When the stop flag is raised the return value is
/// meaningless and callers must discard it.
pub(super) fn negamax(ctx: &mut SearchContext<'_>, mut depth: i32, mut alpha: i32, beta: i32) -> i32 {
    ctx.pv.clear_ply(ctx.ply);

    let root = ctx.ply == 0;
    let hash = ctx.pos.hash();

    if !root && ctx.repetition.contains(hash) {
        return DRAW;
    }

    let pv_node = beta - alpha > 1;
    if !root
        && !pv_node
        && let Some(score) = ctx.tt.probe(hash, depth, alpha, beta, ctx.ply)
    {
        return score;
    }

    ctx.nodes += 1;
    if ctx.control.should_stop(ctx.nodes) {
        return 0;
    }

    if ctx.ply >= MAX_PLY - 1 {
        return evaluate(ctx.pos);
    }

    // Extending before the leaf test lets a checked leaf be scored as mate.
    let in_check = ctx.pos.in_check();
    if in_check {
        depth += 1;
    }

    if depth <= 0 {
        return quiesce(ctx, alpha, beta);
    }

    if depth >= 3 && !in_check && !root {
        let snapshot = ctx.pos.make_null_move();
        ctx.repetition.push(hash);
        ctx.ply += 1;
        let score = -negamax(ctx, depth - 1 - NULL_MOVE_REDUCTION, -beta, -beta + 1);
        ctx.ply -= 1;
        ctx.repetition.pop();
        ctx.pos.unmake_move(snapshot);

        if ctx.control.is_stopped() {
            return 0;
        }
        if score >= beta {
            return beta;
        }
    }

    let mut list = MoveList::new();
    generate_moves(ctx.pos, &mut list);
    let pv_move = ctx.pv_move(&list);
    let mut picker = MovePicker::new(ctx.pos, &list, pv_move, &ctx.killers, &ctx.history, ctx.ply);

    let mut bound = Bound::Upper;
    let mut searched: u32 = 0;

    while let Some(mv) = picker.pick_next() {
        let Some(snapshot) = ctx.pos.make_move(mv, MoveMode::AllMoves) else {
            continue;
        };
        ctx.repetition.push(hash);
        ctx.ply += 1;

        let score = if searched == 0 {
            -negamax(ctx, depth - 1, -beta, -alpha)
        } else {
            let reduce = searched >= FULL_DEPTH_MOVES
                && depth >= REDUCTION_LIMIT
                && !in_check
                && !mv.is_capture()
                && mv.promotion().is_none();

            // A reduced null-window probe first; anything that beats alpha
            // earns a full-depth null-window search, then a full re-search.
            let mut score = if reduce { -negamax(ctx, depth - 2, -alpha - 1, -alpha) } else { alpha + 1 };
            if score > alpha {
                score = -negamax(ctx, depth - 1, -alpha - 1, -alpha);
                if score > alpha && score < beta {
                    score = -negamax(ctx, depth - 1, -beta, -alpha);
                }
            }
            score
        };

        ctx.ply -= 1;
        ctx.repetition.pop();
        ctx.pos.unmake_move(snapshot);

        if ctx.control.is_stopped() {
            return 0;
        }

        searched += 1;

        if score > alpha {
            bound = Bound::Exact;
            alpha = score;
            ctx.pv.update(ctx.ply, mv);
            if !mv.is_capture() {
                ctx.history.reward(mv, depth);
            }

            if score >= beta {
                ctx.tt.store(hash, depth, beta, Bound::Lower, ctx.ply);
                if !mv.is_capture() {
                    ctx.killers.store(ctx.ply, mv);
                }
                return beta;
            }
        }
    }

    if searched == 0 {
        return if in_check { -MATE_VALUE + ctx.ply as i32 } else { DRAW };
    }

    ctx.tt.store(hash, depth, alpha, bound, ctx.ply);
    alpha
}

/// Capture-only search below the horizon (fail-hard).
pub(super) fn quiesce(ctx: &mut SearchContext<'_>, mut alpha: i32, beta: i32) -> i32 {
    ctx.pv.clear_ply(ctx.ply);

    ctx.nodes += 1;
    if ctx.control.should_stop(ctx.nodes) {
        return 0;
    }

    let stand_pat = evaluate(ctx.pos);
    if ctx.ply >= MAX_PLY - 1 {
        return stand_pat;
    }
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut list = MoveList::new();
    generate_moves(ctx.pos, &mut list);
    let mut picker = MovePicker::captures(ctx.pos, &list);

    while let Some(mv) = picker.pick_next() {
        let Some(snapshot) = ctx.pos.make_move(mv, MoveMode::CapturesOnly) else {
            continue;
        };
        ctx.ply += 1;
        let score = -quiesce(ctx, -beta, -alpha);
        ctx.ply -= 1;
        ctx.pos.unmake_move(snapshot);

        if ctx.control.is_stopped() {
            return 0;
        }

        if score > alpha {
            alpha = score;
            if score >= beta {
                return beta;
            }
        }
    }

    alpha
}
