//! Move ordering: PV move, MVV-LVA captures, killers, then history.

use gambit_core::{MAX_MOVES, Move, MoveList, PieceKind, Position};

use crate::search::heuristics::{HistoryTable, KillerTable};

/// Rank of the previous iteration's PV move.
pub const PV_RANK: i32 = 20_000;
/// Added to every capture so captures outrank quiet moves.
pub const CAPTURE_BASE: i32 = 10_000;
/// Ranks of the first and second killer.
pub const KILLER_RANKS: [i32; 2] = [9_000, 8_000];

/// MVV-LVA values indexed by `[attacker][victim]`.
///
/// `100 * (victim + 1) + 5 - attacker`: the most valuable victim first, the
/// least valuable attacker breaking ties.
#[rustfmt::skip]
const MVV_LVA: [[i32; PieceKind::COUNT]; PieceKind::COUNT] = [
    // victim:  P    N    B    R    Q    K
    [105, 205, 305, 405, 505, 605], // attacker Pawn
    [104, 204, 304, 404, 504, 604], // attacker Knight
    [103, 203, 303, 403, 503, 603], // attacker Bishop
    [102, 202, 302, 402, 502, 602], // attacker Rook
    [101, 201, 301, 401, 501, 601], // attacker Queen
    [100, 200, 300, 400, 500, 600], // attacker King
];

/// MVV-LVA rank of a capture. En passant takes a pawn on a square other
/// than the target, so the victim defaults to a pawn.
fn capture_rank(pos: &Position, mv: Move) -> i32 {
    let victim = pos.piece_on(mv.target()).map_or(PieceKind::Pawn, |p| p.kind());
    CAPTURE_BASE + MVV_LVA[mv.piece().kind().index()][victim.index()]
}

/// Ordering rank of `mv` in the main search.
pub fn score_move(
    pos: &Position,
    mv: Move,
    pv_move: Option<Move>,
    killers: &KillerTable,
    history: &HistoryTable,
    ply: usize,
) -> i32 {
    if pv_move == Some(mv) {
        return PV_RANK;
    }
    if mv.is_capture() {
        return capture_rank(pos, mv);
    }
    match killers.slot_of(ply, mv) {
        Some(slot) => KILLER_RANKS[slot],
        None => history.score(mv),
    }
}

/// Incremental selection-sort picker over a scored move list.
pub struct MovePicker {
    moves: [Move; MAX_MOVES],
    scores: [i32; MAX_MOVES],
    len: usize,
    cursor: usize,
}

impl MovePicker {
    /// Picker over every move in `list`, ranked for the main search.
    pub fn new(
        pos: &Position,
        list: &MoveList,
        pv_move: Option<Move>,
        killers: &KillerTable,
        history: &HistoryTable,
        ply: usize,
    ) -> Self {
        Self::with_scores(list, |mv| score_move(pos, mv, pv_move, killers, history, ply))
    }

    /// Picker for quiescence: captures by MVV-LVA, quiet moves last.
    ///
    /// Quiet moves stay in the list; `make_move` in captures-only mode
    /// refuses them.
    pub fn captures(pos: &Position, list: &MoveList) -> Self {
        Self::with_scores(list, |mv| if mv.is_capture() { capture_rank(pos, mv) } else { 0 })
    }

    fn with_scores(list: &MoveList, mut rank: impl FnMut(Move) -> i32) -> Self {
        let mut picker = Self {
            moves: [Move::NULL; MAX_MOVES],
            scores: [0; MAX_MOVES],
            len: list.len(),
            cursor: 0,
        };
        for (i, &mv) in list.iter().enumerate() {
            picker.moves[i] = mv;
            picker.scores[i] = rank(mv);
        }
        picker
    }

    /// Yield the highest-ranked move not yet returned.
    pub fn pick_next(&mut self) -> Option<Move> {
        if self.cursor >= self.len {
            return None;
        }

        let mut best_idx = self.cursor;
        for i in (self.cursor + 1)..self.len {
            if self.scores[i] > self.scores[best_idx] {
                best_idx = i;
            }
        }

        self.moves.swap(self.cursor, best_idx);
        self.scores.swap(self.cursor, best_idx);

        let mv = self.moves[self.cursor];
        self.cursor += 1;
        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gambit_core::{Piece, find_uci_move, generate_moves};

    fn list_for(pos: &Position) -> MoveList {
        let mut list = MoveList::new();
        generate_moves(pos, &mut list);
        list
    }

    fn drain(mut picker: MovePicker) -> Vec<Move> {
        std::iter::from_fn(|| picker.pick_next()).collect()
    }

    #[test]
    fn pawn_takes_queen_beats_queen_takes_pawn() {
        let pxq = MVV_LVA[PieceKind::Pawn.index()][PieceKind::Queen.index()];
        let qxp = MVV_LVA[PieceKind::Queen.index()][PieceKind::Pawn.index()];
        assert!(pxq > qxp);
    }

    #[test]
    fn lighter_attacker_preferred_for_same_victim() {
        let rook = PieceKind::Rook.index();
        assert!(MVV_LVA[PieceKind::Pawn.index()][rook] > MVV_LVA[PieceKind::Knight.index()][rook]);
        assert!(MVV_LVA[PieceKind::Knight.index()][rook] > MVV_LVA[PieceKind::Queen.index()][rook]);
    }

    #[test]
    fn picker_yields_every_move_once() {
        let pos = Position::starting_position();
        let list = list_for(&pos);
        let picked = drain(MovePicker::new(
            &pos,
            &list,
            None,
            &KillerTable::new(),
            &HistoryTable::new(),
            0,
        ));
        assert_eq!(picked.len(), 20);
        assert!(picked.iter().all(|&mv| list.contains(mv)));
    }

    #[test]
    fn ranks_follow_pv_then_captures_then_killers_then_history() {
        // White queen d4 can take the e5 pawn; everything else is quiet.
        let pos: Position = "4k3/8/8/4p3/3Q4/8/8/4K3 w - - 0 1".parse().unwrap();
        let list = list_for(&pos);
        let pv = find_uci_move(&pos, "e1f2").unwrap();
        let killer = find_uci_move(&pos, "d4a1").unwrap();
        let favoured = find_uci_move(&pos, "d4g1").unwrap();
        let capture = find_uci_move(&pos, "d4e5").unwrap();

        let mut killers = KillerTable::new();
        killers.store(2, killer);
        let mut history = HistoryTable::new();
        history.reward(favoured, 5);

        let picked = drain(MovePicker::new(&pos, &list, Some(pv), &killers, &history, 2));
        assert_eq!(&picked[..4], &[pv, capture, killer, favoured]);
    }

    #[test]
    fn en_passant_ranks_as_pawn_takes_pawn() {
        let pos: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let ep = find_uci_move(&pos, "e5d6").unwrap();
        assert!(ep.is_en_passant());
        assert_eq!(capture_rank(&pos, ep), CAPTURE_BASE + 105);
    }

    #[test]
    fn capture_picker_takes_the_rook_before_the_pawn() {
        let pos: Position = "4k3/3r4/8/4p3/3Q4/8/8/4K3 w - - 0 1".parse().unwrap();
        let list = list_for(&pos);
        let picked = drain(MovePicker::captures(&pos, &list));
        assert_eq!(picked[0].to_string(), "d4d7");
        assert_eq!(picked[1].to_string(), "d4e5");
        assert!(picked[2..].iter().all(|mv| !mv.is_capture()));
        assert_eq!(picked[0].piece(), Piece::WHITE_QUEEN);
    }
}
