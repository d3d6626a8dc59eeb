//! Time management: turn `go` parameters into search limits.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use gambit_core::Color;

use crate::search::control::SearchControl;
use crate::search::negamax::MAX_PLY;

/// Moves assumed to remain when the GUI sends no `movestogo`.
pub const DEFAULT_MOVES_TO_GO: u32 = 30;

/// Safety margin subtracted from every clock-derived budget.
pub const MOVE_OVERHEAD: Duration = Duration::from_millis(50);

/// What a `go` command asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub depth: Option<u8>,
    pub movetime: Option<Duration>,
    pub wtime: Option<Duration>,
    pub btime: Option<Duration>,
    pub winc: Option<Duration>,
    pub binc: Option<Duration>,
    pub movestogo: Option<u32>,
    pub infinite: bool,
}

impl SearchLimits {
    /// Limits for a fixed-depth search.
    pub fn depth(depth: u8) -> Self {
        Self { depth: Some(depth), ..Self::default() }
    }

    /// Limits for a fixed-time search.
    pub fn movetime(movetime: Duration) -> Self {
        Self { movetime: Some(movetime), ..Self::default() }
    }

    /// Deepest iteration to attempt.
    pub fn max_depth(&self) -> u8 {
        self.depth.unwrap_or((MAX_PLY - 1) as u8)
    }

    /// Thinking time for `side`, or `None` for no deadline.
    ///
    /// `infinite` wins over everything, then `movetime`, then the clock.
    pub fn time_budget(&self, side: Color) -> Option<Duration> {
        if self.infinite {
            return None;
        }
        if let Some(movetime) = self.movetime {
            return Some(movetime);
        }

        let (remaining, increment) = match side {
            Color::White => (self.wtime, self.winc),
            Color::Black => (self.btime, self.binc),
        };
        remaining.map(|remaining| {
            compute_budget(remaining, increment.unwrap_or(Duration::ZERO), self.movestogo)
        })
    }
}

/// Slice of the clock to spend on one move.
///
/// `remaining / moves_to_go + increment - overhead`, never more than the
/// clock minus the overhead and never below one millisecond.
pub fn compute_budget(remaining: Duration, increment: Duration, moves_to_go: Option<u32>) -> Duration {
    let moves_to_go = moves_to_go.unwrap_or(DEFAULT_MOVES_TO_GO).max(1);
    let budget = (remaining / moves_to_go + increment).saturating_sub(MOVE_OVERHEAD);
    let ceiling = remaining.saturating_sub(MOVE_OVERHEAD);
    budget.min(ceiling).max(Duration::from_millis(1))
}

/// Build a [`SearchControl`] for `limits` with `side` to move.
pub fn control_for(limits: &SearchLimits, side: Color, stopped: Arc<AtomicBool>) -> SearchControl {
    match limits.time_budget(side) {
        Some(budget) => SearchControl::new_timed(stopped, budget),
        None => SearchControl::new_infinite(stopped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_without_increment() {
        let budget = compute_budget(Duration::from_secs(300), Duration::ZERO, None);
        assert_eq!(budget, Duration::from_millis(10_000 - 50));
    }

    #[test]
    fn budget_with_increment_and_movestogo() {
        let budget = compute_budget(Duration::from_secs(60), Duration::from_secs(2), Some(10));
        assert_eq!(budget, Duration::from_millis(6_000 + 2_000 - 50));
    }

    #[test]
    fn budget_never_exceeds_the_clock() {
        let budget = compute_budget(Duration::from_millis(500), Duration::from_secs(5), Some(1));
        assert_eq!(budget, Duration::from_millis(450));
    }

    #[test]
    fn nearly_flagged_still_gets_a_millisecond() {
        assert_eq!(compute_budget(Duration::from_millis(20), Duration::ZERO, None), Duration::from_millis(1));
        assert_eq!(compute_budget(Duration::ZERO, Duration::ZERO, Some(0)), Duration::from_millis(1));
    }

    #[test]
    fn budget_uses_the_side_to_move_clock() {
        let limits = SearchLimits {
            wtime: Some(Duration::from_secs(30)),
            btime: Some(Duration::from_secs(300)),
            ..SearchLimits::default()
        };
        assert_eq!(limits.time_budget(Color::White), Some(Duration::from_millis(950)));
        assert_eq!(limits.time_budget(Color::Black), Some(Duration::from_millis(9_950)));
    }

    #[test]
    fn movetime_and_infinite_precedence() {
        let mut limits = SearchLimits::movetime(Duration::from_millis(250));
        limits.wtime = Some(Duration::from_secs(300));
        assert_eq!(limits.time_budget(Color::White), Some(Duration::from_millis(250)));
        limits.infinite = true;
        assert_eq!(limits.time_budget(Color::White), None);
    }

    #[test]
    fn depth_only_has_no_deadline() {
        let limits = SearchLimits::depth(6);
        assert_eq!(limits.max_depth(), 6);
        assert_eq!(limits.time_budget(Color::Black), None);
        let control = control_for(&limits, Color::Black, Arc::new(AtomicBool::new(false)));
        assert!(control.budget().is_none());
        assert_eq!(SearchLimits::default().max_depth(), 63);
    }
}
