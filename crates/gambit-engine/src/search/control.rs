//! Search control: stop flag and deadline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Decides when a running search must unwind.
///
/// The search polls [`should_stop`](SearchControl::should_stop) at every
/// node; the clock itself is only read every 2048 nodes. Once the deadline
/// passes the shared flag is raised, so every later check is a single load.
#[derive(Debug)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    start: Instant,
    budget: Option<Duration>,
}

impl SearchControl {
    /// Control that only answers to the external stop flag.
    pub fn new_infinite(stopped: Arc<AtomicBool>) -> Self {
        Self { stopped, start: Instant::now(), budget: None }
    }

    /// Control with a deadline `budget` from now.
    pub fn new_timed(stopped: Arc<AtomicBool>, budget: Duration) -> Self {
        Self { stopped, start: Instant::now(), budget: Some(budget) }
    }

    /// Check whether the search should abort.
    ///
    /// Returns `true` if the stop flag is set, or if `nodes` is a multiple
    /// of 2048 and the deadline has passed (which also raises the flag).
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.is_stopped() {
            return true;
        }

        if nodes & 2047 != 0 {
            return false;
        }

        if let Some(budget) = self.budget
            && self.elapsed() >= budget
        {
            self.stop();
            return true;
        }

        false
    }

    /// Whether the stop flag has been raised, without consulting the clock.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Raise the stop flag.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Time since this control was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinite_control_only_stops_on_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let control = SearchControl::new_infinite(Arc::clone(&flag));
        assert!(!control.should_stop(0));
        assert!(!control.should_stop(4096));
        flag.store(true, Ordering::Relaxed);
        assert!(control.should_stop(1));
    }

    #[test]
    fn expired_deadline_raises_the_flag_on_poll() {
        let flag = Arc::new(AtomicBool::new(false));
        let control = SearchControl::new_timed(Arc::clone(&flag), Duration::ZERO);
        // Off-interval node counts skip the clock.
        assert!(!control.should_stop(1));
        assert!(control.should_stop(2048));
        assert!(flag.load(Ordering::Relaxed));
        assert!(control.should_stop(1));
    }

    #[test]
    fn generous_deadline_keeps_running() {
        let flag = Arc::new(AtomicBool::new(false));
        let control = SearchControl::new_timed(flag, Duration::from_secs(3600));
        assert!(!control.should_stop(0));
        assert_eq!(control.budget(), Some(Duration::from_secs(3600)));
    }
}
