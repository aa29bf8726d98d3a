//! Wall-clock budgets.
use std::time::Instant;

/// A wall-clock budget measured from a fixed start instant.
///
/// Budgets are polled, never enforced: work started before the deadline runs to completion.
#[derive(Copy, Clone, Debug)]
pub struct Budget {
    start: Instant,
    seconds: f64,
}

impl Budget {
    /// Start a budget of `seconds` now.
    pub fn start(seconds: f64) -> Budget {
        Budget {
            start: Instant::now(),
            seconds,
        }
    }

    /// The total budget in seconds.
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Seconds elapsed since the start.
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Seconds left until the deadline, negative once it has passed.
    pub fn remaining(&self) -> f64 {
        self.seconds - self.elapsed()
    }

    /// Whether more than `guard` seconds are left.
    pub fn has_time(&self, guard: f64) -> bool {
        self.remaining() > guard
    }
}

/// Pair of the global run budget and the budget of the current track.
///
/// A scaling loop may only start another iteration when both have time left.
#[derive(Copy, Clone, Debug)]
pub struct TrackBudget<'a> {
    pub global: &'a Budget,
    pub local: Budget,
    pub guard: f64,
}

impl<'a> TrackBudget<'a> {
    /// Start a track budget of `seconds` below the global budget.
    pub fn start(global: &'a Budget, seconds: f64, guard: f64) -> TrackBudget<'a> {
        TrackBudget {
            global,
            local: Budget::start(seconds),
            guard,
        }
    }

    /// Whether another iteration may start.
    pub fn has_time(&self) -> bool {
        self.local.has_time(self.guard) && self.global.has_time(self.guard)
    }

    /// Seconds elapsed since the track started.
    pub fn elapsed(&self) -> f64 {
        self.local.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_goes_negative() {
        let budget = Budget::start(0.0);
        assert!(budget.remaining() <= 0.0);
        assert!(!budget.has_time(0.0));

        let budget = Budget::start(-5.0);
        assert!(budget.remaining() < -4.9);
    }

    #[test]
    fn fresh_budget_has_time() {
        let budget = Budget::start(3600.0);
        assert!(budget.has_time(0.25));
        assert!(budget.remaining() <= 3600.0);
    }

    #[test]
    fn track_needs_both_budgets() {
        let global = Budget::start(3600.0);
        assert!(TrackBudget::start(&global, 3600.0, 0.25).has_time());
        assert!(!TrackBudget::start(&global, 0.2, 0.25).has_time());

        let exhausted = Budget::start(0.0);
        assert!(!TrackBudget::start(&exhausted, 3600.0, 0.25).has_time());
    }
}
