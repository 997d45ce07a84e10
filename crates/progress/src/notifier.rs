//! Notification throttling policies.
//!
//! A [`Notifier`] sees every state update and decides whether the observer
//! callback should run for it. Policies keep only the baseline they need and
//! receive the already-updated state on each call.

use pacer_core::{Clock, ProgressState, SystemClock};
use tracing::trace;

/// Decides which updates produce a notification.
pub trait Notifier {
    /// Restore construction-time throttling state.
    fn on_reset(&mut self);

    /// Called once per update, after the state has moved.
    ///
    /// Returns `true` when the observer should be notified now. Any baseline
    /// advance has already happened when this returns.
    fn on_update(&mut self, state: &ProgressState) -> bool;
}

/// Notifies on every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Notifier for Immediate {
    fn on_reset(&mut self) {}

    fn on_update(&mut self, _state: &ProgressState) -> bool {
        true
    }
}

/// Notifies when `current - last >= delta`, where `last` is the value at the
/// previous notification (zero initially and after a reset).
///
/// The difference wraps on overflow. A zero `delta` notifies on every update
/// that does not move backwards; a negative `delta` also lets backward moves
/// smaller than `|delta|` through.
#[derive(Debug, Clone)]
pub struct StepCount {
    delta: i64,
    last: i64,
}

impl StepCount {
    /// Create a step policy with a baseline of zero.
    pub fn new(delta: i64) -> Self {
        Self { delta, last: 0 }
    }

    /// Configured step.
    pub fn delta(&self) -> i64 {
        self.delta
    }
}

impl Notifier for StepCount {
    fn on_reset(&mut self) {
        self.last = 0;
    }

    fn on_update(&mut self, state: &ProgressState) -> bool {
        let current = state.current();
        if current.wrapping_sub(self.last) >= self.delta {
            trace!(current, last = self.last, "step threshold reached");
            self.last = current;
            true
        } else {
            false
        }
    }
}

/// Notifies once the percentage reaches the next threshold.
///
/// After notifying, the next threshold is `percentage + delta` measured from
/// where progress landed, so a jump across several steps yields a single
/// notification.
#[derive(Debug, Clone)]
pub struct PercentStep {
    delta: f64,
    next: f64,
}

impl PercentStep {
    /// Create a percentage policy whose first threshold is `delta`.
    pub fn new(delta: f64) -> Self {
        Self { delta, next: delta }
    }

    /// Configured step in percentage points.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Percentage at which the next notification fires.
    pub fn next_threshold(&self) -> f64 {
        self.next
    }
}

impl Notifier for PercentStep {
    fn on_reset(&mut self) {
        self.next = self.delta;
    }

    fn on_update(&mut self, state: &ProgressState) -> bool {
        let percentage = state.percentage();
        if percentage >= self.next {
            trace!(percentage, threshold = self.next, "percent threshold reached");
            self.next = percentage + self.delta;
            true
        } else {
            false
        }
    }
}

/// Notifies when at least `interval_ms` has passed since the last
/// notification.
///
/// The baseline starts at zero on the clock's timeline, so with
/// [`SystemClock`] the first update always notifies. Intervals run from the
/// last notification rather than a fixed schedule; a negative interval
/// behaves like [`Immediate`].
#[derive(Debug, Clone)]
pub struct TimeInterval<C: Clock = SystemClock> {
    interval_ms: i64,
    last: i64,
    clock: C,
}

impl TimeInterval<SystemClock> {
    /// Create a wall-clock interval policy.
    pub fn new(interval_ms: i64) -> Self {
        Self::with_clock(interval_ms, SystemClock)
    }
}

impl<C: Clock> TimeInterval<C> {
    /// Create an interval policy reading time from `clock`.
    pub fn with_clock(interval_ms: i64, clock: C) -> Self {
        Self {
            interval_ms,
            last: 0,
            clock,
        }
    }

    /// Configured interval.
    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }
}

impl<C: Clock> Notifier for TimeInterval<C> {
    fn on_reset(&mut self) {
        self.last = 0;
    }

    fn on_update(&mut self, _state: &ProgressState) -> bool {
        let now = self.clock.now_millis();
        if now.wrapping_sub(self.last) >= self.interval_ms {
            trace!(now, last = self.last, "interval elapsed");
            self.last = now;
            true
        } else {
            false
        }
    }
}

/// Interval in milliseconds for a target rate of notifications per second.
pub fn interval_for_rate(outputs_per_second: f64) -> i64 {
    (1000.0 / outputs_per_second).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacer_core::ManualClock;

    fn fire_count(notifier: &mut dyn Notifier, state: &mut ProgressState, updates: usize) -> Vec<i64> {
        let mut fired = Vec::new();
        for _ in 0..updates {
            state.update(1);
            if notifier.on_update(state) {
                fired.push(state.current());
            }
        }
        fired
    }

    #[test]
    fn test_immediate_always_fires() {
        let mut state = ProgressState::default();
        let fired = fire_count(&mut Immediate, &mut state, 5);
        assert_eq!(fired, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_step_count_fires_from_zero_baseline() {
        let mut notifier = StepCount::new(6);
        let mut state = ProgressState::new(999, 10);

        assert!(notifier.on_update(&state));

        for _ in 0..5 {
            state.update(1);
            assert!(!notifier.on_update(&state));
        }

        state.update(1);
        assert_eq!(state.current(), 16);
        assert!(notifier.on_update(&state));
    }

    #[test]
    fn test_step_count_zero_delta_always_fires() {
        let mut state = ProgressState::default();
        let fired = fire_count(&mut StepCount::new(0), &mut state, 3);
        assert_eq!(fired, vec![1, 2, 3]);

        // Standing still still satisfies 0 >= 0.
        let mut notifier = StepCount::new(0);
        assert!(notifier.on_update(&state));
        assert!(notifier.on_update(&state));
    }

    #[test]
    fn test_step_count_extreme_values_do_not_panic() {
        let mut notifier = StepCount::new(1);
        let mut state = ProgressState::default();

        state.set_current(i64::MAX);
        assert!(notifier.on_update(&state));

        // -2 - i64::MAX wraps to i64::MAX.
        state.set_current(-2);
        assert!(notifier.on_update(&state));

        state.set_current(i64::MIN);
        let _ = notifier.on_update(&state);
    }

    #[test]
    fn test_step_count_negative_delta_allows_small_backward_moves() {
        let mut notifier = StepCount::new(-3);
        let mut state = ProgressState::default();
        state.set_current(10);
        assert!(notifier.on_update(&state));

        state.update(-2);
        assert!(notifier.on_update(&state));

        state.update(-4);
        assert!(!notifier.on_update(&state));
    }

    #[test]
    fn test_time_interval_extreme_clock_does_not_panic() {
        let clock = ManualClock::new(i64::MIN);
        let mut notifier = TimeInterval::with_clock(1000, clock.clone());
        let state = ProgressState::default();

        // i64::MIN - 0 stays i64::MIN, far below the interval.
        assert!(!notifier.on_update(&state));

        clock.set(i64::MAX);
        assert!(notifier.on_update(&state));
        clock.set(i64::MIN);
        let _ = notifier.on_update(&state);
    }

    #[test]
    fn test_step_count_reset_restores_baseline() {
        let mut notifier = StepCount::new(10);
        let mut state = ProgressState::new(100, 0);
        state.set_current(50);
        assert!(notifier.on_update(&state));

        state.reset();
        state.update(10);
        assert!(!notifier.on_update(&state));

        notifier.on_reset();
        assert!(notifier.on_update(&state));
    }

    #[test]
    fn test_percent_step_fires_every_five_units() {
        let mut state = ProgressState::new(100, 0);
        let fired = fire_count(&mut PercentStep::new(5.0), &mut state, 100);
        assert_eq!(fired[0], 5);
        assert!((19..=20).contains(&fired.len()));
        for pair in fired.windows(2) {
            assert!((5..=6).contains(&(pair[1] - pair[0])), "gap {:?}", pair);
        }
    }

    #[test]
    fn test_percent_step_rebases_on_landed_value_after_jump() {
        let mut notifier = PercentStep::new(5.0);
        let mut state = ProgressState::new(100, 0);

        state.update(2);
        assert!(!notifier.on_update(&state));

        state.update(38);
        assert!(notifier.on_update(&state));
        assert!((notifier.next_threshold() - 45.0).abs() < 1e-9);

        for _ in 0..4 {
            state.update(1);
            assert!(!notifier.on_update(&state));
        }
        state.update(1);
        assert!(notifier.on_update(&state));
    }

    #[test]
    fn test_percent_step_reset_restores_first_threshold() {
        let mut notifier = PercentStep::new(10.0);
        let mut state = ProgressState::new(100, 0);
        state.update(60);
        assert!(notifier.on_update(&state));
        assert!((notifier.next_threshold() - 70.0).abs() < 1e-9);

        notifier.on_reset();
        assert_eq!(notifier.next_threshold(), 10.0);
    }

    #[test]
    fn test_time_interval_updates_far_apart_both_fire() {
        let clock = ManualClock::new(10_000);
        let mut notifier = TimeInterval::with_clock(1000, clock.clone());
        let state = ProgressState::default();

        assert!(notifier.on_update(&state));
        clock.advance(1500);
        assert!(notifier.on_update(&state));
    }

    #[test]
    fn test_time_interval_close_updates_coalesce() {
        let clock = ManualClock::new(10_000);
        let mut notifier = TimeInterval::with_clock(1000, clock.clone());
        let state = ProgressState::default();

        let mut fired = 0;
        for _ in 0..3 {
            clock.advance(100);
            if notifier.on_update(&state) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_time_interval_measures_from_last_fire() {
        let clock = ManualClock::new(5_000);
        let mut notifier = TimeInterval::with_clock(1000, clock.clone());
        let state = ProgressState::default();
        assert!(notifier.on_update(&state));

        clock.advance(2500);
        assert!(notifier.on_update(&state));

        // 500ms after the last fire, not 1500ms past a fixed schedule.
        clock.advance(500);
        assert!(!notifier.on_update(&state));
    }

    #[test]
    fn test_time_interval_negative_behaves_like_immediate() {
        let clock = ManualClock::new(0);
        let mut notifier = TimeInterval::with_clock(-1, clock);
        let state = ProgressState::default();
        for _ in 0..3 {
            assert!(notifier.on_update(&state));
        }
    }

    #[test]
    fn test_time_interval_reset_fires_again() {
        let clock = ManualClock::new(10_000);
        let mut notifier = TimeInterval::with_clock(1000, clock.clone());
        let state = ProgressState::default();
        assert!(notifier.on_update(&state));
        clock.advance(10);
        assert!(!notifier.on_update(&state));

        notifier.on_reset();
        assert!(notifier.on_update(&state));
    }

    #[test]
    fn test_interval_for_rate_rounds() {
        assert_eq!(interval_for_rate(3.0), 333);
        assert_eq!(interval_for_rate(1.5), 667);
        assert_eq!(interval_for_rate(4.0), 250);
    }
}
