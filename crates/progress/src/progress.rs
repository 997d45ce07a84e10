//! Progress facade: state, throttling policy and renderer in one value.

use std::fmt;

use pacer_core::{Clock, ProgressState, Result, DEFAULT_LIMIT};
use tracing::debug;

use crate::notifier::{interval_for_rate, Immediate, Notifier, PercentStep, StepCount, TimeInterval};
use crate::output::{Output, ProgressBar, RegularOutput};

/// A progress counter that throttles observer notifications.
///
/// Every [`update`](Self::update) moves the counter first, then asks the
/// active [`Notifier`] whether the callback should run. Not thread-safe;
/// share behind a lock if needed.
pub struct Progress {
    state: ProgressState,
    notifier: Box<dyn Notifier>,
    output: Box<dyn Output>,
}

impl Progress {
    /// Create a counter at `start` out of `limit`, notifying on every update
    /// and rendering in the plain form.
    pub fn new(limit: i64, start: i64) -> Self {
        Self {
            state: ProgressState::new(limit, start),
            notifier: Box::new(Immediate),
            output: Box::new(RegularOutput::default()),
        }
    }

    // === State ===

    /// Underlying state.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Current value.
    pub fn current(&self) -> i64 {
        self.state.current()
    }

    /// Set the current value. Does not consult the notifier.
    pub fn set_current(&mut self, value: i64) {
        self.state.set_current(value);
    }

    /// Limit.
    pub fn limit(&self) -> i64 {
        self.state.limit()
    }

    /// Set the limit.
    pub fn set_limit(&mut self, value: i64) {
        self.state.set_limit(value);
    }

    /// Digits after the decimal point.
    pub fn digits(&self) -> u32 {
        self.state.digits()
    }

    /// Set the digits after the decimal point; negative values are rejected.
    pub fn set_digits(&mut self, digits: i32) -> Result<()> {
        self.state.set_digits(digits)
    }

    /// `current / limit`.
    pub fn ratio(&self) -> f64 {
        self.state.ratio()
    }

    /// Ratio in percent.
    pub fn percentage(&self) -> f64 {
        self.state.percentage()
    }

    /// Percentage rendered with the configured digits.
    pub fn percent_string(&self) -> String {
        self.state.percent_string()
    }

    // === Updates ===

    /// Move the counter back to its start and reset the notifier's
    /// throttling state.
    pub fn reset(&mut self) {
        self.state.reset();
        self.notifier.on_reset();
        debug!(current = self.state.current(), "progress reset");
    }

    /// Move the counter by `delta`, then call `callback` if the notifier
    /// lets this update through.
    pub fn update<F>(&mut self, delta: i64, callback: F)
    where
        F: FnOnce(&Progress),
    {
        self.state.update(delta);
        if self.notifier.on_update(&self.state) {
            callback(self);
        }
    }

    /// `update(1, callback)`.
    pub fn increment<F>(&mut self, callback: F)
    where
        F: FnOnce(&Progress),
    {
        self.update(1, callback);
    }

    /// Update with no observer. The notifier still sees the update.
    pub fn update_silently(&mut self, delta: i64) {
        self.update(delta, |_| {});
    }

    /// Render with the active output.
    pub fn render(&self) -> String {
        self.output.render(&self.state)
    }

    // === Configuration ===

    /// Set the digits, chainable.
    pub fn with_digits(mut self, digits: i32) -> Result<Self> {
        self.set_digits(digits)?;
        Ok(self)
    }

    /// Use a custom notifier.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Notify on every update.
    pub fn always_notify(self) -> Self {
        debug!("notifier: immediate");
        self.with_notifier(Immediate)
    }

    /// Notify each time `current` moves `delta` past the last notification.
    pub fn by_current_delta(self, delta: i64) -> Self {
        debug!(delta, "notifier: current delta");
        self.with_notifier(StepCount::new(delta))
    }

    /// Notify each time the percentage moves `delta` points past the last
    /// notification.
    pub fn by_percent_delta(self, delta: f64) -> Self {
        debug!(delta, "notifier: percent delta");
        self.with_notifier(PercentStep::new(delta))
    }

    /// Notify at most once per `millis` of wall-clock time.
    pub fn by_time_delta(self, millis: i64) -> Self {
        debug!(millis, "notifier: time delta");
        self.with_notifier(TimeInterval::new(millis))
    }

    /// Notify at most once per `millis` as read from `clock`.
    pub fn by_time_delta_with_clock<C>(self, millis: i64, clock: C) -> Self
    where
        C: Clock + 'static,
    {
        debug!(millis, "notifier: time delta (custom clock)");
        self.with_notifier(TimeInterval::with_clock(millis, clock))
    }

    /// Notify at roughly `rate` updates per second.
    pub fn by_outputs_per_second(self, rate: f64) -> Self {
        self.by_time_delta(interval_for_rate(rate))
    }

    /// Use a custom renderer.
    pub fn with_output(mut self, output: impl Output + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    /// Render as `<current>/<limit> <label> (<percent>)`.
    pub fn use_regular_output(self, label: impl Into<String>) -> Self {
        debug!("output: regular");
        self.with_output(RegularOutput::new(label))
    }

    /// Render as a bar.
    pub fn use_progress_bar(self, bar: ProgressBar) -> Self {
        debug!("output: progress bar");
        self.with_output(bar)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress").field("state", &self.state).finish_non_exhaustive()
    }
}
