//! Progress counter state.

use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, Result};

/// Limit used when none is supplied.
pub const DEFAULT_LIMIT: i64 = 100;

/// Decimal digits used when rendering the percentage.
pub const DEFAULT_DIGITS: u32 = 2;

/// Current value, limit and rendering precision of an iterative task.
///
/// No ordering is enforced between `current`, `limit` and `start`: the
/// counter may undershoot below zero or overshoot past the limit, and the
/// limit may be zero or negative. Ratios follow IEEE float semantics in
/// those cases (`inf`, `-inf` or `NaN`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Progress made so far
    current: i64,

    /// Denominator of the ratio, not a ceiling
    limit: i64,

    /// Value `current` returns to on reset
    start: i64,

    /// Digits after the decimal point in the percentage string
    digits: u32,
}

impl ProgressState {
    /// Create a new state at `start` out of `limit`.
    pub fn new(limit: i64, start: i64) -> Self {
        Self {
            current: start,
            limit,
            start,
            digits: DEFAULT_DIGITS,
        }
    }

    /// Current value.
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Set the current value without validation.
    pub fn set_current(&mut self, value: i64) {
        self.current = value;
    }

    /// Limit.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Set the limit without validation.
    pub fn set_limit(&mut self, value: i64) {
        self.limit = value;
    }

    /// Value restored by [`reset`](Self::reset).
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Digits after the decimal point.
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Set the digits after the decimal point.
    ///
    /// Fails with [`ProgressError::InvalidDigits`] when `digits` is negative.
    pub fn set_digits(&mut self, digits: i32) -> Result<()> {
        self.digits = u32::try_from(digits).map_err(|_| ProgressError::InvalidDigits(digits))?;
        Ok(())
    }

    /// `current / limit`, unclamped.
    pub fn ratio(&self) -> f64 {
        self.current as f64 / self.limit as f64
    }

    /// Ratio scaled to percent.
    pub fn percentage(&self) -> f64 {
        self.ratio() * 100.0
    }

    /// Percentage with `digits` decimals and a trailing `%`.
    ///
    /// Half-way values round away from zero (`12.5` at zero digits is `13%`).
    pub fn percent_string(&self) -> String {
        let percentage = self.percentage();
        let scale = 10f64.powi(self.digits.min(i32::MAX as u32) as i32);
        let scaled = percentage * scale;
        // Non-finite values (NaN, inf, or a scale too large) render as-is.
        let rounded = if scaled.is_finite() {
            scaled.round() / scale
        } else {
            percentage
        };
        format!("{:.*}%", self.digits as usize, rounded)
    }

    /// Return `current` to `start`. Limit and digits are untouched.
    pub fn reset(&mut self) {
        self.current = self.start;
    }

    /// Move `current` by `delta`, which may be negative. Wraps on overflow.
    pub fn update(&mut self, delta: i64) {
        self.current = self.current.wrapping_add(delta);
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}
