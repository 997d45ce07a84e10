//! Time sources for interval throttling.

use std::cell::Cell;
use std::rc::Rc;

/// A source of millisecond timestamps.
pub trait Clock {
    /// Milliseconds on this clock's timeline.
    fn now_millis(&self) -> i64;
}

/// Wall clock, milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Hand-driven clock. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    /// Create a clock reading `millis`.
    pub fn new(millis: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(millis)),
        }
    }

    /// Jump to `millis`.
    pub fn set(&self, millis: i64) {
        self.now.set(millis);
    }

    /// Move forward by `millis`.
    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get().wrapping_add(millis));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}
