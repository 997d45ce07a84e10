//! Pacer core data models.
//!
//! This crate defines the progress counter state, the error taxonomy and
//! the clock abstraction shared by the throttling layer.

#![warn(missing_docs)]

mod clock;
mod error;
mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ProgressError, Result};
pub use state::{ProgressState, DEFAULT_DIGITS, DEFAULT_LIMIT};
