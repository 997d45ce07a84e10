//! Progress Tracking (Layer 2)
//!
//! Throttled progress notifications and text rendering on top of
//! [`pacer_core::ProgressState`].

#![warn(missing_docs)]

pub mod config;
pub mod notifier;
pub mod output;
pub mod progress;

pub use config::{NotifyConfig, OutputConfig, ProgressConfig};
pub use notifier::{interval_for_rate, Immediate, Notifier, PercentStep, StepCount, TimeInterval};
pub use output::{Output, ProgressBar, RegularOutput};
pub use progress::Progress;

pub use pacer_core::{Clock, ManualClock, ProgressError, ProgressState, Result, SystemClock};
