//! Serde-driven progress configuration.

use std::path::Path;

use pacer_core::{Result, DEFAULT_DIGITS, DEFAULT_LIMIT};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::output::ProgressBar;
use crate::progress::Progress;

/// Everything needed to build a [`Progress`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Ratio denominator
    pub limit: i64,

    /// Initial and reset value
    pub start: i64,

    /// Digits after the decimal point
    pub digits: i32,

    /// Throttling policy
    pub notify: NotifyConfig,

    /// Renderer
    pub output: OutputConfig,
}

/// Throttling policy selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotifyConfig {
    /// Every update
    #[default]
    Always,
    /// Every `delta` units of progress
    CurrentDelta {
        /// Step in units
        delta: i64,
    },
    /// Every `delta` percentage points
    PercentDelta {
        /// Step in percentage points
        delta: f64,
    },
    /// At most once per `millis`
    TimeDelta {
        /// Interval in milliseconds
        millis: i64,
    },
    /// Roughly `rate` notifications per second
    OutputsPerSecond {
        /// Target rate
        rate: f64,
    },
}

/// Renderer selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputConfig {
    /// `<current>/<limit> <label> (<percent>)`
    Regular {
        /// Label between counts and percentage
        #[serde(default)]
        label: String,
    },
    /// Bracketed bar
    Bar {
        /// Width in characters
        #[serde(default = "default_width")]
        width: usize,
        /// Fill character
        #[serde(default = "default_fill")]
        fill: char,
        /// Text before the bar
        #[serde(default = "default_prefix")]
        prefix: String,
        /// Text after the bar
        #[serde(default = "default_suffix")]
        suffix: String,
    },
}

fn default_width() -> usize {
    ProgressBar::DEFAULT_WIDTH
}

fn default_fill() -> char {
    '='
}

fn default_prefix() -> String {
    "[".to_string()
}

fn default_suffix() -> String {
    "]".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig::Regular {
            label: String::new(),
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            start: 0,
            digits: DEFAULT_DIGITS as i32,
            notify: NotifyConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl ProgressConfig {
    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading progress config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Build a progress counter. Fails on negative digits.
    pub fn build(&self) -> Result<Progress> {
        let progress = Progress::new(self.limit, self.start).with_digits(self.digits)?;

        let progress = match self.notify {
            NotifyConfig::Always => progress.always_notify(),
            NotifyConfig::CurrentDelta { delta } => progress.by_current_delta(delta),
            NotifyConfig::PercentDelta { delta } => progress.by_percent_delta(delta),
            NotifyConfig::TimeDelta { millis } => progress.by_time_delta(millis),
            NotifyConfig::OutputsPerSecond { rate } => progress.by_outputs_per_second(rate),
        };

        Ok(match &self.output {
            OutputConfig::Regular { label } => progress.use_regular_output(label.clone()),
            OutputConfig::Bar {
                width,
                fill,
                prefix,
                suffix,
            } => progress.use_progress_bar(ProgressBar::new(*width, *fill, prefix.clone(), suffix.clone())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacer_core::ProgressError;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ProgressConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ProgressConfig::default());

        let progress = config.build().unwrap();
        assert_eq!(progress.limit(), 100);
        assert_eq!(progress.to_string(), "0/100  (0.00%)");
    }

    #[test]
    fn test_parse_percent_delta_with_bar() {
        let json = r#"{
            "limit": 999,
            "start": 10,
            "notify": { "kind": "percent_delta", "delta": 0.01 },
            "output": { "kind": "bar", "width": 10 }
        }"#;
        let config = ProgressConfig::from_json_str(json).unwrap();
        assert_eq!(config.notify, NotifyConfig::PercentDelta { delta: 0.01 });
        assert_eq!(
            config.output,
            OutputConfig::Bar {
                width: 10,
                fill: '=',
                prefix: "[".to_string(),
                suffix: "]".to_string(),
            }
        );

        let progress = config.build().unwrap();
        assert_eq!(progress.current(), 10);
        assert_eq!(progress.percent_string(), "1.00%");
        assert_eq!(progress.render(), "[          ] 1.00% (10/999)");
    }

    #[test]
    fn test_build_applies_current_delta() {
        let config = ProgressConfig {
            notify: NotifyConfig::CurrentDelta { delta: 3 },
            ..Default::default()
        };
        let mut progress = config.build().unwrap();
        let mut seen = Vec::new();
        for _ in 0..7 {
            progress.increment(|p| seen.push(p.current()));
        }
        assert_eq!(seen, vec![3, 6]);
    }

    #[test]
    fn test_negative_digits_fail_to_build() {
        let config = ProgressConfig::from_json_str(r#"{ "digits": -1 }"#).unwrap();
        assert!(matches!(config.build(), Err(ProgressError::InvalidDigits(-1))));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = ProgressConfig::from_json_str(r#"{ "notify": { "kind": "sometimes" } }"#).unwrap_err();
        assert!(matches!(err, ProgressError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "limit": 40, "output": {{ "kind": "regular", "label": "items" }} }}"#
        )
        .unwrap();

        let config = ProgressConfig::load(file.path()).unwrap();
        let progress = config.build().unwrap();
        assert_eq!(progress.to_string(), "0/40 items (0.00%)");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProgressConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ProgressError::Io(_)));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = ProgressConfig {
            notify: NotifyConfig::OutputsPerSecond { rate: 3.0 },
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""kind":"outputs_per_second""#));
    }
}
