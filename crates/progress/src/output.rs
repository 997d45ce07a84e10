//! Text rendering of progress state.

use pacer_core::ProgressState;

/// Renders a progress state as a line of text.
pub trait Output {
    /// Render `state`.
    fn render(&self, state: &ProgressState) -> String;
}

/// `<current>/<limit> <label> (<percent>)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegularOutput {
    label: String,
}

impl RegularOutput {
    /// Create a plain renderer with a label between the counts and the
    /// percentage.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Label text.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Output for RegularOutput {
    fn render(&self, state: &ProgressState) -> String {
        format!(
            "{}/{} {} ({})",
            state.current(),
            state.limit(),
            self.label,
            state.percent_string()
        )
    }
}

/// Fixed-width bracketed bar followed by the percentage and counts.
///
/// The bar is clamped visually: an overshoot renders full, an undershoot
/// renders empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBar {
    width: usize,
    fill: char,
    prefix: String,
    suffix: String,
}

impl ProgressBar {
    /// Default bar width in characters.
    pub const DEFAULT_WIDTH: usize = 25;

    /// Create a bar renderer.
    pub fn new(width: usize, fill: char, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            width,
            fill,
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Set the width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the fill character.
    pub fn with_fill(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }

    /// Set the text before the bar.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the text after the bar.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Number of fill characters for `ratio`.
    fn filled(&self, ratio: f64) -> usize {
        if ratio > 1.0 {
            self.width
        } else if ratio < 0.0 {
            0
        } else {
            // NaN casts to zero.
            (ratio * self.width as f64) as usize
        }
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, '=', "[", "]")
    }
}

impl Output for ProgressBar {
    fn render(&self, state: &ProgressState) -> String {
        let filled = self.filled(state.ratio());
        let bar: String = std::iter::repeat(self.fill).take(filled).collect();

        format!(
            "{}{:<width$}{} {} ({}/{})",
            self.prefix,
            bar,
            self.suffix,
            state.percent_string(),
            state.current(),
            state.limit(),
            width = self.width
        )
    }
}
