//! Options controlling analysis and output.
//!
//! This module contains all configuration types that control what data the
//! library computes and how it is presented.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LinestatsError;

/// Options for ingesting lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    /// Number of leading numeric fields per line to treat as literal text
    pub skip: usize,
    /// Leave the minimum and maximum out of mean and standard deviation
    pub trim_outliers: bool,
}

impl AnalyzeOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set how many leading numbers to keep literal
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Builder: set outlier trimming
    pub fn trim_outliers(mut self, trim: bool) -> Self {
        self.trim_outliers = trim;
        self
    }
}

/// How summaries are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per template with `min-max(mean+/-stddev)` in place of numbers
    #[default]
    Text,
    /// A quoted header per template followed by the raw values of each occurrence
    Csv,
    /// The full analysis as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = LinestatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(LinestatsError::UnknownFormat(s.to_string())),
        }
    }
}

/// Options for presenting an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputOptions {
    pub format: OutputFormat,
    /// Omit templates where nothing varied
    pub suppress_invariant: bool,
    /// Append the number of occurrences of each template
    pub show_count: bool,
}

impl OutputOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the output format
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder: set whether invariant templates are omitted
    pub fn suppress_invariant(mut self, suppress: bool) -> Self {
        self.suppress_invariant = suppress;
        self
    }

    /// Builder: set whether occurrence counts are shown
    pub fn show_count(mut self, show: bool) -> Self {
        self.show_count = show;
        self
    }
}
