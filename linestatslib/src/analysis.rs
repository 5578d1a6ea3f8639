//! High-level analysis API.
//!
//! This module provides the main entry points: feed lines in, get back one
//! summary per template once the whole source has been read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LinestatsError;
use crate::number::{Number, NumberKind};
use crate::options::AnalyzeOptions;
use crate::pattern::Shaped;
use crate::registry::{Registry, Template};
use crate::stats::ColumnStats;
use crate::tokenizer::{is_space_char, tokenize, Segment};
use crate::Result;

/// Collects lines of one source.
///
/// Nothing can be reported until every line is in: the constant-field pass
/// and the standard deviation both need all values.
#[derive(Debug, Default)]
pub struct Analyzer {
    registry: Registry,
    options: AnalyzeOptions,
}

impl Analyzer {
    pub fn new(options: AnalyzeOptions) -> Self {
        Self {
            registry: Registry::new(),
            options,
        }
    }

    /// Add one line, without its trailing newline.
    pub fn add_line(&mut self, line: &str) -> Result<()> {
        let tokens = tokenize(line, self.options.skip);
        self.registry.add(&tokens)?;
        Ok(())
    }

    /// Run the constant-field pass and compute statistics.
    pub fn finish(mut self) -> Analysis {
        self.registry.promote_constants();
        let lines = self.registry.lines();
        let trim = self.options.trim_outliers;

        let templates: Vec<TemplateSummary> = self
            .registry
            .into_templates()
            .iter()
            .map(|template| TemplateSummary::new(template, trim))
            .collect();

        debug!(lines, templates = templates.len(), "analysis finished");

        Analysis { lines, templates }
    }
}

/// Result of analyzing one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Number of lines read
    pub lines: usize,
    /// Templates in the order they were first seen
    pub templates: Vec<TemplateSummary>,
}

impl Analysis {
    /// Templates to report, optionally leaving out those where nothing varied.
    pub fn visible(&self, suppress_invariant: bool) -> impl Iterator<Item = &TemplateSummary> {
        self.templates
            .iter()
            .filter(move |t| !(suppress_invariant && t.is_invariant()))
    }
}

/// One piece of a template summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SummarySegment {
    /// Text identical in every occurrence
    Literal { text: String },
    /// A numeric field that varied between occurrences
    Field {
        /// The field as written in the first occurrence
        text: String,
        /// Whether the field was preceded by whitespace in the input
        leading_space: bool,
        kind: NumberKind,
        stats: ColumnStats,
    },
}

/// Summary of one template, ready for output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSummary {
    /// Number of lines that matched
    pub count: usize,
    pub segments: Vec<SummarySegment>,
    /// Values of the varying fields for every occurrence, in input order
    pub rows: Vec<Vec<Number>>,
}

impl TemplateSummary {
    pub fn new(template: &Template, trim_outliers: bool) -> Self {
        let pattern = template.pattern();
        let mut segments: Vec<SummarySegment> = Vec::new();

        for (index, segment) in pattern.segments().iter().enumerate() {
            let text = pattern.slice(segment);
            let field = match segment {
                Segment::Literal(_) => None,
                Segment::Number { .. } => template
                    .fields()
                    .iter()
                    .find(|f| f.segment == index)
                    .and_then(|f| {
                        ColumnStats::compute(&f.column, trim_outliers)
                            .filter(|stats| !stats.is_constant())
                            .map(|stats| (f.column.kind(), stats))
                    }),
            };

            match field {
                Some((kind, stats)) => segments.push(SummarySegment::Field {
                    text: text.to_string(),
                    leading_space: text.starts_with(is_space_char),
                    kind,
                    stats,
                }),
                None => push_literal(&mut segments, text),
            }
        }

        Self {
            count: template.count(),
            segments,
            rows: template.rows(),
        }
    }

    /// Statistics of the varying fields, left to right.
    pub fn fields(&self) -> impl Iterator<Item = &ColumnStats> {
        self.segments.iter().filter_map(|s| match s {
            SummarySegment::Field { stats, .. } => Some(stats),
            SummarySegment::Literal { .. } => None,
        })
    }

    /// True when no field varied.
    pub fn is_invariant(&self) -> bool {
        self.fields().next().is_none()
    }
}

fn push_literal(segments: &mut Vec<SummarySegment>, text: &str) {
    if let Some(SummarySegment::Literal { text: prev }) = segments.last_mut() {
        prev.push_str(text);
    } else {
        segments.push(SummarySegment::Literal {
            text: text.to_string(),
        });
    }
}

/// Analyze a sequence of lines.
///
/// # Example
///
/// ```rust
/// use linestatslib::{analyze_lines, AnalyzeOptions};
///
/// let analysis = analyze_lines(
///     ["req took 10ms", "req took 20ms", "req took 30ms"],
///     AnalyzeOptions::new(),
/// )
/// .unwrap();
///
/// assert_eq!(analysis.templates.len(), 1);
/// let stats = analysis.templates[0].fields().next().unwrap();
/// assert_eq!(stats.mean, 20.0);
/// ```
pub fn analyze_lines<I, S>(lines: I, options: AnalyzeOptions) -> Result<Analysis>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut analyzer = Analyzer::new(options);
    for line in lines {
        analyzer.add_line(line.as_ref())?;
    }
    Ok(analyzer.finish())
}

/// Analyze everything a reader yields, line by line.
///
/// Lines are split on `\n`; a trailing `\r` is stripped and invalid UTF-8
/// is replaced rather than rejected.
pub fn analyze_reader<R: BufRead>(mut reader: R, options: AnalyzeOptions) -> Result<Analysis> {
    let mut analyzer = Analyzer::new(options);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        analyzer.add_line(&String::from_utf8_lossy(&buf))?;
    }

    Ok(analyzer.finish())
}

/// Analyze a file.
///
/// # Example
///
/// ```rust,ignore
/// use linestatslib::{analyze_file, AnalyzeOptions};
///
/// let analysis = analyze_file("build.log", AnalyzeOptions::new())?;
/// println!("{} templates", analysis.templates.len());
/// ```
pub fn analyze_file(path: impl AsRef<Path>, options: AnalyzeOptions) -> Result<Analysis> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LinestatsError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    analyze_reader(BufReader::new(file), options).map_err(|e| match e {
        LinestatsError::Io(source) => LinestatsError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}
