//! # linestatslib
//!
//! Groups text lines by their literal "shape" and summarizes the numbers
//! inside them.
//!
//! ## Overview
//!
//! Repeated log output tends to consist of a few line templates whose numbers
//! change from one occurrence to the next:
//!
//! ```text
//! req took 10ms
//! req took 20ms
//! req took 30ms
//! ```
//!
//! This library finds those templates and replaces every varying number with
//! its minimum, maximum, mean and standard deviation:
//!
//! ```text
//! req took 10-30(20.000000+/-8.2)ms
//! ```
//!
//! ## Pipeline
//!
//! - **Tokenizing** ([`tokenizer`]): split a line into literal and numeric segments
//! - **Grouping** ([`registry`]): lines with identical literal text share a template,
//!   which stores every numeric value seen
//! - **Constant fields**: numbers that never changed are turned back into literal text
//! - **Statistics** ([`stats`]): min/max/mean/stddev per field, with optional
//!   outlier trimming
//! - **Output** ([`output`]): text or CSV
//!
//! Every source is analyzed on its own; nothing is shared between sources.
//!
//! ## Example
//!
//! ```rust
//! use linestatslib::output::{render_csv, render_text};
//! use linestatslib::{analyze_reader, AnalyzeOptions, OutputOptions};
//!
//! let log = "req took 10ms\nreq took 20ms\nreq took 30ms\ncode 200 ok\n";
//! let analysis = analyze_reader(log.as_bytes(), AnalyzeOptions::new()).unwrap();
//!
//! assert_eq!(
//!     render_text(&analysis, &OutputOptions::new()),
//!     "req took 10-30(20.000000+/-8.2)ms\ncode 200 ok\n"
//! );
//!
//! let csv = render_csv(&analysis, &OutputOptions::new().suppress_invariant(true));
//! assert_eq!(csv, "\"req took [1]ms\"\n10\n20\n30\n");
//! ```

pub mod analysis;
pub mod error;
pub mod number;
pub mod options;
pub mod output;
pub mod pattern;
pub mod registry;
pub mod stats;
pub mod tokenizer;

pub use analysis::{
    analyze_file, analyze_lines, analyze_reader, Analysis, Analyzer, SummarySegment,
    TemplateSummary,
};
pub use error::LinestatsError;
pub use number::{Column, Number, NumberKind};
pub use options::{AnalyzeOptions, OutputFormat, OutputOptions};
pub use pattern::{Pattern, Shaped};
pub use registry::{Registry, Template};
pub use stats::ColumnStats;
pub use tokenizer::{tokenize, Line, Segment, SegmentKind};

/// Result type for linestatslib operations
pub type Result<T> = std::result::Result<T, LinestatsError>;
