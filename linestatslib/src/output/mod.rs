//! Output formatting: present analyses as text or CSV.
//!
//! This module handles the last stage of the pipeline. It provides:
//!
//! - **Text**: one line per template, numbers replaced by
//!   `min-max(mean+/-stddev)`
//! - **CSV**: a quoted header per template with `[N]` placeholders, then the
//!   raw values of every occurrence
//!
//! Formatters only turn summaries into strings. Grouping, the constant-field
//! pass and statistics all happen in [`crate::analysis`].
//!
//! ## Example
//!
//! ```rust
//! use linestatslib::output::render_text;
//! use linestatslib::{analyze_lines, AnalyzeOptions, OutputOptions};
//!
//! let analysis = analyze_lines(["code 200 ok"; 5], AnalyzeOptions::new()).unwrap();
//! assert_eq!(render_text(&analysis, &OutputOptions::new()), "code 200 ok\n");
//! ```

pub mod csv;
pub mod text;

pub use csv::{csv_header, csv_rows, render_csv};
pub use text::{format_template, render_text};
