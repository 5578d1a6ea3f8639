//! CSV output.
//!
//! Each template produces a quoted header row followed by one row per
//! occurrence holding the raw values of its varying fields:
//!
//! ```text
//! "req took [1]ms"
//! 10
//! 20
//! ```

use crate::analysis::{Analysis, SummarySegment, TemplateSummary};
use crate::options::OutputOptions;

/// Header row for a template: literal text with `[N]` in place of each field.
///
/// Double quotes in literal text are dropped so the header stays one field.
pub fn csv_header(summary: &TemplateSummary, show_count: bool) -> String {
    let mut header = String::from("\"");
    let mut column = 0;

    for segment in &summary.segments {
        match segment {
            SummarySegment::Literal { text } => header.extend(text.chars().filter(|&c| c != '"')),
            SummarySegment::Field { leading_space, .. } => {
                column += 1;
                if *leading_space {
                    header.push(' ');
                }
                header.push_str(&format!("[{column}]"));
            }
        }
    }
    header.push('"');

    if show_count {
        header.push_str(&format!(",{}", summary.count));
    }

    header
}

/// Data rows for a template, one per occurrence.
///
/// Templates without varying fields have no data rows.
pub fn csv_rows(summary: &TemplateSummary) -> Vec<String> {
    if summary.is_invariant() {
        return Vec::new();
    }

    summary
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect()
}

/// Render every visible template of an analysis as CSV blocks.
pub fn render_csv(analysis: &Analysis, options: &OutputOptions) -> String {
    let mut out = String::new();
    for summary in analysis.visible(options.suppress_invariant) {
        out.push_str(&csv_header(summary, options.show_count));
        out.push('\n');
        for row in csv_rows(summary) {
            out.push_str(&row);
            out.push('\n');
        }
    }
    out
}
