//! Text output.

use crate::analysis::{Analysis, SummarySegment, TemplateSummary};
use crate::options::OutputOptions;
use crate::stats::ColumnStats;

/// Format one template as a single line (without newline).
///
/// Literal text is copied verbatim. Varying fields become
/// `min-max(mean+/-stddev)`, preceded by a space when the field was preceded
/// by whitespace in the input.
pub fn format_template(summary: &TemplateSummary, show_count: bool) -> String {
    let mut out = String::new();

    for segment in &summary.segments {
        match segment {
            SummarySegment::Literal { text } => out.push_str(text),
            SummarySegment::Field {
                leading_space,
                stats,
                ..
            } => {
                if *leading_space {
                    out.push(' ');
                }
                out.push_str(&format_stats(stats));
            }
        }
    }

    if show_count {
        out.push_str(&format!(" ({})", summary.count));
    }

    out
}

fn format_stats(stats: &ColumnStats) -> String {
    format!(
        "{}-{}({:.6}+/-{:.1})",
        stats.min, stats.max, stats.mean, stats.stddev
    )
}

/// Render every visible template of an analysis, one per line.
pub fn render_text(analysis: &Analysis, options: &OutputOptions) -> String {
    let mut out = String::new();
    for summary in analysis.visible(options.suppress_invariant) {
        out.push_str(&format_template(summary, options.show_count));
        out.push('\n');
    }
    out
}
