//! Output rendering for the CLI

use console::style;
use linestatslib::{Analysis, OutputOptions, TemplateSummary};
use serde::Serialize;

/// One analyzed source, as written in JSON mode
#[derive(Debug, Serialize)]
pub struct SourceReport {
    /// File name, or `<stdin>`
    pub source: String,
    /// Number of lines read
    pub lines: usize,
    pub templates: Vec<TemplateSummary>,
}

impl SourceReport {
    pub fn new(source: &str, analysis: &Analysis, options: &OutputOptions) -> Self {
        Self {
            source: source.to_string(),
            lines: analysis.lines,
            templates: analysis
                .visible(options.suppress_invariant)
                .cloned()
                .collect(),
        }
    }
}

/// Prefix a rendered text or CSV block with its source header.
///
/// With `header`, the block is preceded by `==> name <==`, separated from
/// the previous block by a blank line unless it is the first.
pub fn with_header(name: &str, body: String, header: bool, first: bool) -> String {
    if !header {
        return body;
    }

    let separator = if first { "" } else { "\n" };
    let title = format!("==> {name} <==");
    format!("{separator}{}\n{body}", style(title).bold())
}

/// Render all sources as one JSON array.
pub fn render_json(reports: &[SourceReport]) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(reports)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linestatslib::{analyze_lines, AnalyzeOptions, OutputFormat};

    fn analysis() -> Analysis {
        analyze_lines(["x 1", "x 3", "same"], AnalyzeOptions::new()).unwrap()
    }

    #[test]
    fn body_without_header_is_unchanged() {
        let out = with_header("a.log", "x 1-3(2.000000+/-1.0)\n".to_string(), false, true);
        assert_eq!(out, "x 1-3(2.000000+/-1.0)\n");
    }

    #[test]
    fn headers_between_sources() {
        console::set_colors_enabled(false);
        let first = with_header("a.log", "x 1\n".to_string(), true, true);
        let second = with_header("b.log", "x 2\n".to_string(), true, false);

        assert_eq!(first, "==> a.log <==\nx 1\n");
        assert_eq!(second, "\n==> b.log <==\nx 2\n");
    }

    #[test]
    fn json_report_respects_suppression() {
        let options = OutputOptions::new()
            .format(OutputFormat::Json)
            .suppress_invariant(true);
        let report = SourceReport::new("<stdin>", &analysis(), &options);
        let json = render_json(&[report]).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["source"], "<stdin>");
        assert_eq!(parsed[0]["lines"], 3);
        assert_eq!(parsed[0]["templates"].as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["templates"][0]["count"], 2);
        assert_eq!(parsed[0]["templates"][0]["segments"][1]["type"], "field");
    }
}
