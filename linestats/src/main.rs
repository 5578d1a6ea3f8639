//! # linestats
//!
//! A CLI tool that prints `min-max(mean+/-stddev)` statistics in place of the
//! numbers in a stream of lines.
//!
//! ## Overview
//!
//! linestats is built on top of linestatslib. Lines that differ only in their
//! numbers are grouped into one template, and each template is printed once
//! with its numbers summarized. Numbers that never changed are printed as is.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize a log read from stdin
//! make 2>&1 | linestats
//!
//! # Summarize several files, each on its own
//! linestats run1.log run2.log
//!
//! # Leave min and max out of the mean and standard deviation
//! linestats --trim-outliers bench.log
//!
//! # Treat the first number of every line (e.g. a request id) as text
//! linestats --skip 1 access.log
//!
//! # Only show templates where something varied, with occurrence counts
//! linestats -u -n bench.log
//!
//! # Raw values per template, or everything as JSON
//! linestats --csv bench.log
//! linestats --output json bench.log
//! ```

mod logging;
mod render;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use linestatslib::output::{render_csv, render_text};
use linestatslib::{
    analyze_file, analyze_reader, Analysis, AnalyzeOptions, OutputFormat, OutputOptions,
};
use tracing::info;

use crate::render::{render_json, with_header, SourceReport};

const STDIN_NAME: &str = "<stdin>";

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("linestats")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print min-max(mean+/-stddev) stats in place of the numbers in a stream of lines")
        .arg(
            Arg::new("files")
                .action(ArgAction::Append)
                .help("Files to analyze, each on its own (defaults to stdin; '-' also reads stdin)"),
        )
        .arg(
            Arg::new("trim-outliers")
                .long("trim-outliers")
                .action(ArgAction::SetTrue)
                .help("Remove max and min results from average and standard deviation"),
        )
        .arg(
            Arg::new("skip")
                .short('s')
                .long("skip")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("0")
                .help("Treat the first N numbers of every line as literal text"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "csv", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .action(ArgAction::SetTrue)
                .help("Shorthand for --output csv"),
        )
        .arg(
            Arg::new("suppress-invariant")
                .short('u')
                .long("suppress-invariant")
                .action(ArgAction::SetTrue)
                .help("Omit lines where no number varied"),
        )
        .arg(
            Arg::new("count")
                .short('n')
                .long("count")
                .action(ArgAction::SetTrue)
                .help("Show how many lines matched each template"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more detail to stderr (repeat for more)"),
        )
}

/// Extract analysis options from matches
fn extract_analyze_options(matches: &ArgMatches) -> AnalyzeOptions {
    let skip = matches.get_one::<usize>("skip").copied().unwrap_or(0);

    AnalyzeOptions::new()
        .skip(skip)
        .trim_outliers(matches.get_flag("trim-outliers"))
}

/// Extract output options from matches
fn extract_output_options(matches: &ArgMatches) -> anyhow::Result<OutputOptions> {
    let format = if matches.get_flag("csv") {
        OutputFormat::Csv
    } else {
        matches
            .get_one::<String>("output")
            .map(|s| s.parse::<OutputFormat>())
            .transpose()?
            .unwrap_or_default()
    };

    Ok(OutputOptions::new()
        .format(format)
        .suppress_invariant(matches.get_flag("suppress-invariant"))
        .show_count(matches.get_flag("count")))
}

/// Extract input sources from matches; stdin when none are given
fn extract_sources(matches: &ArgMatches) -> Vec<String> {
    let files: Vec<String> = matches
        .get_many::<String>("files")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    if files.is_empty() {
        vec!["-".to_string()]
    } else {
        files
    }
}

fn display_name(source: &str) -> &str {
    if source == "-" {
        STDIN_NAME
    } else {
        source
    }
}

/// Analyze one source from start to end.
fn analyze_source(source: &str, options: AnalyzeOptions) -> anyhow::Result<Analysis> {
    let analysis = if source == "-" {
        analyze_reader(io::stdin().lock(), options)
            .with_context(|| format!("reading {STDIN_NAME}"))?
    } else {
        analyze_file(source, options)?
    };

    info!(
        source = display_name(source),
        lines = analysis.lines,
        templates = analysis.templates.len(),
        "analyzed source"
    );

    Ok(analysis)
}

fn write_stdout(text: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Process every source in order and write the results.
///
/// A source that cannot be read is reported and skipped; the remaining
/// sources are still processed. Returns whether every source succeeded.
fn run(matches: &ArgMatches) -> anyhow::Result<bool> {
    let analyze_options = extract_analyze_options(matches);
    let output_options = extract_output_options(matches)?;
    let sources = extract_sources(matches);
    let headers = sources.len() > 1;

    let mut ok = true;
    let mut reports = Vec::new();
    let mut first = true;

    for source in &sources {
        let name = display_name(source);
        let analysis = match analyze_source(source, analyze_options) {
            Ok(analysis) => analysis,
            Err(e) => {
                eprintln!("Error: {e:#}");
                ok = false;
                continue;
            }
        };

        let body = match output_options.format {
            OutputFormat::Json => {
                reports.push(SourceReport::new(name, &analysis, &output_options));
                continue;
            }
            OutputFormat::Text => render_text(&analysis, &output_options),
            OutputFormat::Csv => render_csv(&analysis, &output_options),
        };
        write_stdout(&with_header(name, body, headers, first))?;
        first = false;
    }

    if output_options.format == OutputFormat::Json {
        write_stdout(&render_json(&reports)?)?;
    }

    Ok(ok)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    logging::init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
