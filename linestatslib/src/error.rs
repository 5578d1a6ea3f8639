//! Error types for linestatslib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while analyzing a source
#[derive(Error, Debug)]
pub enum LinestatsError {
    /// Failed to open or read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A line matched a template whose numeric columns do not line up with it.
    ///
    /// Template equality guarantees both sides have the same numeric positions,
    /// so this indicates a bug in the registry rather than bad input.
    #[error("line {line} matched a template with {expected} numeric fields but has {found}")]
    ShapeMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Unknown output format name
    #[error("unknown output format '{0}' (expected text, csv or json)")]
    UnknownFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
