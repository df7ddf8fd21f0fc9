//! Typed errors for the extraction boundary.
//!
//! Every per-file failure is recorded as an [`ExtractionError`] in place of
//! that file's result; the batch never aborts on one. Only output-artifact
//! write failures are fatal, and those travel as `anyhow` errors out of the
//! CLI layer.

use thiserror::Error;

/// A failed extraction, standing in for a file's result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The extraction backend for this format was not compiled in.
    #[error("{backend} support is not enabled (rebuild with the corresponding cargo feature)")]
    MissingCapability {
        backend: &'static str,
        file: String,
    },

    /// The input file is malformed or could not be parsed.
    #[error("failed to parse {file}: {detail}")]
    ParseFailure { file: String, detail: String },

    /// Reading the input file from the filesystem failed.
    #[error("I/O error reading {file}: {detail}")]
    Io { file: String, detail: String },

    /// The file extension is not in the supported set.
    #[error("unsupported file type: {file}")]
    UnsupportedFormat { file: String },
}

impl ExtractionError {
    /// The file this error stands in for.
    pub fn file(&self) -> &str {
        match self {
            ExtractionError::MissingCapability { file, .. }
            | ExtractionError::ParseFailure { file, .. }
            | ExtractionError::Io { file, .. }
            | ExtractionError::UnsupportedFormat { file } => file,
        }
    }

    /// Stable category name, carried alongside the message in the snapshot.
    pub fn category(&self) -> &'static str {
        match self {
            ExtractionError::MissingCapability { .. } => "missing_capability",
            ExtractionError::ParseFailure { .. } => "parse_failure",
            ExtractionError::Io { .. } => "io_failure",
            ExtractionError::UnsupportedFormat { .. } => "unsupported_format",
        }
    }
}
