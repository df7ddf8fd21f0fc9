//! Per-file extraction and the sequential batch driver.

pub mod code;
pub mod office;
pub mod pdf;

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::error::ExtractionError;
use crate::format::{self, FileKind};
use crate::model::AnalysisResult;

/// Process a list of files in order, appending each outcome to the
/// accumulator. Files are fully extracted one at a time; per-file failures
/// are recorded as typed errors and never abort the batch. Missing and
/// unsupported files are warned about and excluded entirely.
pub fn run_batch(files: &[PathBuf], result: &mut AnalysisResult) {
    for path in files {
        if !path.exists() {
            eprintln!(
                "{} file not found: {}",
                "warning:".yellow().bold(),
                path.display()
            );
            continue;
        }

        match format::detect(path) {
            Some(kind) => extract_into(path, kind, result),
            None => {
                let err = ExtractionError::UnsupportedFormat {
                    file: path.display().to_string(),
                };
                eprintln!("{} {}", "warning:".yellow().bold(), err);
            }
        }
    }
}

/// Run the extractor matching `kind` and record the outcome.
fn extract_into(path: &Path, kind: FileKind, result: &mut AnalysisResult) {
    match kind {
        FileKind::Pdf => {
            println!("{} {}", "Analyzing PDF:".cyan(), path.display());
            let outcome = pdf::extract(path);
            warn_on_failure(&outcome);
            result.pdfs.push(outcome.into());
        }
        FileKind::OfficeDoc => {
            println!("{} {}", "Analyzing document:".cyan(), path.display());
            let outcome = office::extract(path);
            warn_on_failure(&outcome);
            result.docs.push(outcome.into());
        }
        FileKind::Code(language) => {
            println!(
                "{} {} ({})",
                "Analyzing code:".cyan(),
                path.display(),
                language.tag()
            );
            let outcome = code::extract(path, language);
            warn_on_failure(&outcome);
            result.code.push(outcome.into());
        }
    }
}

fn warn_on_failure<T>(outcome: &Result<T, ExtractionError>) {
    if let Err(e) = outcome {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
    }
}
