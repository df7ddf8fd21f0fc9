//! Command-line interface for docsift.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use walkdir::WalkDir;

use crate::extract;
use crate::format;
use crate::model::AnalysisResult;
use crate::report;
use crate::summary::Summary;

/// Exit codes. Per-file extraction failures are recorded in the outputs and
/// do not affect the exit code; only fatal errors (bad arguments, report
/// write failures) exit non-zero.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

/// Multi-format document analyzer.
///
/// Docsift extracts text and structure from PDFs, Office documents and
/// source code, then renders a Markdown report and a JSON snapshot of
/// everything it found.
#[derive(Parser)]
#[command(name = "docsift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze files and write the report pair
    #[command(visible_alias = "run")]
    Analyze(AnalyzeArgs),
    /// List the file extensions the analyzer recognizes
    Formats,
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Files or directories to analyze (directories are walked recursively)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Markdown report output path
    #[arg(long, default_value = report::DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// JSON snapshot output path
    #[arg(long, default_value = report::DEFAULT_SNAPSHOT_PATH)]
    pub snapshot: PathBuf,
}

/// Run the analyze command: collect files, extract, aggregate, render.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    let files = collect_files(&args.paths)?;
    if files.is_empty() {
        println!("{}", "No supported files found.".yellow());
    }

    let mut result = AnalysisResult::new();
    extract::run_batch(&files, &mut result);
    let summary = Summary::compute(&result);

    report::write_markdown(&args.report, &result, &summary)?;
    report::write_snapshot(&args.snapshot, &result, &summary)?;

    print_run_summary(&result, &summary, args);
    Ok(EXIT_SUCCESS)
}

/// Run the formats command.
pub fn run_formats() -> anyhow::Result<i32> {
    println!("{}", "Supported file extensions:".bold());
    for ext in format::supported_extensions() {
        println!("  .{}", ext);
    }
    Ok(EXIT_SUCCESS)
}

/// Expand the argument list into concrete files. Directories are walked
/// recursively in sorted order, keeping only recognized extensions; explicit
/// file arguments pass through untouched so that missing or unsupported ones
/// still produce a warning downstream.
fn collect_files(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_dir(path, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn collect_dir(root: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            // Skip hidden directories
            !(e.file_type().is_dir() && name.starts_with('.') && e.depth() > 0)
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() && format::detect(entry.path()).is_some() {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(())
}

fn print_run_summary(result: &AnalysisResult, summary: &Summary, args: &AnalyzeArgs) {
    println!();
    println!("{}", "Analysis complete".green().bold());
    println!("  Files analyzed: {}", summary.counts.total());

    let failures = result.failures().len();
    if failures > 0 {
        println!("  {} {}", "Files with errors:".yellow(), failures);
    }
    if !summary.technologies.is_empty() {
        println!("  Technologies: {}", summary.technologies.join(", "));
    }
    println!("  Report: {}", args.report.display());
    println!("  Snapshot: {}", args.snapshot.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_collect_dir_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.py"), "x = 1\n").unwrap();
        std::fs::write(dir.path().join("a.js"), "var x;\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "skip me\n").unwrap();
        std::fs::create_dir(dir.path().join(".hidden")).unwrap();
        std::fs::write(dir.path().join(".hidden").join("c.py"), "y = 2\n").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.js", "b.py"]);
    }

    #[test]
    fn test_explicit_file_arguments_pass_through() {
        let missing = PathBuf::from("/nonexistent/ghost.pdf");
        let files = collect_files(std::slice::from_ref(&missing)).unwrap();
        assert_eq!(files, vec![missing]);
    }

    #[test]
    fn test_run_analyze_writes_report_pair() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("greet.py"),
            "def greet(name):\n    return name\n",
        )
        .unwrap();

        let args = AnalyzeArgs {
            paths: vec![dir.path().to_path_buf()],
            report: dir.path().join("README_RESUMEN.md"),
            snapshot: dir.path().join("analisis_completo.json"),
        };
        let code = run_analyze(&args).unwrap();
        assert_eq!(code, EXIT_SUCCESS);

        let md = std::fs::read_to_string(&args.report).unwrap();
        assert!(md.contains("# Multi-Document Analysis Report"));

        let json = report::read_snapshot(&args.snapshot).unwrap();
        assert_eq!(json["summary"]["archivos_analizados"]["codigo"], 1);
    }
}
