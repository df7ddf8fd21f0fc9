//! Output rendering: the Markdown report and the JSON snapshot.
//!
//! The Markdown document follows a fixed template; the snapshot serializes
//! the full accumulator (plus the computed summary) onto the established
//! `analisis_completo.json` schema with deterministic field order. Non-ASCII
//! content passes through literally (serde_json does not escape it).

use std::path::Path;

use anyhow::Context;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::model::{
    AnalysisResult, CodeExtraction, DocExtraction, FunctionEntry, Outcome, PdfExtraction,
};
use crate::summary::Summary;

/// Default Markdown report path.
pub const DEFAULT_REPORT_PATH: &str = "README_RESUMEN.md";
/// Default snapshot path.
pub const DEFAULT_SNAPSHOT_PATH: &str = "analisis_completo.json";

/// Badge markup per technology tag; tags without an entry are skipped.
const TECH_BADGES: &[(&str, &str)] = &[
    (
        "Python",
        "![Python](https://img.shields.io/badge/Python-3776AB?style=for-the-badge&logo=python&logoColor=white)",
    ),
    (
        "JavaScript",
        "![JavaScript](https://img.shields.io/badge/JavaScript-F7DF1E?style=for-the-badge&logo=javascript&logoColor=black)",
    ),
    (
        "Java",
        "![Java](https://img.shields.io/badge/Java-ED8B00?style=for-the-badge&logo=java&logoColor=white)",
    ),
    (
        "C++",
        "![C++](https://img.shields.io/badge/C++-00599C?style=for-the-badge&logo=c%2B%2B&logoColor=white)",
    ),
    (
        "Web Framework",
        "![Web](https://img.shields.io/badge/Web-Framework-green?style=for-the-badge)",
    ),
    (
        "Data Science",
        "![Data Science](https://img.shields.io/badge/Data-Science-orange?style=for-the-badge)",
    ),
    (
        "Machine Learning",
        "![ML](https://img.shields.io/badge/Machine-Learning-red?style=for-the-badge)",
    ),
];

/// How many functions to list per code-file subsection.
const FUNCTIONS_SHOWN: usize = 5;

fn badge_for(tag: &str) -> Option<&'static str> {
    TECH_BADGES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, badge)| *badge)
}

fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Assemble the Markdown report from the fixed template.
pub fn render_markdown(result: &AnalysisResult, summary: &Summary) -> String {
    let mut md = String::new();

    // Title and badge block.
    md.push_str("<div align=\"center\">\n\n");
    md.push_str("# Multi-Document Analysis Report\n\n");
    md.push_str("**Automated summary of documentation (PDF/Office) and source code.**\n\n");

    let badges: Vec<&str> = summary
        .technologies
        .iter()
        .filter_map(|t| badge_for(t))
        .collect();
    if !badges.is_empty() {
        md.push_str(&badges.join(" "));
        md.push_str("\n\n");
    }
    md.push_str(&format!(
        "![Files](https://img.shields.io/badge/Files-{}-blue?style=for-the-badge)\n\n",
        summary.counts.total()
    ));
    md.push_str("</div>\n\n---\n\n");

    // Table of contents.
    md.push_str("## Contents\n\n");
    md.push_str("- [Executive Summary](#executive-summary)\n");
    md.push_str("- [Code Analysis](#code-analysis)\n");
    md.push_str("- [Documentation](#documentation)\n");
    md.push_str("- [Recommendations](#recommendations)\n");
    md.push_str("- [Analysis Statistics](#analysis-statistics)\n\n");

    // Executive summary.
    md.push_str("## Executive Summary\n\n");
    md.push_str(&format!(
        "This project was analyzed automatically by processing **{} files**:\n\n",
        summary.counts.total()
    ));
    md.push_str(&format!("- **PDF documents:** {}\n", summary.counts.pdf));
    md.push_str(&format!("- **Office documents:** {}\n", summary.counts.doc));
    md.push_str(&format!("- **Code files:** {}\n\n", summary.counts.code));

    md.push_str("### Detected technologies\n\n");
    for tech in &summary.technologies {
        md.push_str(&format!("- **{}**\n", tech));
    }
    md.push('\n');

    // Per-code-file subsections (error entries skipped).
    md.push_str("## Code Analysis\n\n");
    for code in result.code_successes() {
        push_code_section(&mut md, code);
    }

    // Documentation subsections.
    md.push_str("## Documentation\n\n");
    for pdf in result.pdf_successes() {
        push_pdf_section(&mut md, pdf);
    }
    for doc in result.doc_successes() {
        push_doc_section(&mut md, doc);
    }

    // Recommendations.
    md.push_str("## Recommendations\n\n");
    for rec in &summary.recommendations {
        md.push_str(&format!("- {}\n", rec));
    }
    md.push('\n');

    // Closing statistics table.
    md.push_str("## Analysis Statistics\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| PDF files processed | {} |\n", summary.counts.pdf));
    md.push_str(&format!(
        "| Office documents processed | {} |\n",
        summary.counts.doc
    ));
    md.push_str(&format!(
        "| Code files analyzed | {} |\n",
        summary.counts.code
    ));
    md.push_str(&format!(
        "| Technologies detected | {} |\n",
        summary.technologies.len()
    ));
    md.push_str(&format!(
        "| Analysis date | {} |\n",
        summary.timestamp.format("%Y-%m-%d %H:%M:%S")
    ));

    md
}

fn push_code_section(md: &mut String, code: &CodeExtraction) {
    md.push_str(&format!("### `{}`\n\n", basename(&code.file)));
    md.push_str(&format!("- **Language:** {}\n", code.language));
    md.push_str(&format!("- **Lines of code:** {}\n", code.line_count));
    md.push_str(&format!("- **Functions:** {}\n", code.functions.len()));
    md.push_str(&format!("- **Classes:** {}\n", code.classes.len()));
    md.push_str(&format!("- **Imports:** {}\n\n", code.imports.len()));

    if !code.functions.is_empty() {
        md.push_str("**Main functions:**\n\n");
        for entry in code.functions.iter().take(FUNCTIONS_SHOWN) {
            match entry {
                FunctionEntry::Detailed(d) => {
                    md.push_str(&format!(
                        "- `{}({})` (line {})\n",
                        d.name,
                        d.params.join(", "),
                        d.line
                    ));
                }
                FunctionEntry::Name(name) => {
                    md.push_str(&format!("- `{}()`\n", name));
                }
            }
        }
        md.push('\n');
    }
}

fn push_pdf_section(md: &mut String, pdf: &PdfExtraction) {
    let total_images: usize = pdf.page_images.iter().map(|p| p.image_count).sum();
    md.push_str(&format!("### {}\n\n", basename(&pdf.file)));
    md.push_str(&format!("- **Pages:** {}\n", pdf.page_count));
    md.push_str(&format!("- **Images:** {}\n\n", total_images));
}

fn push_doc_section(md: &mut String, doc: &DocExtraction) {
    md.push_str(&format!("### {}\n\n", basename(&doc.file)));
    md.push_str(&format!("- **Paragraphs:** {}\n", doc.paragraph_count));
    md.push_str(&format!("- **Tables:** {}\n", doc.table_count));
    md.push_str(&format!("- **Images:** {}\n\n", doc.image_count));
}

/// Write the Markdown report. Write failures are fatal I/O errors.
pub fn write_markdown(
    path: &Path,
    result: &AnalysisResult,
    summary: &Summary,
) -> anyhow::Result<()> {
    let markdown = render_markdown(result, summary);
    std::fs::write(path, markdown)
        .with_context(|| format!("writing Markdown report to {}", path.display()))?;
    Ok(())
}

/// Full-result snapshot mirroring the fixed JSON schema.
#[derive(Serialize)]
struct Snapshot<'a> {
    pdf_content: &'a [Outcome<PdfExtraction>],
    doc_content: &'a [Outcome<DocExtraction>],
    #[serde(serialize_with = "serialize_code_map")]
    code_analysis: &'a [Outcome<CodeExtraction>],
    summary: &'a Summary,
    timestamp: String,
}

/// Code entries serialize as a map keyed by file path, insertion order.
fn serialize_code_map<S: Serializer>(
    entries: &[Outcome<CodeExtraction>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for entry in entries {
        let key = match entry {
            Outcome::Success(code) => code.file.as_str(),
            Outcome::Failure(e) => e.file(),
        };
        map.serialize_entry(key, entry)?;
    }
    map.end()
}

/// Serialize the snapshot to pretty-printed JSON.
pub fn snapshot_json(result: &AnalysisResult, summary: &Summary) -> anyhow::Result<String> {
    let snapshot = Snapshot {
        pdf_content: &result.pdfs,
        doc_content: &result.docs,
        code_analysis: &result.code,
        summary,
        timestamp: result.timestamp.to_rfc3339(),
    };
    serde_json::to_string_pretty(&snapshot).context("serializing analysis snapshot")
}

/// Write the snapshot file. Write failures are fatal I/O errors.
pub fn write_snapshot(
    path: &Path,
    result: &AnalysisResult,
    summary: &Summary,
) -> anyhow::Result<()> {
    let json = snapshot_json(result, summary)?;
    std::fs::write(path, json)
        .with_context(|| format!("writing snapshot to {}", path.display()))?;
    Ok(())
}

/// Read a snapshot back as a JSON value (round-trip verification).
pub fn read_snapshot(path: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot from {}", path.display()))?;
    serde_json::from_str(&raw).context("parsing snapshot JSON")
}
