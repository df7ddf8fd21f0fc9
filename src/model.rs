//! Typed extraction results and the per-run accumulator.
//!
//! The Rust-side names are English; `serde(rename)` maps every field onto the
//! snapshot schema consumed by downstream tooling (`analisis_completo.json`),
//! which must stay byte-compatible.

use chrono::{DateTime, Local};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ExtractionError;

/// Trimmed text of one non-empty PDF page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    #[serde(rename = "pagina")]
    pub page: usize,
    #[serde(rename = "texto")]
    pub text: String,
}

/// Raster-image count of one PDF page (recorded for every page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageImages {
    #[serde(rename = "pagina")]
    pub page: usize,
    #[serde(rename = "cantidad_imagenes")]
    pub image_count: usize,
}

/// Extraction result for one PDF file.
///
/// Invariant: `page_texts.len() <= page_count`; only pages with
/// non-whitespace text are recorded there. `page_images` has one entry per
/// page regardless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfExtraction {
    #[serde(rename = "archivo")]
    pub file: String,
    #[serde(rename = "paginas")]
    pub page_count: usize,
    #[serde(rename = "texto_completo")]
    pub full_text: String,
    #[serde(rename = "texto_por_pagina")]
    pub page_texts: Vec<PageText>,
    #[serde(rename = "imagenes")]
    pub page_images: Vec<PageImages>,
}

/// One non-empty paragraph, with its 1-based position in the document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(rename = "numero")]
    pub number: usize,
    #[serde(rename = "texto")]
    pub text: String,
}

/// Cell grid of one table, rows in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableContent {
    #[serde(rename = "tabla")]
    pub table: usize,
    #[serde(rename = "contenido")]
    pub rows: Vec<Vec<String>>,
}

/// Extraction result for one Office document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocExtraction {
    #[serde(rename = "archivo")]
    pub file: String,
    /// Count of all body paragraphs, empty ones included.
    #[serde(rename = "parrafos")]
    pub paragraph_count: usize,
    #[serde(rename = "texto_completo")]
    pub full_text: String,
    #[serde(rename = "parrafos_texto")]
    pub paragraphs: Vec<Paragraph>,
    #[serde(rename = "tablas")]
    pub table_count: usize,
    #[serde(rename = "tablas_contenido")]
    pub tables: Vec<TableContent>,
    #[serde(rename = "imagenes")]
    pub image_count: usize,
}

/// Function facts from the structural path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDetail {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "linea")]
    pub line: usize,
    #[serde(rename = "argumentos")]
    pub params: Vec<String>,
    #[serde(rename = "docstring")]
    pub docstring: Option<String>,
}

/// A detected function: full facts (structural path) or a bare name
/// (pattern path, deduplicated and unordered).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionEntry {
    Detailed(FunctionDetail),
    Name(String),
}

impl FunctionEntry {
    pub fn name(&self) -> &str {
        match self {
            FunctionEntry::Detailed(d) => &d.name,
            FunctionEntry::Name(n) => n,
        }
    }
}

/// Class facts from the structural path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDetail {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "linea")]
    pub line: usize,
    #[serde(rename = "docstring")]
    pub docstring: Option<String>,
}

/// A detected class or interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassEntry {
    Detailed(ClassDetail),
    Name(String),
}

impl ClassEntry {
    pub fn name(&self) -> &str {
        match self {
            ClassEntry::Detailed(d) => &d.name,
            ClassEntry::Name(n) => n,
        }
    }
}

/// Extraction result for one source-code file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeExtraction {
    #[serde(rename = "archivo")]
    pub file: String,
    /// Language display tag ("Python", "C++", ...).
    #[serde(rename = "tipo")]
    pub language: String,
    #[serde(rename = "lineas_codigo")]
    pub line_count: usize,
    #[serde(rename = "funciones")]
    pub functions: Vec<FunctionEntry>,
    #[serde(rename = "clases")]
    pub classes: Vec<ClassEntry>,
    pub imports: Vec<String>,
    #[serde(rename = "comentarios")]
    pub comments: Vec<String>,
}

/// A per-file result: the extraction, or the typed error standing in for it.
///
/// Failures serialize as `{"error": <message>, "categoria": <category>}` so
/// that error entries remain distinguishable in the snapshot without aborting
/// the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure(ExtractionError),
}

impl<T> Outcome<T> {
    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ExtractionError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(e) => Some(e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl<T> From<Result<T, ExtractionError>> for Outcome<T> {
    fn from(res: Result<T, ExtractionError>) -> Self {
        match res {
            Ok(v) => Outcome::Success(v),
            Err(e) => Outcome::Failure(e),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Success(v) => v.serialize(serializer),
            Outcome::Failure(e) => {
                let mut s = serializer.serialize_struct("ExtractionError", 2)?;
                s.serialize_field("error", &e.to_string())?;
                s.serialize_field("categoria", e.category())?;
                s.end()
            }
        }
    }
}

/// Accumulator for one analysis run.
///
/// Owned by the caller for the duration of a batch: created at run start,
/// appended to by extractor completions, read by the aggregator and renderer,
/// then discarded. Never a process-wide singleton.
#[derive(Debug)]
pub struct AnalysisResult {
    /// PDF results in input order.
    pub pdfs: Vec<Outcome<PdfExtraction>>,
    /// Office-document results in input order.
    pub docs: Vec<Outcome<DocExtraction>>,
    /// Code results in input order; serialized keyed by file path.
    pub code: Vec<Outcome<CodeExtraction>>,
    /// Run start time; the only run-to-run variation in the outputs.
    pub timestamp: DateTime<Local>,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self {
            pdfs: Vec::new(),
            docs: Vec::new(),
            code: Vec::new(),
            timestamp: Local::now(),
        }
    }

    /// Successful PDF extractions, error entries skipped.
    pub fn pdf_successes(&self) -> impl Iterator<Item = &PdfExtraction> {
        self.pdfs.iter().filter_map(Outcome::success)
    }

    /// Successful document extractions, error entries skipped.
    pub fn doc_successes(&self) -> impl Iterator<Item = &DocExtraction> {
        self.docs.iter().filter_map(Outcome::success)
    }

    /// Successful code extractions, error entries skipped.
    pub fn code_successes(&self) -> impl Iterator<Item = &CodeExtraction> {
        self.code.iter().filter_map(Outcome::success)
    }

    /// All recorded errors across categories, in input order per category.
    pub fn failures(&self) -> Vec<&ExtractionError> {
        let mut errors: Vec<&ExtractionError> = Vec::new();
        errors.extend(self.pdfs.iter().filter_map(Outcome::failure));
        errors.extend(self.docs.iter().filter_map(Outcome::failure));
        errors.extend(self.code.iter().filter_map(Outcome::failure));
        errors
    }

    /// Total number of recorded entries, failed ones included.
    pub fn total_entries(&self) -> usize {
        self.pdfs.len() + self.docs.len() + self.code.len()
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::new()
    }
}
