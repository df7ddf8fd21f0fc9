//! Docsift - multi-format document analyzer.
//!
//! Docsift walks a set of files, extracts text and structure from each one
//! according to its detected format, and renders the combined results as a
//! Markdown report plus a JSON snapshot.
//!
//! # Architecture
//!
//! - `format`: extension-based format detection
//! - `extract`: per-format extractors and the sequential batch driver
//!   - `extract::pdf`: page text and image counts via lopdf
//!   - `extract::office`: DOCX paragraphs, tables and images via zip + quick-xml
//!   - `extract::code`: structural (tree-sitter) and pattern (regex) paths
//! - `summary`: batch aggregation, technology tags, recommendations
//! - `report`: Markdown and JSON snapshot rendering
//! - `model`: typed extraction results and the per-run accumulator
//!
//! PDF and Office support are cargo features (`pdf`, `office`, both on by
//! default); with a feature disabled the matching extractor reports a typed
//! missing-capability error per file instead of failing the build.

pub mod cli;
pub mod error;
pub mod extract;
pub mod format;
pub mod model;
pub mod report;
pub mod summary;

pub use error::ExtractionError;
pub use format::{detect, FileKind, Language};
pub use model::{AnalysisResult, CodeExtraction, DocExtraction, Outcome, PdfExtraction};
pub use summary::Summary;
