//! Office-document (.docx) extraction.
//!
//! A .docx file is a zip archive; the document body lives in
//! `word/document.xml` and the relationship list in
//! `word/_rels/document.xml.rels`. Both are stream-parsed with quick-xml.
//! Body paragraphs are counted in document order (1-based, empty ones
//! included in the count but not recorded), top-level tables become ordered
//! cell grids, and images are counted from image-typed relationships.
//!
//! Legacy binary `.doc` files are not a zip archive and fail extraction as a
//! parse error.

use std::path::Path;

use crate::error::ExtractionError;
use crate::model::{DocExtraction, Paragraph, TableContent};

/// Extract paragraphs, tables and the image count from an Office document.
#[cfg(feature = "office")]
pub fn extract(path: &Path) -> Result<DocExtraction, ExtractionError> {
    use std::fs::File;
    use std::io::Read;

    let file = path.display().to_string();
    let handle = File::open(path).map_err(|e| ExtractionError::Io {
        file: file.clone(),
        detail: e.to_string(),
    })?;
    let mut archive = zip::ZipArchive::new(handle).map_err(|e| ExtractionError::ParseFailure {
        file: file.clone(),
        detail: format!("not a valid Office archive: {}", e),
    })?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractionError::ParseFailure {
            file: file.clone(),
            detail: "missing word/document.xml".to_string(),
        })?
        .read_to_string(&mut document_xml)
        .map_err(|e| ExtractionError::Io {
            file: file.clone(),
            detail: e.to_string(),
        })?;

    let body = parse_document_xml(&document_xml).map_err(|e| ExtractionError::ParseFailure {
        file: file.clone(),
        detail: e.to_string(),
    })?;

    // A document without relationships simply has no images.
    let image_count = match archive.by_name("word/_rels/document.xml.rels") {
        Ok(mut entry) => {
            let mut rels_xml = String::new();
            entry
                .read_to_string(&mut rels_xml)
                .map_err(|e| ExtractionError::Io {
                    file: file.clone(),
                    detail: e.to_string(),
                })?;
            count_image_relationships(&rels_xml).map_err(|e| ExtractionError::ParseFailure {
                file: file.clone(),
                detail: e.to_string(),
            })?
        }
        Err(_) => 0,
    };

    Ok(DocExtraction {
        file,
        paragraph_count: body.paragraph_count,
        full_text: body.full_text,
        paragraphs: body.paragraphs,
        table_count: body.tables.len(),
        tables: body.tables,
        image_count,
    })
}

/// Stub when the Office backend is compiled out: a typed error, never a crash.
#[cfg(not(feature = "office"))]
pub fn extract(path: &Path) -> Result<DocExtraction, ExtractionError> {
    Err(ExtractionError::MissingCapability {
        backend: "Office document",
        file: path.display().to_string(),
    })
}

/// Parsed body content of `word/document.xml`.
#[cfg(feature = "office")]
struct DocumentBody {
    paragraph_count: usize,
    paragraphs: Vec<Paragraph>,
    full_text: String,
    tables: Vec<TableContent>,
}

/// Stream-parse the document body.
///
/// Paragraphs inside table cells belong to the cell text, not the body
/// paragraph list. Nested tables are flattened into their enclosing cell.
#[cfg(feature = "office")]
fn parse_document_xml(xml: &str) -> Result<DocumentBody, quick_xml::Error> {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_str(xml);

    let mut body = DocumentBody {
        paragraph_count: 0,
        paragraphs: Vec::new(),
        full_text: String::new(),
        tables: Vec::new(),
    };

    let mut table_depth = 0usize;
    let mut in_body_para = false;
    let mut in_text = false;
    let mut in_cell = false;
    let mut current_para = String::new();
    let mut current_cell = String::new();
    let mut current_row: Vec<String> = Vec::new();
    let mut current_rows: Vec<Vec<String>> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" if table_depth == 0 => {
                    body.paragraph_count += 1;
                    in_body_para = true;
                    current_para.clear();
                }
                b"w:tbl" => {
                    table_depth += 1;
                    if table_depth == 1 {
                        current_rows.clear();
                    }
                }
                b"w:tr" if table_depth == 1 => current_row.clear(),
                b"w:tc" if table_depth == 1 => {
                    in_cell = true;
                    current_cell.clear();
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" if table_depth == 0 && in_body_para => {
                    let trimmed = current_para.trim();
                    if !trimmed.is_empty() {
                        body.paragraphs.push(Paragraph {
                            number: body.paragraph_count,
                            text: trimmed.to_string(),
                        });
                        body.full_text.push_str(&current_para);
                        body.full_text.push('\n');
                    }
                    in_body_para = false;
                }
                b"w:tbl" => {
                    if table_depth == 1 {
                        body.tables.push(TableContent {
                            table: body.tables.len() + 1,
                            rows: std::mem::take(&mut current_rows),
                        });
                    }
                    table_depth = table_depth.saturating_sub(1);
                }
                b"w:tr" if table_depth == 1 => {
                    current_rows.push(std::mem::take(&mut current_row));
                }
                b"w:tc" if table_depth == 1 => {
                    current_row.push(current_cell.trim().to_string());
                    in_cell = false;
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t.unescape()?;
                if table_depth > 0 && in_cell {
                    current_cell.push_str(&text);
                } else if in_body_para {
                    current_para.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(body)
}

/// Count relationships whose `Type` is image-flavored.
#[cfg(feature = "office")]
fn count_image_relationships(xml: &str) -> Result<usize, quick_xml::Error> {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_str(xml);
    let mut count = 0usize;

    loop {
        let event = reader.read_event()?;
        let element = match &event {
            Event::Start(e) | Event::Empty(e) => e,
            Event::Eof => break,
            _ => continue,
        };
        if element.name().as_ref() != b"Relationship" {
            continue;
        }
        for attr in element.attributes() {
            let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
            if attr.key.as_ref() == b"Type" && attr.unescape_value()?.contains("image") {
                count += 1;
                break;
            }
        }
    }

    Ok(count)
}
