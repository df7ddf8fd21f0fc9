//! PDF text and image extraction.
//!
//! Pages are visited in order; only pages with non-whitespace text get a
//! `PageText` entry, while every page gets an image count. Image counting
//! inspects the page's resource dictionary for `XObject` streams with
//! `Subtype /Image` (inherited resources are not resolved; best-effort).

use std::path::Path;

use crate::error::ExtractionError;
use crate::model::{PageImages, PageText, PdfExtraction};

/// Extract text and image counts from a PDF file.
#[cfg(feature = "pdf")]
pub fn extract(path: &Path) -> Result<PdfExtraction, ExtractionError> {
    use lopdf::Document;

    let file = path.display().to_string();
    let doc = Document::load(path).map_err(|e| ExtractionError::ParseFailure {
        file: file.clone(),
        detail: e.to_string(),
    })?;

    let pages = doc.get_pages();
    let mut extraction = PdfExtraction {
        file: file.clone(),
        page_count: pages.len(),
        full_text: String::new(),
        page_texts: Vec::new(),
        page_images: Vec::new(),
    };

    for (&number, &page_id) in &pages {
        let text = doc
            .extract_text(&[number])
            .map_err(|e| ExtractionError::ParseFailure {
                file: file.clone(),
                detail: format!("page {}: {}", number, e),
            })?;

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            extraction.page_texts.push(PageText {
                page: number as usize,
                text: trimmed.to_string(),
            });
            extraction.full_text.push_str(&text);
            extraction.full_text.push('\n');
        }

        extraction.page_images.push(PageImages {
            page: number as usize,
            image_count: count_page_images(&doc, page_id),
        });
    }

    Ok(extraction)
}

/// Stub when the PDF backend is compiled out: a typed error, never a crash.
#[cfg(not(feature = "pdf"))]
pub fn extract(path: &Path) -> Result<PdfExtraction, ExtractionError> {
    Err(ExtractionError::MissingCapability {
        backend: "PDF",
        file: path.display().to_string(),
    })
}

/// Count `/Image` XObjects referenced by a page's resource dictionary.
#[cfg(feature = "pdf")]
fn count_page_images(doc: &lopdf::Document, page_id: lopdf::ObjectId) -> usize {
    use lopdf::Object;

    let Ok(page) = doc.get_dictionary(page_id) else {
        return 0;
    };
    let Ok(resources) = page.get(b"Resources") else {
        return 0;
    };
    let Ok(resources) = resolve(doc, resources).as_dict() else {
        return 0;
    };
    let Ok(xobjects) = resources.get(b"XObject") else {
        return 0;
    };
    let Ok(xobjects) = resolve(doc, xobjects).as_dict() else {
        return 0;
    };

    xobjects
        .iter()
        .filter(|(_, obj)| {
            let dict = match resolve(doc, obj) {
                Object::Stream(stream) => &stream.dict,
                Object::Dictionary(dict) => dict,
                _ => return false,
            };
            matches!(dict.get(b"Subtype"), Ok(Object::Name(name)) if name.as_slice() == b"Image")
        })
        .count()
}

/// Follow a reference to its target object; non-references pass through.
#[cfg(feature = "pdf")]
fn resolve<'a>(doc: &'a lopdf::Document, obj: &'a lopdf::Object) -> &'a lopdf::Object {
    match obj {
        lopdf::Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

#[cfg(all(test, feature = "pdf"))]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Build a two-page PDF: page 1 says "Intro", page 2 is empty, no images.
    fn build_two_page_pdf() -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 48.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal("Intro")]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id =
            doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let empty_content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));

        let page1_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        let page2_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => empty_content_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page1_id.into(), page2_id.into()],
            "Count" => 2,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn test_two_pages_one_with_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intro.pdf");
        build_two_page_pdf().save(&path).unwrap();

        let extraction = extract(&path).unwrap();
        assert_eq!(extraction.page_count, 2);
        assert_eq!(extraction.page_texts.len(), 1);
        assert_eq!(extraction.page_texts[0].page, 1);
        assert!(extraction.page_texts[0].text.contains("Intro"));
        assert_eq!(extraction.page_images.len(), 2);
        assert_eq!(extraction.page_images[0].image_count, 0);
    }

    #[test]
    fn test_malformed_pdf_is_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.pdf");
        std::fs::write(&path, b"%PDF-1.5 not really a pdf").unwrap();

        let err = extract(&path).unwrap_err();
        assert_eq!(err.category(), "parse_failure");
    }
}
