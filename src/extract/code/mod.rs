//! Source-code extraction: structural path for the native language,
//! pattern path for everything else.

pub mod patterns;
pub mod python;

use std::fs;
use std::path::Path;

use crate::error::ExtractionError;
use crate::format::Language;
use crate::model::CodeExtraction;

/// Extract facts from a source file, choosing the path by language.
pub fn extract(path: &Path, language: Language) -> Result<CodeExtraction, ExtractionError> {
    let file = path.display().to_string();
    let source = fs::read_to_string(path).map_err(|e| ExtractionError::Io {
        file: file.clone(),
        detail: e.to_string(),
    })?;

    if language.is_native() {
        python::extract(&file, &source)
    } else {
        Ok(patterns::extract(&file, &source, language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FunctionEntry;

    #[test]
    fn test_dispatch_native_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mod.py");
        std::fs::write(&path, "def run():\n    pass\n").unwrap();

        let extraction = extract(&path, Language::Python).unwrap();
        assert_eq!(extraction.language, "Python");
        assert!(matches!(
            extraction.functions[0],
            FunctionEntry::Detailed(_)
        ));
    }

    #[test]
    fn test_dispatch_pattern_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.js");
        std::fs::write(&path, "function run() {}\n").unwrap();

        let extraction = extract(&path, Language::JavaScript).unwrap();
        assert_eq!(extraction.language, "JavaScript");
        assert!(matches!(extraction.functions[0], FunctionEntry::Name(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = extract(Path::new("/nonexistent/x.py"), Language::Python).unwrap_err();
        assert_eq!(err.category(), "io_failure");
    }
}
