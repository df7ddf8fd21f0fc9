//! File-format detection by extension.
//!
//! Classification is decided solely by the lowercased file extension against
//! a fixed lookup table. Unsupported extensions are excluded from processing
//! entirely; the caller emits a warning and moves on.

use std::path::Path;

use phf::phf_map;

/// Source-code languages the analyzer recognizes.
///
/// Python is the designated native language: it gets the structural
/// (syntax-tree) extraction path. Every other language goes through the
/// best-effort regex pattern path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Cpp,
    C,
    CSharp,
    Php,
    Ruby,
    Go,
}

impl Language {
    /// Display tag used in reports and the technology set.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::CSharp => "C#",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Go => "Go",
        }
    }

    /// Whether this language has a structural parser.
    pub fn is_native(&self) -> bool {
        matches!(self, Language::Python)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Content category of a supported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    OfficeDoc,
    Code(Language),
}

/// Code extensions mapped to their language.
static CODE_EXTENSIONS: phf::Map<&'static str, Language> = phf_map! {
    "py" => Language::Python,
    "js" => Language::JavaScript,
    "ts" => Language::TypeScript,
    "java" => Language::Java,
    "cpp" => Language::Cpp,
    "c" => Language::C,
    "cs" => Language::CSharp,
    "php" => Language::Php,
    "rb" => Language::Ruby,
    "go" => Language::Go,
};

/// Classify a path by its extension. Returns `None` for unsupported files.
pub fn detect(path: &Path) -> Option<FileKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "pdf" => Some(FileKind::Pdf),
        "docx" | "doc" => Some(FileKind::OfficeDoc),
        other => CODE_EXTENSIONS.get(other).map(|lang| FileKind::Code(*lang)),
    }
}

/// All supported extensions, sorted (for `docsift formats` and directory walks).
pub fn supported_extensions() -> Vec<&'static str> {
    let mut exts: Vec<&'static str> = CODE_EXTENSIONS.keys().copied().collect();
    exts.extend(["pdf", "docx", "doc"]);
    exts.sort_unstable();
    exts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detects_all_supported_extensions() {
        assert_eq!(detect(Path::new("a.pdf")), Some(FileKind::Pdf));
        assert_eq!(detect(Path::new("a.docx")), Some(FileKind::OfficeDoc));
        assert_eq!(detect(Path::new("a.doc")), Some(FileKind::OfficeDoc));
        assert_eq!(
            detect(Path::new("a.py")),
            Some(FileKind::Code(Language::Python))
        );
        assert_eq!(
            detect(Path::new("a.cpp")),
            Some(FileKind::Code(Language::Cpp))
        );
        assert_eq!(detect(Path::new("a.go")), Some(FileKind::Code(Language::Go)));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(detect(Path::new("REPORT.PDF")), Some(FileKind::Pdf));
        assert_eq!(
            detect(Path::new("Main.Java")),
            Some(FileKind::Code(Language::Java))
        );
    }

    #[test]
    fn test_unsupported_extensions_return_none() {
        for name in ["a.txt", "a.exe", "a.tar.gz", "noext", ".hidden"] {
            assert_eq!(detect(&PathBuf::from(name)), None, "{}", name);
        }
    }

    #[test]
    fn test_supported_extensions_complete() {
        let exts = supported_extensions();
        assert_eq!(exts.len(), 13);
        assert!(exts.contains(&"pdf"));
        assert!(exts.contains(&"rb"));
    }

    #[test]
    fn test_native_language() {
        assert!(Language::Python.is_native());
        assert!(!Language::Go.is_native());
    }
}
