//! Best-effort pattern extraction for languages without a structural parser.
//!
//! A fixed table of regular expressions per category (functions, classes,
//! imports, comments) is applied to the raw source; matches are unioned
//! across a category and deduplicated into a sorted set. Declaration order
//! and duplicate legitimate declarations are lost by construction — callers
//! must never assume this path is exact.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::format::Language;
use crate::model::{ClassEntry, CodeExtraction, FunctionEntry};

/// Pre-compiled category patterns, shared across the process.
struct PatternTable {
    functions: Vec<Regex>,
    classes: Vec<Regex>,
    imports: Vec<Regex>,
    comments: Vec<Regex>,
}

static PATTERNS: Lazy<PatternTable> = Lazy::new(|| PatternTable {
    functions: compile(&[
        r"function\s+(\w+)\s*\(",        // JavaScript/TypeScript/PHP
        r"def\s+(\w+)\s*\(",             // Ruby (and Python-style)
        r"(?:public|private|protected)\s+\w+\s+(\w+)\s*\(", // Java/C#
        r"func\s+(\w+)\s*\(",            // Go
    ]),
    classes: compile(&[
        r"class\s+(\w+)",     // most languages
        r"interface\s+(\w+)", // TypeScript/Java/C#
    ]),
    imports: compile(&[
        r"import\s+([^;\n]+)",            // JavaScript/TypeScript/Java
        r#"#include\s*[<"]([^>"]+)[>"]"#, // C/C++
        r"using\s+([^;\n]+)",             // C#
        r"require\s+['\x22]([^'\x22]+)['\x22]", // Ruby
    ]),
    comments: compile(&[
        r"//.*",           // line comments
        r"(?s)/\*.*?\*/",  // block comments
        r"#.*",            // shell/Ruby style
    ]),
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static pattern must compile"))
        .collect()
}

/// Extract approximate facts from a non-native source file.
pub fn extract(file: &str, source: &str, language: Language) -> CodeExtraction {
    CodeExtraction {
        file: file.to_string(),
        language: language.tag().to_string(),
        line_count: source.split('\n').count(),
        functions: match_category(&PATTERNS.functions, source)
            .into_iter()
            .map(FunctionEntry::Name)
            .collect(),
        classes: match_category(&PATTERNS.classes, source)
            .into_iter()
            .map(ClassEntry::Name)
            .collect(),
        imports: match_category(&PATTERNS.imports, source),
        comments: match_category(&PATTERNS.comments, source),
    }
}

/// Union all pattern matches in a category into a sorted, deduplicated set.
/// The first capture group is taken where present, the whole match otherwise.
fn match_category(patterns: &[Regex], source: &str) -> Vec<String> {
    let mut matches = BTreeSet::new();
    for regex in patterns {
        for captures in regex.captures_iter(source) {
            let m = captures
                .get(1)
                .or_else(|| captures.get(0))
                .map(|m| m.as_str().trim().to_string());
            if let Some(m) = m {
                if !m.is_empty() {
                    matches.insert(m);
                }
            }
        }
    }
    matches.into_iter().collect()
}
