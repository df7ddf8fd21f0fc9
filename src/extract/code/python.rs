//! Structural extraction for Python sources using tree-sitter.
//!
//! The syntax tree yields functions (name, line, positional parameters,
//! leading docstring), classes (name, line, docstring) and imports
//! normalized to dotted strings (`from m import x` becomes `m.x`). Line
//! comments are collected by a separate regex sweep over the raw source;
//! that sweep can pick up `#` text inside string literals, which is an
//! accepted limitation of the comment channel.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::{Node, Parser};

use crate::error::ExtractionError;
use crate::format::Language;
use crate::model::{ClassDetail, ClassEntry, CodeExtraction, FunctionDetail, FunctionEntry};

static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"#.*").unwrap());

/// Extract structured facts from Python source.
pub fn extract(file: &str, source: &str) -> Result<CodeExtraction, ExtractionError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| ExtractionError::ParseFailure {
            file: file.to_string(),
            detail: e.to_string(),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ExtractionError::ParseFailure {
            file: file.to_string(),
            detail: "parser returned no tree".to_string(),
        })?;

    if tree.root_node().has_error() {
        return Err(ExtractionError::ParseFailure {
            file: file.to_string(),
            detail: "source contains syntax errors".to_string(),
        });
    }

    let mut extraction = CodeExtraction {
        file: file.to_string(),
        language: Language::Python.tag().to_string(),
        line_count: source.split('\n').count(),
        functions: Vec::new(),
        classes: Vec::new(),
        imports: Vec::new(),
        comments: Vec::new(),
    };

    walk(tree.root_node(), source, &mut extraction);
    extraction.functions.sort_by_key(entry_line);
    extraction.classes.sort_by_key(class_line);

    extraction.comments = LINE_COMMENT
        .find_iter(source)
        .map(|m| m.as_str().trim().to_string())
        .collect();

    Ok(extraction)
}

fn entry_line(entry: &FunctionEntry) -> usize {
    match entry {
        FunctionEntry::Detailed(d) => d.line,
        FunctionEntry::Name(_) => 0,
    }
}

fn class_line(entry: &ClassEntry) -> usize {
    match entry {
        ClassEntry::Detailed(d) => d.line,
        ClassEntry::Name(_) => 0,
    }
}

/// Pre-order walk collecting declarations and imports; nested definitions
/// (methods, inner functions) are visited like any other node.
fn walk(node: Node, source: &str, out: &mut CodeExtraction) {
    match node.kind() {
        "function_definition" => {
            if let Some(name_node) = node.child_by_field_name("name") {
                out.functions.push(FunctionEntry::Detailed(FunctionDetail {
                    name: text(name_node, source).to_string(),
                    line: node.start_position().row + 1,
                    params: parameter_names(node, source),
                    docstring: leading_docstring(node, source),
                }));
            }
        }
        "class_definition" => {
            if let Some(name_node) = node.child_by_field_name("name") {
                out.classes.push(ClassEntry::Detailed(ClassDetail {
                    name: text(name_node, source).to_string(),
                    line: node.start_position().row + 1,
                    docstring: leading_docstring(node, source),
                }));
            }
        }
        "import_statement" => {
            let mut cursor = node.walk();
            for name in node.children_by_field_name("name", &mut cursor) {
                if let Some(module) = import_target(name, source) {
                    out.imports.push(module);
                }
            }
        }
        "import_from_statement" => collect_from_import(node, source, &mut out.imports),
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, source, out);
    }
}

fn text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// The imported module of a `dotted_name` or `aliased_import` node
/// (aliases resolve to the real module, not the alias).
fn import_target(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "dotted_name" | "relative_import" => Some(text(node, source).to_string()),
        "aliased_import" => node
            .child_by_field_name("name")
            .map(|n| text(n, source).to_string()),
        _ => None,
    }
}

/// `from m import a, b` becomes `m.a`, `m.b`; `from m import *` becomes `m.*`.
fn collect_from_import(node: Node, source: &str, imports: &mut Vec<String>) {
    let module = node
        .child_by_field_name("module_name")
        .map(|n| text(n, source).to_string())
        .unwrap_or_default();

    let mut found_names = false;
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        if let Some(target) = import_target(name, source) {
            imports.push(format!("{}.{}", module, target));
            found_names = true;
        }
    }

    if !found_names {
        let mut cursor = node.walk();
        let has_wildcard = node
            .children(&mut cursor)
            .any(|c| c.kind() == "wildcard_import");
        if has_wildcard {
            imports.push(format!("{}.*", module));
        }
    }
}

/// Positional parameter names; splat (`*args`/`**kwargs`) and separator
/// markers are skipped, matching the positional-argument view of a signature.
fn parameter_names(func_node: Node, source: &str) -> Vec<String> {
    let Some(params_node) = func_node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut names = Vec::new();
    let mut cursor = params_node.walk();
    for param in params_node.named_children(&mut cursor) {
        match param.kind() {
            "identifier" => names.push(text(param, source).to_string()),
            "typed_parameter" => {
                if let Some(inner) = param.named_child(0) {
                    if inner.kind() == "identifier" {
                        names.push(text(inner, source).to_string());
                    }
                }
            }
            "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = param.child_by_field_name("name") {
                    names.push(text(name, source).to_string());
                }
            }
            _ => {}
        }
    }
    names
}

/// The docstring of a function or class body, quotes stripped, verbatim
/// content preserved. `None` when the first statement is not a string.
fn leading_docstring(def_node: Node, source: &str) -> Option<String> {
    let body = def_node.child_by_field_name("body")?;
    let first = body.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = first.named_child(0)?;
    if expr.kind() != "string" {
        return None;
    }

    let mut content = String::new();
    let mut cursor = expr.walk();
    for child in expr.named_children(&mut cursor) {
        if child.kind() == "string_content" {
            content.push_str(text(child, source));
        }
    }
    Some(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> CodeExtraction {
        extract("test.py", source).unwrap()
    }

    fn detailed_functions(extraction: &CodeExtraction) -> Vec<&FunctionDetail> {
        extraction
            .functions
            .iter()
            .filter_map(|f| match f {
                FunctionEntry::Detailed(d) => Some(d),
                FunctionEntry::Name(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_function_with_docstring() {
        let extraction = parse("def f(a, b):\n    \"\"\"Adds things.\"\"\"\n    return a + b\n");
        let funcs = detailed_functions(&extraction);
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs[0].name, "f");
        assert_eq!(funcs[0].line, 1);
        assert_eq!(funcs[0].params, vec!["a", "b"]);
        assert_eq!(funcs[0].docstring.as_deref(), Some("Adds things."));
    }

    #[test]
    fn test_function_without_docstring() {
        let extraction = parse("def greet(name): return name\n");
        let funcs = detailed_functions(&extraction);
        assert_eq!(funcs[0].name, "greet");
        assert_eq!(funcs[0].params, vec!["name"]);
        assert_eq!(funcs[0].docstring, None);
    }

    #[test]
    fn test_typed_and_default_parameters() {
        let extraction = parse("def g(x: int, y=2, z: str = \"a\", *args, **kw):\n    pass\n");
        let funcs = detailed_functions(&extraction);
        assert_eq!(funcs[0].params, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_class_and_method() {
        let source = "class Greeter:\n    \"\"\"Says hello.\"\"\"\n\n    def hello(self):\n        pass\n";
        let extraction = parse(source);
        assert_eq!(extraction.classes.len(), 1);
        match &extraction.classes[0] {
            ClassEntry::Detailed(c) => {
                assert_eq!(c.name, "Greeter");
                assert_eq!(c.line, 1);
                assert_eq!(c.docstring.as_deref(), Some("Says hello."));
            }
            ClassEntry::Name(_) => panic!("structural path must yield details"),
        }
        // Methods count as functions, like any nested definition.
        let funcs = detailed_functions(&extraction);
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs[0].name, "hello");
        assert_eq!(funcs[0].params, vec!["self"]);
    }

    #[test]
    fn test_imports_normalized_to_dotted_strings() {
        let source = "import os\nimport numpy as np\nfrom pathlib import Path\nfrom collections import OrderedDict, defaultdict\n";
        let extraction = parse(source);
        assert_eq!(
            extraction.imports,
            vec![
                "os",
                "numpy",
                "pathlib.Path",
                "collections.OrderedDict",
                "collections.defaultdict",
            ]
        );
    }

    #[test]
    fn test_comment_sweep() {
        let source = "# header\nx = 1  # inline\ns = \"not # a comment\"\n";
        let extraction = parse(source);
        assert_eq!(extraction.comments[0], "# header");
        assert_eq!(extraction.comments[1], "# inline");
        // The sweep is textual and also matches the hash inside the string.
        assert_eq!(extraction.comments.len(), 3);
    }

    #[test]
    fn test_syntax_error_is_parse_failure() {
        let err = extract("broken.py", "def f(:\n").unwrap_err();
        assert_eq!(err.category(), "parse_failure");
    }

    #[test]
    fn test_line_count() {
        let extraction = parse("x = 1\ny = 2\n");
        // Two code lines plus the trailing empty segment.
        assert_eq!(extraction.line_count, 3);
    }
}
