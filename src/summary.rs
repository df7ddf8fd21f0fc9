//! Batch-level aggregation: counts, technology detection, recommendations.

use std::collections::BTreeSet;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::model::AnalysisResult;

/// A derived technology tag plus the import keywords that trigger it.
///
/// Matching is a case-insensitive substring test against import names, so an
/// unrelated identifier that merely contains a keyword (say `pandasvideo`)
/// also triggers the tag. Inherited heuristic, kept as-is.
struct TechRule {
    tag: &'static str,
    keywords: &'static [&'static str],
}

/// Rule order is fixed; it drives recommendation order, not input order.
const TECH_RULES: &[TechRule] = &[
    TechRule {
        tag: "Web Framework",
        keywords: &["flask", "django", "fastapi"],
    },
    TechRule {
        tag: "Data Science",
        keywords: &["pandas", "numpy", "matplotlib"],
    },
    TechRule {
        tag: "Machine Learning",
        keywords: &["tensorflow", "pytorch", "sklearn"],
    },
];

/// One recommendation per technology-set membership test, in fixed order.
const RECOMMENDATION_RULES: &[(&str, &str)] = &[
    ("Python", "Consider adding a requirements.txt with pinned dependencies"),
    ("Web Framework", "Document the exposed API endpoints"),
    ("Data Science", "Include example datasets alongside the analysis code"),
];

/// Emitted when no recommendation rule fires; the list is never empty.
const FALLBACK_RECOMMENDATIONS: &[&str] = &[
    "The project structure looks reasonable",
    "Consider adding more inline documentation",
    "Review test coverage for the analyzed code",
];

/// Per-category file counts, failed entries included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileCounts {
    pub pdf: usize,
    pub doc: usize,
    #[serde(rename = "codigo")]
    pub code: usize,
}

impl FileCounts {
    pub fn total(&self) -> usize {
        self.pdf + self.doc + self.code
    }
}

/// Derived batch summary. Recomputed from the accumulator each run, never
/// mutated directly; apart from the timestamp it is fully deterministic in
/// the set of extraction results.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    #[serde(rename = "proyecto_detectado")]
    pub project: String,
    #[serde(rename = "archivos_analizados")]
    pub counts: FileCounts,
    /// Sorted, deduplicated technology tags (order-independent of input).
    #[serde(rename = "tecnologias_detectadas")]
    pub technologies: Vec<String>,
    #[serde(rename = "recomendaciones")]
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Local>,
}

impl Summary {
    /// Fold the per-file extraction results into the batch summary.
    /// Error entries count toward the category totals but contribute nothing
    /// to technologies or recommendations.
    pub fn compute(result: &AnalysisResult) -> Self {
        let mut technologies: BTreeSet<String> = BTreeSet::new();

        for code in result.code_successes() {
            technologies.insert(code.language.clone());
            for import in &code.imports {
                let lowered = import.to_lowercase();
                for rule in TECH_RULES {
                    if rule.keywords.iter().any(|kw| lowered.contains(kw)) {
                        technologies.insert(rule.tag.to_string());
                    }
                }
            }
        }

        let mut recommendations: Vec<String> = RECOMMENDATION_RULES
            .iter()
            .filter(|(tag, _)| technologies.contains(*tag))
            .map(|(_, text)| text.to_string())
            .collect();
        if recommendations.is_empty() {
            recommendations = FALLBACK_RECOMMENDATIONS
                .iter()
                .map(|r| r.to_string())
                .collect();
        }

        Summary {
            project: "Multi-Document Analysis".to_string(),
            counts: FileCounts {
                pdf: result.pdfs.len(),
                doc: result.docs.len(),
                code: result.code.len(),
            },
            technologies: technologies.into_iter().collect(),
            recommendations,
            timestamp: result.timestamp,
        }
    }
}
