//! Snapshot schema tests.
//!
//! The JSON snapshot is consumed by downstream tooling and must keep its
//! established field names and shapes; these tests pin the schema.

use std::path::PathBuf;

use docsift::cli::{self, AnalyzeArgs};
use docsift::report;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn analyze_fixtures(out: &std::path::Path) -> serde_json::Value {
    let args = AnalyzeArgs {
        paths: vec![testdata_path()],
        report: out.join("README_RESUMEN.md"),
        snapshot: out.join("analisis_completo.json"),
    };
    cli::run_analyze(&args).expect("analyze should succeed");
    report::read_snapshot(&args.snapshot).expect("snapshot should parse")
}

#[test]
fn test_top_level_schema() {
    let out = tempfile::tempdir().unwrap();
    let json = analyze_fixtures(out.path());

    assert!(json["pdf_content"].is_array());
    assert!(json["doc_content"].is_array());
    assert!(json["code_analysis"].is_object());
    assert!(json["summary"].is_object());
    assert!(json["timestamp"].is_string());

    let summary = &json["summary"];
    assert_eq!(summary["proyecto_detectado"], "Multi-Document Analysis");
    assert!(summary["archivos_analizados"]["pdf"].is_number());
    assert!(summary["archivos_analizados"]["doc"].is_number());
    assert!(summary["archivos_analizados"]["codigo"].is_number());
    assert!(summary["tecnologias_detectadas"].is_array());
    assert!(summary["recomendaciones"].is_array());
    assert!(summary["timestamp"].is_string());
}

#[test]
fn test_code_entry_schema() {
    let out = tempfile::tempdir().unwrap();
    let json = analyze_fixtures(out.path());

    let key = testdata_path().join("pipeline.py").display().to_string();
    let entry = &json["code_analysis"][&key];

    assert_eq!(entry["archivo"], key);
    assert_eq!(entry["tipo"], "Python");
    assert!(entry["lineas_codigo"].as_u64().unwrap() > 0);
    assert!(entry["funciones"].is_array());
    assert!(entry["clases"].is_array());
    assert!(entry["imports"].is_array());
    assert!(entry["comentarios"].is_array());

    // Structural entries carry full detail.
    let run = entry["funciones"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["nombre"] == "run")
        .expect("run should be extracted");
    assert!(run["linea"].as_u64().unwrap() > 1);
    assert_eq!(run["argumentos"][0], "self");
    assert_eq!(run["docstring"], "Apply every step to the frame.");

    let class = &entry["clases"][0];
    assert_eq!(class["nombre"], "Pipeline");
    assert_eq!(class["docstring"], "Runs the steps in order.");
}

#[test]
fn test_summary_counts_match_recorded_entries() {
    let out = tempfile::tempdir().unwrap();
    let json = analyze_fixtures(out.path());

    let counts = &json["summary"]["archivos_analizados"];
    assert_eq!(
        counts["pdf"].as_u64().unwrap() as usize,
        json["pdf_content"].as_array().unwrap().len()
    );
    assert_eq!(
        counts["doc"].as_u64().unwrap() as usize,
        json["doc_content"].as_array().unwrap().len()
    );
    assert_eq!(
        counts["codigo"].as_u64().unwrap() as usize,
        json["code_analysis"].as_object().unwrap().len()
    );
}

#[test]
fn test_recommendations_never_empty() {
    let out = tempfile::tempdir().unwrap();
    let json = analyze_fixtures(out.path());

    let recs = json["summary"]["recomendaciones"].as_array().unwrap();
    assert!(!recs.is_empty());
}
