//! End-to-end tests against a real pdfium library and a real PDF.
//!
//! Gated behind `E2E_ENABLED` so they do not run in CI unless explicitly
//! requested. The PDF defaults to `test_cases/sample.pdf` and can be
//! pointed elsewhere with `PDFSPELL_E2E_PDF`.
//!
//! Run with:
//!   E2E_ENABLED=1 LD_LIBRARY_PATH=. cargo test --test e2e -- --nocapture

use pdfspell::{extract_text, extract_text_from_bytes, run, PipelineConfig, RunOutcome};
use std::path::PathBuf;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn sample_pdf() -> PathBuf {
    std::env::var_os("PDFSPELL_E2E_PDF")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_cases/sample.pdf"))
}

fn dictionaries_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("dictionaries")
}

/// Skip this test if E2E_ENABLED is not set *or* the sample PDF is missing.
macro_rules! e2e_skip_unless_ready {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        let p = sample_pdf();
        if !p.exists() {
            println!("SKIP — test file not found: {}", p.display());
            println!("       Set PDFSPELL_E2E_PDF to a PDF with a text layer");
            return;
        }
        p
    }};
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn test_extract_real_pdf() {
    let pdf = e2e_skip_unless_ready!();
    let config = PipelineConfig::default();

    let doc = extract_text(&pdf, &config).expect("extraction failed");
    println!(
        "{} pages, {} chars",
        doc.page_count,
        doc.text.chars().count()
    );
    assert!(doc.page_count > 0);
}

#[test]
fn test_extract_from_bytes_matches_path() {
    let pdf = e2e_skip_unless_ready!();
    let config = PipelineConfig::default();

    let from_path = extract_text(&pdf, &config).expect("extraction failed");
    let bytes = std::fs::read(&pdf).expect("read pdf");
    let from_bytes = extract_text_from_bytes(&bytes, &config).expect("extraction failed");
    assert_eq!(from_path, from_bytes);
}

#[test]
fn test_full_run() {
    let pdf = e2e_skip_unless_ready!();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("sample.txt");
    let config = PipelineConfig::builder()
        .dictionary_dir(dictionaries_dir())
        .build()
        .unwrap();

    match run(&pdf, &output, &config).expect("dictionary should load") {
        RunOutcome::Saved { stats, .. } => {
            println!("{}", serde_json::to_string_pretty(&stats).unwrap());
            let text = std::fs::read_to_string(&output).unwrap();
            assert_eq!(text.split(' ').filter(|t| !t.is_empty()).count(), stats.token_count);
            assert!(!text.contains('\n'), "output is a single line");
        }
        other => panic!("expected Saved, got {other:?}"),
    }
}

#[test]
fn test_not_a_pdf_is_rejected() {
    if std::env::var("E2E_ENABLED").is_err() {
        println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let fake = dir.path().join("fake.pdf");
    std::fs::write(&fake, "just text").unwrap();

    let err = extract_text(&fake, &PipelineConfig::default()).unwrap_err();
    assert!(err.is_extraction(), "got {err:?}");
}
