//! Orchestration: run extract → correct → write for one document.
//!
//! [`run`] wires the default services (pdfium, dictionaries on disk);
//! [`run_with`] takes them injected, which is how the tests drive the
//! pipeline without a pdfium library.
//!
//! Failure policy, stage by stage:
//!
//! | Stage   | On failure                                        |
//! |---------|---------------------------------------------------|
//! | extract | logged, `Ok(RunOutcome::ExtractionFailed)`        |
//! | correct | dictionary could not be opened: `Err`, fatal      |
//! | write   | logged, `Ok(RunOutcome::WriteFailed)`             |
//!
//! Nothing is retried.

use crate::config::PipelineConfig;
use crate::error::SpellfixError;
use crate::output::{CorrectedText, ExtractedDocument, RunOutcome, RunStats};
use crate::pipeline::correct::Corrector;
use crate::pipeline::extract::{PdfiumExtractor, TextExtractionService};
use crate::pipeline::write;
use crate::spelling::{DirectoryDictionaryService, SpellDictionaryService};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

/// Extract, correct and save `input` to `output` with the default services.
///
/// # Errors
/// Returns `Err` only when the spelling dictionary for `config.language`
/// cannot be loaded. Extraction and write failures come back as
/// [`RunOutcome::ExtractionFailed`] / [`RunOutcome::WriteFailed`].
pub fn run(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &PipelineConfig,
) -> Result<RunOutcome, SpellfixError> {
    let extractor = PdfiumExtractor::from_config(config);
    let dictionaries = DirectoryDictionaryService::from_config(config);
    run_with(input, output, config, &extractor, &dictionaries)
}

/// [`run`] with caller-supplied extraction and dictionary services.
pub fn run_with(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &PipelineConfig,
    extractor: &dyn TextExtractionService,
    dictionaries: &dyn SpellDictionaryService,
) -> Result<RunOutcome, SpellfixError> {
    let total_start = Instant::now();
    let input = input.as_ref();
    let output = output.as_ref();
    info!("Starting run: {} → {}", input.display(), output.display());

    // ── Step 1: Extract ──────────────────────────────────────────────────
    let extract_start = Instant::now();
    let document = match extractor.extract(input) {
        Ok(doc) => doc,
        Err(e) => {
            error!("Extraction failed: {}", e);
            return Ok(RunOutcome::ExtractionFailed(e));
        }
    };
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;
    info!(
        "Extracted {} chars from {} pages in {}ms",
        document.text.chars().count(),
        document.page_count,
        extract_duration_ms
    );

    // ── Step 2: Correct ──────────────────────────────────────────────────
    let correct_start = Instant::now();
    let corrector = Corrector::open(dictionaries, config)
        .inspect_err(|e| error!("Spelling dictionary unavailable: {}", e))?;
    let corrected = corrector.correct(&document.text);
    let correct_duration_ms = correct_start.elapsed().as_millis() as u64;
    info!(
        "Corrected {}/{} tokens in {}ms",
        corrected.corrected_count, corrected.token_count, correct_duration_ms
    );

    // ── Step 3: Write ────────────────────────────────────────────────────
    let write_start = Instant::now();
    let written = match write::write_text(&corrected.text, output) {
        Ok(w) => w,
        Err(e) => {
            error!("Write failed: {}", e);
            return Ok(RunOutcome::WriteFailed(e));
        }
    };
    if let Some(ref cb) = config.progress_callback {
        cb.on_write_complete(written.bytes);
    }
    let write_duration_ms = write_start.elapsed().as_millis() as u64;

    let stats = RunStats {
        page_count: document.page_count,
        extracted_chars: document.text.chars().count(),
        token_count: corrected.token_count,
        corrected_tokens: corrected.corrected_count,
        bytes_written: written.bytes,
        extract_duration_ms,
        correct_duration_ms,
        write_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Saved {} bytes to {} in {}ms total",
        stats.bytes_written,
        written.path.display(),
        stats.total_duration_ms
    );

    Ok(RunOutcome::Saved {
        path: written.path,
        stats,
    })
}

/// Extract the text of a PDF with the default pdfium extractor.
pub fn extract_text(
    input: impl AsRef<Path>,
    config: &PipelineConfig,
) -> Result<ExtractedDocument, SpellfixError> {
    PdfiumExtractor::from_config(config).extract(input.as_ref())
}

/// Extract the text of a PDF held in memory.
///
/// pdfium reads from a path, so the bytes go to a managed temp file that is
/// deleted when this function returns.
pub fn extract_text_from_bytes(
    bytes: &[u8],
    config: &PipelineConfig,
) -> Result<ExtractedDocument, SpellfixError> {
    let mut tmp = tempfile::NamedTempFile::new()
        .map_err(|e| SpellfixError::Internal(format!("tempfile: {e}")))?;
    tmp.write_all(bytes)
        .map_err(|e| SpellfixError::Internal(format!("tempfile write: {e}")))?;
    debug!("Buffered {} PDF bytes at {}", bytes.len(), tmp.path().display());
    extract_text(tmp.path(), config)
}

/// Correct `text` with the dictionary for `config.language`, loaded from disk.
pub fn correct_text(text: &str, config: &PipelineConfig) -> Result<CorrectedText, SpellfixError> {
    let dictionaries = DirectoryDictionaryService::from_config(config);
    Ok(Corrector::open(&dictionaries, config)?.correct(text))
}
