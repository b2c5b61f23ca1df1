//! Values produced by the pipeline stages and the driver.

use crate::error::SpellfixError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Text pulled out of a PDF: every page concatenated in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Concatenated page text, no separator between pages.
    pub text: String,
    /// Number of pages read.
    pub page_count: usize,
}

/// Result of the correction stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectedText {
    /// Tokens joined by single spaces.
    pub text: String,
    /// Number of whitespace-delimited tokens (same before and after).
    pub token_count: usize,
    /// Tokens that were replaced by a different word.
    pub corrected_count: usize,
}

/// A file persisted by the writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Statistics for a completed run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Pages in the input document.
    pub page_count: usize,
    /// Characters extracted before correction.
    pub extracted_chars: usize,
    /// Whitespace-delimited tokens seen by the corrector.
    pub token_count: usize,
    /// Tokens replaced by a dictionary candidate.
    pub corrected_tokens: usize,
    /// Bytes written to the output file.
    pub bytes_written: usize,
    /// Wall-clock time spent in extraction.
    pub extract_duration_ms: u64,
    /// Wall-clock time spent loading the dictionary and correcting.
    pub correct_duration_ms: u64,
    /// Wall-clock time spent writing.
    pub write_duration_ms: u64,
    /// End-to-end wall-clock time.
    pub total_duration_ms: u64,
}

/// How a driver run ended, short of a fatal error.
///
/// Extraction and write failures are reported here rather than as `Err`
/// because they end the run without aborting the caller; only dictionary
/// initialisation is fatal.
#[derive(Debug)]
pub enum RunOutcome {
    /// The corrected text was saved.
    Saved { path: PathBuf, stats: RunStats },
    /// Extraction failed; nothing was corrected or written.
    ExtractionFailed(SpellfixError),
    /// The corrected text could not be written.
    WriteFailed(SpellfixError),
}

impl RunOutcome {
    /// True when the output file was written.
    pub fn is_saved(&self) -> bool {
        matches!(self, RunOutcome::Saved { .. })
    }

    /// The non-fatal error that ended the run, if any.
    pub fn error(&self) -> Option<&SpellfixError> {
        match self {
            RunOutcome::Saved { .. } => None,
            RunOutcome::ExtractionFailed(e) | RunOutcome::WriteFailed(e) => Some(e),
        }
    }

    /// Convert into a `Result`, treating every non-saved outcome as an error.
    pub fn into_result(self) -> Result<RunStats, SpellfixError> {
        match self {
            RunOutcome::Saved { stats, .. } => Ok(stats),
            RunOutcome::ExtractionFailed(e) | RunOutcome::WriteFailed(e) => Err(e),
        }
    }
}
