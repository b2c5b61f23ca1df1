//! Error types for the pdfspell library.
//!
//! Every failure is a [`SpellfixError`]. Callers that need to know *which
//! stage* failed ask [`SpellfixError::kind`], which folds the detailed
//! variants into the coarse [`FailureKind`] taxonomy used by the driver:
//!
//! * extraction failures (including a missing input) end the run quietly,
//! * dictionary initialisation failures are fatal and propagate,
//! * write failures are reported once and never retried.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdfspell library.
#[derive(Debug, Error)]
pub enum SpellfixError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// pdfium could not produce the text layer of a page.
    #[error("Text extraction failed for page {page}: {detail}")]
    PageTextFailed { page: usize, detail: String },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium, place the library in the working\n\
directory, or install it system-wide.\n\
Pre-built libraries: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    PdfiumBindingFailed(String),

    // ── Dictionary errors ─────────────────────────────────────────────────
    /// No dictionary file exists for the requested language.
    #[error(
        "No spelling dictionary for language '{language}'.\n\
Searched: {}\n\
Add <lang>.json.gz, <lang>.json or <lang>.txt to a dictionary directory, or pass --dictionary <FILE>.",
        format_searched(.searched)
    )]
    DictionaryNotFound {
        language: String,
        searched: Vec<PathBuf>,
    },

    /// A dictionary file exists but could not be read or parsed.
    #[error("Failed to load dictionary '{path}': {detail}")]
    DictionaryLoadFailed { path: PathBuf, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output text file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The language tag is not of the form `pt`, `en`, `pt-BR`, …
    #[error("Invalid language tag '{0}': expected a short code such as 'pt' or 'pt-BR'")]
    InvalidLanguage(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`SpellfixError`] by the stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FailureKind {
    /// The input document path does not exist.
    NotFound,
    /// Any other extraction failure (corrupt file, permissions, pdfium).
    ExtractionFailure,
    /// The spelling dictionary could not be initialised.
    CorrectionInitFailure,
    /// The output file could not be written.
    WriteError,
    /// Invalid configuration supplied by the caller.
    Config,
    /// Unexpected internal failure.
    Internal,
}

impl SpellfixError {
    /// The stage-level classification of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            SpellfixError::FileNotFound { .. } => FailureKind::NotFound,
            SpellfixError::PermissionDenied { .. }
            | SpellfixError::NotAPdf { .. }
            | SpellfixError::CorruptPdf { .. }
            | SpellfixError::PasswordRequired { .. }
            | SpellfixError::WrongPassword { .. }
            | SpellfixError::PageTextFailed { .. }
            | SpellfixError::PdfiumBindingFailed(_) => FailureKind::ExtractionFailure,
            SpellfixError::DictionaryNotFound { .. }
            | SpellfixError::DictionaryLoadFailed { .. } => FailureKind::CorrectionInitFailure,
            SpellfixError::OutputWriteFailed { .. } => FailureKind::WriteError,
            SpellfixError::InvalidConfig(_) | SpellfixError::InvalidLanguage(_) => {
                FailureKind::Config
            }
            SpellfixError::Internal(_) => FailureKind::Internal,
        }
    }

    /// True for errors raised by the extraction stage, `NotFound` included.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self.kind(),
            FailureKind::NotFound | FailureKind::ExtractionFailure
        )
    }
}

fn format_searched(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "(no dictionary directories configured)".to_string();
    }
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
