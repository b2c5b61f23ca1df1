//! # pdfspell
//!
//! Extract the text of a PDF, correct its spelling word by word against a
//! frequency dictionary, and save the result as a UTF-8 text file.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input    check the path exists and starts with %PDF
//!  ├─ 2. Extract  concatenate every page's text via pdfium
//!  ├─ 3. Correct  replace misspelled alphabetic tokens (default language: pt)
//!  └─ 4. Write    persist atomically as UTF-8
//! ```
//!
//! The stages share nothing but the string passed from one to the next.
//! Extraction and dictionaries sit behind traits
//! ([`TextExtractionService`], [`SpellDictionaryService`]) so either can be
//! swapped without touching the driver.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfspell::{run, PipelineConfig, RunOutcome};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::builder()
//!         .language("pt")
//!         .dictionary_dir("dictionaries")
//!         .build()?;
//!     match run("document.pdf", "document.txt", &config)? {
//!         RunOutcome::Saved { path, stats } => {
//!             eprintln!("{} tokens, {} corrected → {}",
//!                 stats.token_count, stats.corrected_tokens, path.display());
//!         }
//!         other => eprintln!("not saved: {:?}", other.error()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Dictionaries
//!
//! A language `pt` is served by the first of `pt.json.gz`, `pt.json` or
//! `pt.txt` found in the dictionary directories (`$PDFSPELL_DICTIONARY_DIR`,
//! then `./dictionaries`). JSON files are `{"word": frequency}` objects, so
//! the language files shipped with pyspellchecker work unchanged.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfspell` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod spelling;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{LanguageTag, PipelineConfig, PipelineConfigBuilder};
pub use convert::{correct_text, extract_text, extract_text_from_bytes, run, run_with};
pub use error::{FailureKind, SpellfixError};
pub use output::{CorrectedText, ExtractedDocument, RunOutcome, RunStats, WrittenFile};
pub use pipeline::correct::{correct, is_alphabetic_token, Corrector};
pub use pipeline::extract::{PdfiumExtractor, TextExtractionService};
pub use pipeline::write::write_text;
pub use progress::{NoopProgressCallback, PipelineProgressCallback, ProgressCallback};
pub use spelling::{
    DirectoryDictionaryService, FrequencyDictionary, InMemoryDictionaryService, SpellDictionary,
    SpellDictionaryService,
};
