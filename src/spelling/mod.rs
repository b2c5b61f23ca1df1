//! Spelling dictionaries and the service that opens them per language.
//!
//! The corrector only talks to the two traits defined here, so any engine
//! (a hunspell binding, a remote service, a test fake) can stand in for the
//! bundled [`FrequencyDictionary`].

pub mod dictionary;
pub mod edits;
pub mod service;

pub use dictionary::FrequencyDictionary;
pub use service::{DirectoryDictionaryService, InMemoryDictionaryService};

use crate::config::LanguageTag;
use crate::error::SpellfixError;
use std::sync::Arc;

/// A loaded dictionary for one language.
pub trait SpellDictionary: Send + Sync {
    /// Best replacement for `word`, or `None` when the dictionary has no
    /// suggestion. A correctly spelled word may return itself.
    fn correction(&self, word: &str) -> Option<String>;
}

/// Opens the dictionary for a language.
///
/// An `Err` here means correction cannot start at all; the driver treats it
/// as fatal.
pub trait SpellDictionaryService: Send + Sync {
    fn open(&self, language: &LanguageTag) -> Result<Arc<dyn SpellDictionary>, SpellfixError>;
}
