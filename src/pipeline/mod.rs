//! Pipeline stages for PDF → corrected text.
//!
//! Each submodule implements exactly one step and knows nothing about the
//! others; [`crate::convert`] wires them together.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ correct ──▶ write
//! (path)    (pdfium)    (dictionary) (UTF-8 file)
//! ```
//!
//! 1. [`input`]   — check the path exists, is readable and starts with `%PDF`
//! 2. [`extract`] — concatenate the text of every page, in order
//! 3. [`correct`] — replace misspelled alphabetic tokens
//! 4. [`write`]   — persist atomically as UTF-8

pub mod correct;
pub mod extract;
pub mod input;
pub mod write;
