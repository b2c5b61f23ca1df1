//! Progress-callback trait for pipeline events.
//!
//! Inject an [`Arc<dyn PipelineProgressCallback>`] via
//! [`crate::config::PipelineConfigBuilder::progress_callback`] to observe a
//! run as it moves through extraction, correction and writing. The library
//! never touches the terminal itself; the `pdfspell` binary renders these
//! events as an indicatif progress bar.
//!
//! # Example
//!
//! ```rust
//! use pdfspell::{PipelineConfig, PipelineProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct PageCounter(AtomicUsize);
//!
//! impl PipelineProgressCallback for PageCounter {
//!     fn on_page_extracted(&self, _page_num: usize, _total_pages: usize, _chars: usize) {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let config = PipelineConfig::builder()
//!     .progress_callback(Arc::new(PageCounter(AtomicUsize::new(0))))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the pipeline as it processes a document.
///
/// All methods default to no-ops so implementations only override what they
/// care about. The pipeline is single-threaded, but the trait is
/// `Send + Sync` so hosts may forward events across threads.
pub trait PipelineProgressCallback: Send + Sync {
    /// Called once the document is open and its page count is known.
    fn on_extraction_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called after each page's text has been appended.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages in the document
    /// * `chars`       — characters contributed by this page
    fn on_page_extracted(&self, page_num: usize, total_pages: usize, chars: usize) {
        let _ = (page_num, total_pages, chars);
    }

    /// Called once the dictionary is loaded and tokens are counted.
    fn on_correction_start(&self, total_tokens: usize) {
        let _ = total_tokens;
    }

    /// Called periodically during correction with the number of tokens done.
    fn on_tokens_corrected(&self, done: usize, total_tokens: usize) {
        let _ = (done, total_tokens);
    }

    /// Called once after the output file is persisted.
    fn on_write_complete(&self, bytes: usize) {
        let _ = bytes;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl PipelineProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::PipelineConfig`].
pub type ProgressCallback = Arc<dyn PipelineProgressCallback>;
