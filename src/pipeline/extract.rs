//! Text extraction: pull the text layer of every page out of a PDF via pdfium.
//!
//! Pages are read strictly in index order and appended with no separator;
//! whatever leading or trailing whitespace pdfium yields for a page is kept
//! as-is. If any page fails the whole extraction fails, so callers never
//! see a document with silently missing pages.
//!
//! The pdfium document handle lives only for the duration of
//! [`PdfiumExtractor::extract`] and is released on every exit path.

use crate::config::PipelineConfig;
use crate::error::SpellfixError;
use crate::output::ExtractedDocument;
use crate::pipeline::input;
use crate::progress::ProgressCallback;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable pointing at an existing pdfium shared library.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Produces the plain text of a document.
pub trait TextExtractionService: Send + Sync {
    /// Extract the text of every page at `path`, concatenated in page order.
    fn extract(&self, path: &Path) -> Result<ExtractedDocument, SpellfixError>;
}

/// [`TextExtractionService`] backed by the pdfium library.
#[derive(Default, Clone)]
pub struct PdfiumExtractor {
    password: Option<String>,
    library_path: Option<PathBuf>,
    progress: Option<ProgressCallback>,
}

impl PdfiumExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an extractor using the password and progress callback of `config`.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            password: config.password.clone(),
            library_path: None,
            progress: config.progress_callback.clone(),
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Bind to the pdfium library at `path` instead of searching for one.
    pub fn with_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_path = Some(path.into());
        self
    }
}

impl TextExtractionService for PdfiumExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedDocument, SpellfixError> {
        let path = input::resolve_local(path)?;
        let pdfium = bind_pdfium(self.library_path.as_deref())?;
        let password = self.password.as_deref();

        let document = pdfium
            .load_pdf_from_file(&path, password)
            .map_err(|e| classify_load_error(&path, password.is_some(), &e))?;

        let pages = document.pages();
        let total_pages = pages.len() as usize;
        info!("PDF loaded: {} pages", total_pages);

        let page_texts = pages.iter().enumerate().map(|(idx, page)| {
            page.text()
                .map(|t| t.all())
                .map_err(|e| SpellfixError::PageTextFailed {
                    page: idx + 1,
                    detail: format!("{:?}", e),
                })
        });
        let text = assemble_pages(page_texts, total_pages, self.progress.as_ref())?;

        Ok(ExtractedDocument {
            text,
            page_count: total_pages,
        })
    }
}

/// Concatenate page texts in order, stopping at the first failure.
///
/// Fires `on_extraction_start` once and `on_page_extracted` per page.
pub(crate) fn assemble_pages<I>(
    pages: I,
    total_pages: usize,
    progress: Option<&ProgressCallback>,
) -> Result<String, SpellfixError>
where
    I: IntoIterator<Item = Result<String, SpellfixError>>,
{
    if let Some(cb) = progress {
        cb.on_extraction_start(total_pages);
    }

    let mut text = String::new();
    for (idx, page) in pages.into_iter().enumerate() {
        let page_text = page?;
        let chars = page_text.chars().count();
        debug!("Extracted page {} → {} chars", idx + 1, chars);
        text.push_str(&page_text);
        if let Some(cb) = progress {
            cb.on_page_extracted(idx + 1, total_pages, chars);
        }
    }
    Ok(text)
}

/// Bind to pdfium: explicit path, then `$PDFIUM_LIB_PATH`, then a library in
/// the working directory, then the system library.
fn bind_pdfium(explicit: Option<&Path>) -> Result<Pdfium, SpellfixError> {
    let configured = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(PDFIUM_LIB_PATH_ENV).map(PathBuf::from));

    if let Some(lib) = configured {
        debug!("Binding pdfium from {}", lib.display());
        return Pdfium::bind_to_library(&lib)
            .map(Pdfium::new)
            .map_err(|e| {
                SpellfixError::PdfiumBindingFailed(format!("{}: {:?}", lib.display(), e))
            });
    }

    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| SpellfixError::PdfiumBindingFailed(format!("{:?}", e)))
}

fn classify_load_error(path: &Path, had_password: bool, e: &PdfiumError) -> SpellfixError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if had_password {
            SpellfixError::WrongPassword {
                path: path.to_path_buf(),
            }
        } else {
            SpellfixError::PasswordRequired {
                path: path.to_path_buf(),
            }
        }
    } else {
        SpellfixError::CorruptPdf {
            path: path.to_path_buf(),
            detail: err_str,
        }
    }
}
