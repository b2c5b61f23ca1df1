//! Configuration types for the extract → correct → write pipeline.
//!
//! Everything that changes how a run behaves lives in [`PipelineConfig`],
//! built via [`PipelineConfigBuilder`]. The default correction language is a
//! field here rather than a global so two runs with different languages can
//! share a process.

use crate::error::SpellfixError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Configuration for one pipeline run.
///
/// # Example
/// ```rust
/// use pdfspell::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .language("pt-BR")
///     .max_edit_distance(1)
///     .dictionary_dir("dictionaries")
///     .build()
///     .unwrap();
/// assert_eq!(config.language.as_str(), "pt-br");
/// ```
#[derive(Clone)]
pub struct PipelineConfig {
    /// Language whose dictionary drives correction. Default: `pt`.
    pub language: LanguageTag,

    /// Directories searched for `<lang>.json.gz`, `<lang>.json` or `<lang>.txt`.
    ///
    /// Empty means the default search path
    /// (see [`crate::spelling::DirectoryDictionaryService::default_search_path`]).
    pub dictionary_dirs: Vec<PathBuf>,

    /// Explicit dictionary file. Skips the directory search entirely.
    pub dictionary_file: Option<PathBuf>,

    /// Maximum edit distance for correction candidates (1 or 2). Default: 2.
    ///
    /// Distance 2 generates roughly the square of the distance-1 candidates,
    /// so long documents correct noticeably faster at 1.
    pub max_edit_distance: u8,

    /// Re-case corrections to the shape of the original token. Default: true.
    ///
    /// Dictionaries store lower-case words; with this on `Olao` becomes
    /// `Olá` rather than `olá`.
    pub preserve_case: bool,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Receives stage and page events while the pipeline runs.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language: LanguageTag::default(),
            dictionary_dirs: Vec::new(),
            dictionary_file: None,
            max_edit_distance: 2,
            preserve_case: true,
            password: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("language", &self.language)
            .field("dictionary_dirs", &self.dictionary_dirs)
            .field("dictionary_file", &self.dictionary_file)
            .field("max_edit_distance", &self.max_edit_distance)
            .field("preserve_case", &self.preserve_case)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn PipelineProgressCallback>"),
            )
            .finish()
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
            language: None,
        }
    }
}

/// Builder for [`PipelineConfig`].
///
/// The language is kept as raw text until [`build`](Self::build) so a bad
/// tag surfaces as an error there instead of a panic in a setter.
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
    language: Option<String>,
}

impl PipelineConfigBuilder {
    pub fn language(mut self, tag: impl Into<String>) -> Self {
        self.language = Some(tag.into());
        self
    }

    pub fn dictionary_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.dictionary_dirs.push(dir.into());
        self
    }

    pub fn dictionary_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config
            .dictionary_dirs
            .extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn dictionary_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.dictionary_file = Some(path.into());
        self
    }

    /// Clamped to 1..=2.
    pub fn max_edit_distance(mut self, distance: u8) -> Self {
        self.config.max_edit_distance = distance.clamp(1, 2);
        self
    }

    pub fn preserve_case(mut self, v: bool) -> Self {
        self.config.preserve_case = v;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(mut self) -> Result<PipelineConfig, SpellfixError> {
        if let Some(raw) = self.language.take() {
            self.config.language = raw.parse()?;
        }
        if let Some(ref file) = self.config.dictionary_file {
            if file.as_os_str().is_empty() {
                return Err(SpellfixError::InvalidConfig(
                    "dictionary file path is empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

// ── Language tag ─────────────────────────────────────────────────────────

/// A short language code selecting the correction dictionary.
///
/// Stored lower-cased with `-` as the subtag separator: `pt`, `en`,
/// `pt-br`. Accepts `_` on input (`pt_BR`) because that is how locale
/// environment variables spell it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    /// The language every run uses unless told otherwise.
    pub const DEFAULT: &'static str = "pt";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag: `pt` for `pt-br`.
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Dictionary names to try, most specific first: `["pt-br", "pt"]`.
    pub fn lookup_names(&self) -> Vec<&str> {
        let primary = self.primary();
        if primary == self.0 {
            vec![primary]
        } else {
            vec![self.0.as_str(), primary]
        }
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        LanguageTag(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageTag {
    type Err = SpellfixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().replace('_', "-").to_ascii_lowercase();
        let invalid = || SpellfixError::InvalidLanguage(s.to_string());

        let mut parts = normalised.split('-');
        let primary = parts.next().ok_or_else(invalid)?;
        if !(2..=8).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid());
        }
        if let Some(region) = parts.next() {
            if !(2..=8).contains(&region.len())
                || !region.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(invalid());
            }
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(LanguageTag(normalised))
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = SpellfixError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}
