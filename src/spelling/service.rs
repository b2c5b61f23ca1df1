//! Dictionary services: where a language's dictionary comes from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{LanguageTag, PipelineConfig};
use crate::error::SpellfixError;
use crate::spelling::{FrequencyDictionary, SpellDictionary, SpellDictionaryService};

/// Environment variable holding extra dictionary directories
/// (platform path-list syntax, like `PATH`).
pub const DICTIONARY_DIR_ENV: &str = "PDFSPELL_DICTIONARY_DIR";

/// File suffixes tried for each language name, in priority order.
const DICTIONARY_SUFFIXES: [&str; 3] = [".json.gz", ".json", ".txt"];

/// Loads [`FrequencyDictionary`] files from disk.
///
/// For language `pt-br` the service looks for `pt-br.json.gz`,
/// `pt-br.json`, `pt-br.txt`, then the same for `pt`, in every directory in
/// order. An explicit file bypasses the search.
#[derive(Debug, Clone)]
pub struct DirectoryDictionaryService {
    dirs: Vec<PathBuf>,
    file: Option<PathBuf>,
    max_edit_distance: u8,
}

impl DirectoryDictionaryService {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self {
            dirs,
            file: None,
            max_edit_distance: 2,
        }
    }

    /// Build the service described by a pipeline config.
    ///
    /// An empty `dictionary_dirs` falls back to [`Self::default_search_path`].
    pub fn from_config(config: &PipelineConfig) -> Self {
        let dirs = if config.dictionary_dirs.is_empty() {
            Self::default_search_path()
        } else {
            config.dictionary_dirs.clone()
        };
        Self {
            dirs,
            file: config.dictionary_file.clone(),
            max_edit_distance: config.max_edit_distance,
        }
    }

    /// Always use this file, whatever the language.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_max_edit_distance(mut self, distance: u8) -> Self {
        self.max_edit_distance = distance.clamp(1, 2);
        self
    }

    /// `$PDFSPELL_DICTIONARY_DIR` entries, then `./dictionaries`.
    pub fn default_search_path() -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = std::env::var_os(DICTIONARY_DIR_ENV)
            .map(|v| std::env::split_paths(&v).collect())
            .unwrap_or_default();
        dirs.retain(|d| !d.as_os_str().is_empty());
        dirs.push(PathBuf::from("dictionaries"));
        dirs
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Locate the dictionary file for `language`.
    ///
    /// Returns every path tried in the error so the user can see where to
    /// put the file.
    pub fn locate(&self, language: &LanguageTag) -> Result<PathBuf, SpellfixError> {
        if let Some(ref file) = self.file {
            return Ok(file.clone());
        }
        let mut searched = Vec::new();
        for name in language.lookup_names() {
            for dir in &self.dirs {
                for suffix in DICTIONARY_SUFFIXES {
                    let candidate = dir.join(format!("{name}{suffix}"));
                    if candidate.is_file() {
                        return Ok(candidate);
                    }
                    searched.push(candidate);
                }
            }
        }
        Err(SpellfixError::DictionaryNotFound {
            language: language.to_string(),
            searched,
        })
    }

    fn load(&self, path: &Path) -> Result<FrequencyDictionary, SpellfixError> {
        if !path.is_file() {
            return Err(SpellfixError::DictionaryLoadFailed {
                path: path.to_path_buf(),
                detail: "file does not exist".into(),
            });
        }
        Ok(FrequencyDictionary::load_from_path(path)?.with_max_edit_distance(self.max_edit_distance))
    }
}

impl Default for DirectoryDictionaryService {
    fn default() -> Self {
        Self::new(Self::default_search_path())
    }
}

impl SpellDictionaryService for DirectoryDictionaryService {
    fn open(&self, language: &LanguageTag) -> Result<Arc<dyn SpellDictionary>, SpellfixError> {
        let path = self.locate(language)?;
        debug!("Dictionary for '{}' resolved to {}", language, path.display());
        let dictionary = self.load(&path)?;
        info!(
            "Loaded '{}' dictionary: {} words from {}",
            language,
            dictionary.len(),
            path.display()
        );
        Ok(Arc::new(dictionary))
    }
}

/// Dictionaries registered in memory, keyed by language name.
///
/// Useful when the host application already has its word lists loaded, and
/// for tests. Lookup follows [`LanguageTag::lookup_names`], so a `pt`
/// dictionary also serves `pt-br`.
#[derive(Default, Clone)]
pub struct InMemoryDictionaryService {
    dictionaries: HashMap<String, Arc<dyn SpellDictionary>>,
}

impl InMemoryDictionaryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `dictionary` under `language`.
    pub fn with(mut self, language: &LanguageTag, dictionary: Arc<dyn SpellDictionary>) -> Self {
        self.dictionaries
            .insert(language.as_str().to_string(), dictionary);
        self
    }
}

impl SpellDictionaryService for InMemoryDictionaryService {
    fn open(&self, language: &LanguageTag) -> Result<Arc<dyn SpellDictionary>, SpellfixError> {
        language
            .lookup_names()
            .into_iter()
            .find_map(|name| self.dictionaries.get(name).cloned())
            .ok_or_else(|| SpellfixError::DictionaryNotFound {
                language: language.to_string(),
                searched: Vec::new(),
            })
    }
}
