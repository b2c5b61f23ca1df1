//! Word-frequency dictionary used for spelling correction.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::SpellfixError;
use crate::pipeline::correct::is_alphabetic_token;
use crate::spelling::edits::{known_edits1, known_edits2};
use crate::spelling::SpellDictionary;

/// Words longer than the longest dictionary word by more than this are not checked.
const LENGTH_SLACK: usize = 3;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A dictionary of lower-cased words and their corpus frequencies.
///
/// Correction picks, among the known words closest to the input (edit
/// distance 1 before distance 2), the one with the highest frequency.
#[derive(Debug, Clone)]
pub struct FrequencyDictionary {
    /// Words and their frequencies.
    words: HashMap<String, u64>,
    /// Sum of all frequencies.
    total_count: u64,
    /// Length in chars of the longest word.
    longest_word: usize,
    /// Every character seen in a word; the edit alphabet.
    alphabet: BTreeSet<char>,
    /// 1 or 2.
    max_edit_distance: u8,
}

impl FrequencyDictionary {
    /// Create a new empty dictionary with edit distance 2.
    pub fn new() -> Self {
        FrequencyDictionary {
            words: HashMap::new(),
            total_count: 0,
            longest_word: 0,
            alphabet: BTreeSet::new(),
            max_edit_distance: 2,
        }
    }

    /// Build a dictionary from `(word, frequency)` pairs.
    pub fn from_frequencies<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut dictionary = FrequencyDictionary::new();
        for (word, frequency) in entries {
            dictionary.add_word(word.as_ref(), frequency);
        }
        dictionary
    }

    /// Set the maximum candidate edit distance (clamped to 1..=2).
    pub fn with_max_edit_distance(mut self, distance: u8) -> Self {
        self.max_edit_distance = distance.clamp(1, 2);
        self
    }

    /// Add `frequency` occurrences of `word`.
    ///
    /// Words that are empty or contain non-alphabetic characters are ignored:
    /// the corrector only ever looks up purely alphabetic tokens.
    pub fn add_word(&mut self, word: &str, frequency: u64) {
        if !is_alphabetic_token(word) {
            return;
        }
        let normalized = word.to_lowercase();
        self.longest_word = self.longest_word.max(normalized.chars().count());
        self.alphabet.extend(normalized.chars());
        *self.words.entry(normalized).or_insert(0) += frequency;
        self.total_count += frequency;
    }

    /// Check if a word exists in the dictionary (case-insensitive).
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    /// Get the frequency of a word, 0 if unknown.
    pub fn frequency(&self, word: &str) -> u64 {
        self.words.get(&word.to_lowercase()).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Sum of all word frequencies.
    pub fn total_frequency(&self) -> u64 {
        self.total_count
    }

    /// The characters candidates are built from.
    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.alphabet.iter().copied()
    }

    /// Known words closest to `word`: the word itself if known, else known
    /// distance-1 edits, else known distance-2 edits. Empty if none.
    pub fn candidates(&self, word: &str) -> Vec<String> {
        let word = word.to_lowercase();
        if self.words.contains_key(&word) {
            return vec![word];
        }
        let alphabet: Vec<char> = self.alphabet.iter().copied().collect();
        let is_known = |w: &str| self.words.contains_key(w);

        let one = known_edits1(&word, &alphabet, is_known);
        if !one.is_empty() || self.max_edit_distance < 2 {
            return one.into_iter().collect();
        }
        known_edits2(&word, &alphabet, is_known)
            .into_iter()
            .collect()
    }

    fn should_check(&self, word: &str) -> bool {
        !word.is_empty() && word.chars().count() <= self.longest_word + LENGTH_SLACK
    }

    // ── Loading ──────────────────────────────────────────────────────────

    /// Load a dictionary file, picking the format from its name.
    ///
    /// * `*.json` / `*.json.gz` — a JSON object of `{"word": frequency}`
    ///   (the format pyspellchecker ships its language files in).
    /// * anything else — text, one `word [frequency]` entry per line.
    ///
    /// Gzip is detected from the content, not the extension.
    pub fn load_from_path(path: &Path) -> Result<Self, SpellfixError> {
        let load_err = |detail: String| SpellfixError::DictionaryLoadFailed {
            path: path.to_path_buf(),
            detail,
        };

        let mut raw = Vec::new();
        File::open(path)
            .and_then(|mut f| f.read_to_end(&mut raw))
            .map_err(|e| load_err(e.to_string()))?;

        let bytes = if raw.starts_with(&GZIP_MAGIC) {
            let mut inflated = Vec::new();
            GzDecoder::new(raw.as_slice())
                .read_to_end(&mut inflated)
                .map_err(|e| load_err(format!("gzip: {e}")))?;
            inflated
        } else {
            raw
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let name = name.strip_suffix(".gz").unwrap_or(&name);

        let dictionary = if name.ends_with(".json") {
            Self::load_json(bytes.as_slice()).map_err(load_err)?
        } else {
            Self::load_text(bytes.as_slice()).map_err(load_err)?
        };

        debug!(
            "Loaded {} words ({} total frequency) from {}",
            dictionary.len(),
            dictionary.total_frequency(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Parse a JSON object mapping words to frequencies.
    pub fn load_json<R: Read>(reader: R) -> Result<Self, String> {
        let entries: HashMap<String, u64> =
            serde_json::from_reader(reader).map_err(|e| format!("json: {e}"))?;
        Ok(Self::from_frequencies(entries))
    }

    /// Parse text with one `word` or `word frequency` per line.
    ///
    /// Lines without a frequency count once each, so a plain word list or a
    /// raw corpus dump both work. Blank lines and `#` comments are skipped.
    pub fn load_text<R: Read>(reader: R) -> Result<Self, String> {
        let mut dictionary = FrequencyDictionary::new();
        for (lineno, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.map_err(|e| format!("line {}: {e}", lineno + 1))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            let frequency = match parts.next() {
                Some(f) => f
                    .parse::<u64>()
                    .map_err(|_| format!("line {}: invalid frequency '{f}'", lineno + 1))?,
                None => 1,
            };
            dictionary.add_word(word, frequency);
        }
        Ok(dictionary)
    }
}

impl Default for FrequencyDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl SpellDictionary for FrequencyDictionary {
    fn correction(&self, word: &str) -> Option<String> {
        let word = word.to_lowercase();
        if !self.should_check(&word) {
            return None;
        }
        self.candidates(&word).into_iter().max_by(|a, b| {
            self.frequency(a)
                .cmp(&self.frequency(b))
                .then_with(|| b.cmp(a))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> FrequencyDictionary {
        FrequencyDictionary::from_frequencies([
            ("olá", 50),
            ("mundo", 80),
            ("rua", 30),
            ("casa", 100),
            ("caso", 40),
            ("cada", 60),
        ])
    }

    #[test]
    fn add_word_normalises_and_filters() {
        let mut d = FrequencyDictionary::new();
        d.add_word("Casa", 2);
        d.add_word("casa", 3);
        d.add_word("4B", 9);
        d.add_word("", 9);
        d.add_word("Ⅻ", 9);
        assert_eq!(d.frequency("CASA"), 5);
        assert_eq!(d.len(), 1);
        assert_eq!(d.total_frequency(), 5);
        assert!(!d.contains("4b"));
    }

    #[test]
    fn known_word_corrects_to_itself() {
        assert_eq!(sample().correction("mundo").as_deref(), Some("mundo"));
        assert_eq!(sample().correction("Mundo").as_deref(), Some("mundo"));
    }

    #[test]
    fn accent_fix_within_two_edits() {
        assert_eq!(sample().correction("olao").as_deref(), Some("olá"));
    }

    #[test]
    fn highest_frequency_candidate_wins() {
        // "cas" → casa (100), caso (40) are both one insert away
        assert_eq!(sample().correction("cas").as_deref(), Some("casa"));
    }

    #[test]
    fn ties_break_lexicographically() {
        let d = FrequencyDictionary::from_frequencies([("bat", 5), ("cat", 5)]);
        assert_eq!(d.correction("at").as_deref(), Some("bat"));
    }

    #[test]
    fn distance_two_only_when_enabled() {
        let d = sample();
        assert_eq!(d.correction("mndoo").as_deref(), Some("mundo"));
        let d = sample().with_max_edit_distance(1);
        assert_eq!(d.correction("mndoo"), None);
    }

    #[test]
    fn unknown_word_without_candidates() {
        assert_eq!(sample().correction("xyzzyplugh"), None);
    }

    #[test]
    fn overlong_word_is_not_checked() {
        let d = FrequencyDictionary::from_frequencies([("ab", 1)]);
        assert_eq!(d.correction("abbbbb"), None);
    }

    #[test]
    fn empty_dictionary_never_corrects() {
        assert_eq!(FrequencyDictionary::new().correction("a"), None);
    }

    #[test]
    fn load_text_mixed_formats() {
        let text = "# comment\ncasa 10\nmundo\nmundo\n\nrua 3\n4B 7\n";
        let d = FrequencyDictionary::load_text(text.as_bytes()).unwrap();
        assert_eq!(d.frequency("casa"), 10);
        assert_eq!(d.frequency("mundo"), 2);
        assert_eq!(d.frequency("rua"), 3);
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn load_text_rejects_bad_frequency() {
        let err = FrequencyDictionary::load_text("casa many\n".as_bytes()).unwrap_err();
        assert!(err.contains("line 1"), "got: {err}");
    }

    #[test]
    fn load_json_object() {
        let d = FrequencyDictionary::load_json(r#"{"olá": 4, "mundo": 9}"#.as_bytes()).unwrap();
        assert_eq!(d.frequency("olá"), 4);
        assert_eq!(d.frequency("mundo"), 9);
    }

    #[test]
    fn load_from_path_gzip_json() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pt.json.gz");
        let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        enc.write_all(r#"{"casa": 3}"#.as_bytes()).unwrap();
        enc.finish().unwrap();

        let d = FrequencyDictionary::load_from_path(&path).unwrap();
        assert_eq!(d.frequency("casa"), 3);
    }

    #[test]
    fn load_from_path_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json").unwrap();
        let err = FrequencyDictionary::load_from_path(&path).unwrap_err();
        assert!(matches!(err, SpellfixError::DictionaryLoadFailed { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
