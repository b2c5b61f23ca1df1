//! Spelling correction: replace misspelled words token by token.
//!
//! Text is split on whitespace runs and rejoined with single spaces, so the
//! output is one flat line regardless of the page layout it came from. Only
//! tokens made entirely of letters are looked up; anything carrying a digit,
//! punctuation or symbol (`123,`, `4B!`, `e-mail`) passes through untouched.
//!
//! The token count never changes: every input token produces exactly one
//! output token.

use crate::config::{LanguageTag, PipelineConfig};
use crate::error::SpellfixError;
use crate::output::CorrectedText;
use crate::progress::ProgressCallback;
use crate::spelling::{SpellDictionary, SpellDictionaryService};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Progress is reported every this many tokens.
const PROGRESS_EVERY: usize = 512;

/// True when `token` is non-empty and every char is a letter.
///
/// Letter numbers such as `Ⅻ` carry the Unicode Alphabetic property but are
/// numerals, so they are rejected. Combining vowel signs (Devanagari, Thai)
/// are Alphabetic and still count.
pub fn is_alphabetic_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(is_letter)
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}

/// Correct `text` using the dictionary `service` opens for `language`.
///
/// Fails only if the dictionary cannot be opened; in that case no token has
/// been touched.
pub fn correct(
    text: &str,
    language: &LanguageTag,
    service: &dyn SpellDictionaryService,
) -> Result<CorrectedText, SpellfixError> {
    let dictionary = service.open(language)?;
    Ok(Corrector::new(dictionary).correct(text))
}

/// Applies one dictionary to text.
pub struct Corrector {
    dictionary: Arc<dyn SpellDictionary>,
    preserve_case: bool,
    progress: Option<ProgressCallback>,
}

impl Corrector {
    pub fn new(dictionary: Arc<dyn SpellDictionary>) -> Self {
        Self {
            dictionary,
            preserve_case: true,
            progress: None,
        }
    }

    /// Open the dictionary for `config.language` and carry the config's
    /// casing and progress settings.
    pub fn open(
        service: &dyn SpellDictionaryService,
        config: &PipelineConfig,
    ) -> Result<Self, SpellfixError> {
        let dictionary = service.open(&config.language)?;
        Ok(Self {
            dictionary,
            preserve_case: config.preserve_case,
            progress: config.progress_callback.clone(),
        })
    }

    pub fn preserve_case(mut self, v: bool) -> Self {
        self.preserve_case = v;
        self
    }

    pub fn with_progress(mut self, cb: ProgressCallback) -> Self {
        self.progress = Some(cb);
        self
    }

    /// Correct every token of `text` and join the results with single spaces.
    pub fn correct(&self, text: &str) -> CorrectedText {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let total = tokens.len();
        if let Some(ref cb) = self.progress {
            cb.on_correction_start(total);
        }

        // Documents repeat words; look each distinct token up once.
        let mut cache: HashMap<&str, Option<String>> = HashMap::new();
        let mut out: Vec<String> = Vec::with_capacity(total);
        let mut corrected_count = 0;

        for (i, &token) in tokens.iter().enumerate() {
            let replacement = cache
                .entry(token)
                .or_insert_with(|| self.correct_token(token));
            match replacement {
                Some(word) => {
                    corrected_count += 1;
                    out.push(word.clone());
                }
                None => out.push(token.to_string()),
            }

            if let Some(ref cb) = self.progress {
                let done = i + 1;
                if done % PROGRESS_EVERY == 0 || done == total {
                    cb.on_tokens_corrected(done, total);
                }
            }
        }

        debug!(
            "Corrected {} of {} tokens ({} distinct)",
            corrected_count,
            total,
            cache.len()
        );

        CorrectedText {
            text: out.join(" "),
            token_count: total,
            corrected_count,
        }
    }

    /// The replacement for `token`, or `None` to keep it as-is.
    fn correct_token(&self, token: &str) -> Option<String> {
        if !is_alphabetic_token(token) {
            return None;
        }
        let candidate = self.dictionary.correction(token)?;
        // A known word comes back as itself, lower-cased.
        if candidate.to_lowercase() == token.to_lowercase() {
            return None;
        }
        let replacement = if self.preserve_case {
            match_case(token, &candidate)
        } else {
            candidate
        };
        (replacement != token).then_some(replacement)
    }
}

/// Re-case `candidate` to the shape of `original`.
///
/// `MUNDO` → upper, `Mundo` → capitalised, anything else as given.
pub fn match_case(original: &str, candidate: &str) -> String {
    let letters = original.chars().filter(|c| c.is_alphabetic());
    let (mut upper, mut lower) = (0usize, 0usize);
    for c in letters {
        if c.is_uppercase() {
            upper += 1;
        } else if c.is_lowercase() {
            lower += 1;
        }
    }

    if upper > 1 && lower == 0 {
        return candidate.to_uppercase();
    }
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = candidate.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::{FrequencyDictionary, InMemoryDictionaryService};

    /// Corrects from a fixed table, records nothing else.
    struct Table(HashMap<&'static str, &'static str>);

    impl SpellDictionary for Table {
        fn correction(&self, word: &str) -> Option<String> {
            self.0.get(word.to_lowercase().as_str()).map(|s| s.to_string())
        }
    }

    fn table(pairs: &[(&'static str, &'static str)]) -> Arc<dyn SpellDictionary> {
        Arc::new(Table(pairs.iter().copied().collect()))
    }

    #[test]
    fn alphabetic_test_is_unicode_aware() {
        assert!(is_alphabetic_token("Olá"));
        assert!(is_alphabetic_token("ação"));
        assert!(!is_alphabetic_token("123,"));
        assert!(!is_alphabetic_token("4B!"));
        assert!(!is_alphabetic_token("e-mail"));
        assert!(!is_alphabetic_token(""));
    }

    #[test]
    fn corrects_alphabetic_tokens_only() {
        let c = Corrector::new(table(&[("olao", "olá"), ("b", "x")]));
        let out = c.correct("Olao mundo 4B!");
        assert_eq!(out.text, "Olá mundo 4B!");
        assert_eq!(out.token_count, 3);
        assert_eq!(out.corrected_count, 1);
    }

    #[test]
    fn whitespace_runs_collapse_to_single_spaces() {
        let c = Corrector::new(table(&[]));
        let out = c.correct("  uma\n\nduas\t\ttrês  ");
        assert_eq!(out.text, "uma duas três");
        assert_eq!(out.token_count, 3);
    }

    #[test]
    fn empty_text_yields_empty_text() {
        let c = Corrector::new(table(&[("a", "b")]));
        let out = c.correct("");
        assert_eq!(out.text, "");
        assert_eq!(out.token_count, 0);
        let out = c.correct(" \n\t ");
        assert_eq!(out.text, "");
    }

    #[test]
    fn street_address_eligibility() {
        // "Rua" and "Apto" are looked up; "123," and "4B!" never reach the dictionary.
        let c = Corrector::new(table(&[("rua", "ruas"), ("apto", "apta")]));
        let out = c.correct("Rua 123, Apto 4B!");
        assert_eq!(out.text, "Ruas 123, Apta 4B!");

        let tokens: Vec<&str> = out.text.split(' ').collect();
        assert_eq!(tokens[1], "123,");
        assert_eq!(tokens[3], "4B!");
    }

    #[test]
    fn case_only_difference_keeps_original() {
        let c = Corrector::new(table(&[("mcdonald", "mcdonald")]));
        assert_eq!(c.correct("McDonald").text, "McDonald");
    }

    #[test]
    fn without_case_preservation_dictionary_form_is_used() {
        let c = Corrector::new(table(&[("olao", "olá"), ("mundo", "mundo")])).preserve_case(false);
        let out = c.correct("Olao Mundo");
        assert_eq!(out.text, "olá Mundo");
        assert_eq!(out.corrected_count, 1);
    }

    #[test]
    fn known_words_keep_their_case_without_case_preservation() {
        let dict = FrequencyDictionary::from_frequencies([("mundo", 10), ("olá", 5)]);
        let c = Corrector::new(Arc::new(dict)).preserve_case(false);
        let out = c.correct("Mundo OLÁ");
        assert_eq!(out.text, "Mundo OLÁ");
        assert_eq!(out.corrected_count, 0);
    }

    #[test]
    fn letter_numbers_are_not_alphabetic() {
        assert!(!is_alphabetic_token("Ⅻ"));
        assert!(!is_alphabetic_token("capítuloⅫ"));
        assert!(!is_alphabetic_token("½"));
        assert!(is_alphabetic_token("ÉÇÃÕ"));
    }

    #[test]
    fn roman_numeral_is_never_looked_up() {
        let c = Corrector::new(table(&[("ⅻ", "xii")]));
        assert_eq!(c.correct("Ⅻ").text, "Ⅻ");
    }

    #[test]
    fn progress_reports_final_token_count() {
        use crate::progress::PipelineProgressCallback;
        use std::sync::Mutex;

        #[derive(Default)]
        struct Seen(Mutex<Vec<(usize, usize)>>);
        impl PipelineProgressCallback for Seen {
            fn on_tokens_corrected(&self, done: usize, total_tokens: usize) {
                self.0.lock().unwrap().push((done, total_tokens));
            }
        }

        let seen = Arc::new(Seen::default());
        let words = vec!["casa"; PROGRESS_EVERY + 1].join(" ");
        let c = Corrector::new(table(&[])).with_progress(seen.clone());
        let out = c.correct(&words);

        assert_eq!(out.token_count, PROGRESS_EVERY + 1);
        assert_eq!(
            *seen.0.lock().unwrap(),
            vec![
                (PROGRESS_EVERY, PROGRESS_EVERY + 1),
                (PROGRESS_EVERY + 1, PROGRESS_EVERY + 1)
            ]
        );
    }

    #[test]
    fn token_count_is_preserved() {
        let dict = FrequencyDictionary::from_frequencies([("casa", 10), ("caso", 3)]);
        let c = Corrector::new(Arc::new(dict));
        let input = "cas casa  caso, 42 cass ???";
        let out = c.correct(input);
        assert_eq!(out.text.split(' ').count(), input.split_whitespace().count());
    }

    #[test]
    fn free_function_opens_language() {
        let pt: LanguageTag = "pt".parse().unwrap();
        let svc = InMemoryDictionaryService::new().with(&pt, table(&[("olao", "olá")]));
        let out = correct("Olao mundo", &pt, &svc).unwrap();
        assert_eq!(out.text, "Olá mundo");
    }

    #[test]
    fn unknown_language_fails_before_correcting() {
        let svc = InMemoryDictionaryService::new();
        let en: LanguageTag = "en".parse().unwrap();
        let err = correct("anything", &en, &svc).unwrap_err();
        assert!(matches!(err, SpellfixError::DictionaryNotFound { .. }));
    }

    #[test]
    fn match_case_shapes() {
        assert_eq!(match_case("Olao", "olá"), "Olá");
        assert_eq!(match_case("OLAO", "olá"), "OLÁ");
        assert_eq!(match_case("olao", "olá"), "olá");
        assert_eq!(match_case("A", "e"), "E");
        assert_eq!(match_case("x", ""), "");
    }
}
