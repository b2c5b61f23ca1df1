//! Edit-distance candidate generation.
//!
//! Instead of scanning the whole dictionary with a Levenshtein matrix per
//! word, candidates are generated by applying every single-character edit
//! (delete, transpose, replace, insert) and keeping the ones the dictionary
//! knows. Distance 2 is the same step applied to every distance-1 edit.

use std::collections::HashSet;

/// All strings one edit away from `word`, over `alphabet`.
///
/// Includes deletions, adjacent transpositions, replacements and insertions.
/// The input word itself is never included.
pub fn edits1(word: &str, alphabet: &[char]) -> HashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut out = HashSet::with_capacity(n * (2 * alphabet.len() + 2) + alphabet.len());

    // deletes
    for i in 0..n {
        let mut v = chars.clone();
        v.remove(i);
        out.insert(v.into_iter().collect());
    }

    // transposes
    for i in 0..n.saturating_sub(1) {
        if chars[i] == chars[i + 1] {
            continue;
        }
        let mut v = chars.clone();
        v.swap(i, i + 1);
        out.insert(v.into_iter().collect());
    }

    // replaces
    for i in 0..n {
        for &c in alphabet {
            if c == chars[i] {
                continue;
            }
            let mut v = chars.clone();
            v[i] = c;
            out.insert(v.into_iter().collect());
        }
    }

    // inserts
    for i in 0..=n {
        for &c in alphabet {
            let mut v = chars.clone();
            v.insert(i, c);
            out.insert(v.into_iter().collect());
        }
    }

    out.remove(word);
    out
}

/// Words within one edit of `word` for which `is_known` returns true.
pub fn known_edits1<F>(word: &str, alphabet: &[char], is_known: F) -> HashSet<String>
where
    F: Fn(&str) -> bool,
{
    edits1(word, alphabet)
        .into_iter()
        .filter(|w| is_known(w))
        .collect()
}

/// Words exactly reachable by two edits for which `is_known` returns true.
///
/// Second-level edits are filtered as they are produced so the full
/// distance-2 neighbourhood is never held in memory at once.
pub fn known_edits2<F>(word: &str, alphabet: &[char], is_known: F) -> HashSet<String>
where
    F: Fn(&str) -> bool,
{
    let mut found = HashSet::new();
    for e1 in edits1(word, alphabet) {
        for e2 in edits1(&e1, alphabet) {
            if e2 != word && is_known(&e2) {
                found.insert(e2);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<char> {
        vec!['a', 'b', 'c']
    }

    #[test]
    fn edits1_contains_each_operation() {
        let e = edits1("ab", &abc());
        assert!(e.contains("a"), "delete");
        assert!(e.contains("ba"), "transpose");
        assert!(e.contains("cb"), "replace");
        assert!(e.contains("abc"), "insert at end");
        assert!(e.contains("cab"), "insert at start");
        assert!(!e.contains("ab"), "word itself excluded");
    }

    #[test]
    fn edits1_handles_unicode_letters() {
        let e = edits1("ola", &['á']);
        assert!(e.contains("olá"));
        assert!(e.contains("ála"));
    }

    #[test]
    fn edits1_of_empty_word_is_inserts_only() {
        let e = edits1("", &abc());
        let mut v: Vec<_> = e.into_iter().collect();
        v.sort();
        assert_eq!(v, vec!["a", "b", "c"]);
    }

    #[test]
    fn known_edits_filter_by_dictionary() {
        let known = |w: &str| w == "cab" || w == "cabb";
        let one = known_edits1("ab", &abc(), known);
        assert_eq!(one.into_iter().collect::<Vec<_>>(), vec!["cab".to_string()]);

        let two = known_edits2("ab", &abc(), known);
        assert!(two.contains("cabb"));
        assert!(two.contains("cab"), "distance-1 words are reachable in two steps");
    }
}
