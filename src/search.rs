//! Whole-word searching within transcript text

use crate::error::{LocatorError, Result};
use regex::{Match, Regex, RegexBuilder};

/// A located match.
///
/// Offsets count characters (Unicode scalar values), not bytes, so they can
/// be shown to a reader and handed back to [`crate::context::ContextWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    /// Character offset of the first matched character
    pub start: usize,
    /// Character offset one past the last matched character
    pub end: usize,
}

/// A compiled, case-insensitive pattern for one target word.
///
/// The word is escaped before compilation so that metacharacters such as
/// `.` or `+` only ever match themselves. A match counts only when the part
/// matching the word lower-cases to the lower-cased word, so case-folding
/// equivalents like `ſ` for `s` are rejected.
#[derive(Debug, Clone)]
pub struct WordPattern {
    lowered: String,
    regex: Regex,
}

/// Letters allowed after the stem, matched case-sensitively so that only
/// ASCII letters qualify.
const STEM_SUFFIX: &str = "(?-i:[a-zA-Z]*)";

impl WordPattern {
    /// Occurrences of `word` not adjacent to a word character on either side.
    pub fn whole_word(word: &str) -> Result<Self> {
        Self::build(word, |stem| format!(r"\b{stem}\b"))
    }

    /// Occurrences of `word` anywhere, including inside longer tokens.
    pub fn substring(word: &str) -> Result<Self> {
        Self::build(word, |stem| stem.to_string())
    }

    /// Whole words that start with `word` followed by zero or more ASCII letters.
    pub fn stem_variants(word: &str) -> Result<Self> {
        Self::build(word, |stem| format!(r"\b{stem}{STEM_SUFFIX}\b"))
    }

    /// `word` followed by zero or more ASCII letters, with no boundary checks.
    pub fn stem_prefix(word: &str) -> Result<Self> {
        Self::build(word, |stem| format!("{stem}{STEM_SUFFIX}"))
    }

    fn build(word: &str, shape: impl FnOnce(&str) -> String) -> Result<Self> {
        if word.is_empty() {
            return Err(LocatorError::InvalidInput(
                "target word must not be empty".to_string(),
            ));
        }
        let stem = format!("(?P<stem>{})", regex::escape(word));
        let regex = RegexBuilder::new(&shape(&stem))
            .case_insensitive(true)
            .build()
            .map_err(|e| LocatorError::InvalidInput(format!("cannot search for {word:?}: {e}")))?;
        Ok(Self {
            lowered: word.to_lowercase(),
            regex,
        })
    }

    /// Matches whose word part lower-cases to the lower-cased word.
    fn matches<'t>(&'t self, text: &'t str) -> impl Iterator<Item = Match<'t>> + 't {
        self.regex.captures_iter(text).filter_map(move |caps| {
            let stem = caps.name("stem")?;
            if stem.as_str().to_lowercase() == self.lowered {
                caps.get(0)
            } else {
                None
            }
        })
    }

    /// All non-overlapping occurrences in `text`, left to right.
    pub fn find_all(&self, text: &str) -> Vec<Occurrence> {
        let mut occurrences = Vec::new();
        // Character count up to `last_byte`, advanced incrementally.
        let mut last_byte = 0;
        let mut chars_before = 0;

        for m in self.matches(text) {
            chars_before += text[last_byte..m.start()].chars().count();
            let start = chars_before;
            let end = start + m.as_str().chars().count();
            occurrences.push(Occurrence { start, end });

            chars_before = end;
            last_byte = m.end();
        }

        occurrences
    }

    pub fn count(&self, text: &str) -> usize {
        self.matches(text).count()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matches(text).next().is_some()
    }
}

/// Case-insensitive whole-word occurrences of `word` in `text`.
///
/// Returns an empty list when there are none; an empty `word` is rejected.
pub fn find_occurrences(text: &str, word: &str) -> Result<Vec<Occurrence>> {
    let occurrences = WordPattern::whole_word(word)?.find_all(text);
    tracing::debug!(word, count = occurrences.len(), "whole-word search");
    Ok(occurrences)
}

/// Whether `word` appears in `text` at all, ignoring word boundaries.
pub fn contains_substring(text: &str, word: &str) -> Result<bool> {
    Ok(WordPattern::substring(word)?.is_match(text))
}

/// Counts of a word and its simple variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariantCounts {
    /// The word on its own
    pub exact: usize,
    /// The word followed by "s"
    pub plural: usize,
    /// The word followed by any run of letters, including none
    pub variants: usize,
}

impl VariantCounts {
    pub fn count(text: &str, word: &str) -> Result<Self> {
        let counts = Self {
            exact: WordPattern::whole_word(word)?.count(text),
            plural: WordPattern::whole_word(&format!("{word}s"))?.count(text),
            variants: WordPattern::stem_variants(word)?.count(text),
        };
        tracing::debug!(word, ?counts, "variant counts");
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const PROMO: &str = "Our holiday sale includes holidays and a holiday-themed promo.";

    #[test]
    fn whole_word_skips_longer_tokens() {
        assert_eq!(find_occurrences("holidays are fun", "holiday").unwrap(), vec![]);

        let stems = WordPattern::stem_variants("holiday")
            .unwrap()
            .find_all("holidays are fun");
        assert_eq!(stems, vec![Occurrence { start: 0, end: 8 }]);
    }

    #[test]
    fn hyphen_is_a_boundary() {
        let found = find_occurrences(PROMO, "holiday").unwrap();
        assert_eq!(
            found,
            vec![
                Occurrence { start: 4, end: 11 },
                Occurrence { start: 41, end: 48 },
            ]
        );
        for occurrence in &found {
            let span: String = PROMO
                .chars()
                .skip(occurrence.start)
                .take(occurrence.end - occurrence.start)
                .collect();
            assert_eq!(span.to_lowercase(), "holiday");
        }
    }

    #[test]
    fn case_insensitive_in_both_directions() {
        let text = "HOLIDAY plans. Holiday cheer. holiday lights.";
        for word in ["holiday", "Holiday", "HOLIDAY", "hOlIdAy"] {
            assert_eq!(find_occurrences(text, word).unwrap().len(), 3, "{word}");
        }
    }

    #[test]
    fn metacharacters_are_literal() {
        assert_eq!(
            find_occurrences("axb a.b", "a.b").unwrap(),
            vec![Occurrence { start: 4, end: 7 }]
        );
        assert_eq!(find_occurrences("c++ and c", "c+").unwrap(), vec![]);
        assert!(find_occurrences("(x) [y]", "(x").unwrap().is_empty());
    }

    #[test]
    fn punctuation_edges_may_never_match() {
        // "." is not a word character, so `\b` cannot sit after it when a
        // space follows.
        assert!(find_occurrences("see inc. report", "inc.").unwrap().is_empty());
        assert!(contains_substring("see inc. report", "inc.").unwrap());
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let text = "Café holiday, naïve holiday";
        assert_eq!(
            find_occurrences(text, "holiday").unwrap(),
            vec![
                Occurrence { start: 5, end: 12 },
                Occurrence { start: 20, end: 27 },
            ]
        );
    }

    #[test]
    fn empty_word_is_rejected() {
        assert_matches!(find_occurrences("text", ""), Err(LocatorError::InvalidInput(_)));
        assert_matches!(contains_substring("text", ""), Err(LocatorError::InvalidInput(_)));
        assert_matches!(VariantCounts::count("text", ""), Err(LocatorError::InvalidInput(_)));
    }

    #[test]
    fn substring_hint() {
        assert!(contains_substring("Holidays are fun", "holiday").unwrap());
        assert!(!contains_substring("Vacations are fun", "holiday").unwrap());
    }

    #[test]
    fn variant_counts_for_promo() {
        assert_eq!(
            VariantCounts::count(PROMO, "holiday").unwrap(),
            VariantCounts {
                exact: 2,
                plural: 1,
                variants: 3,
            }
        );
    }

    #[test]
    fn case_folding_equivalents_are_not_matches() {
        // U+017F LATIN SMALL LETTER LONG S folds to "s" but lower-cases to itself.
        assert!(find_occurrences("\u{17F}", "s").unwrap().is_empty());
        assert!(find_occurrences("\u{3C2}", "\u{3C3}").unwrap().is_empty());
        assert!(!contains_substring("\u{17F}ale", "sale").unwrap());

        // U+212A KELVIN SIGN is not an ASCII letter after the stem.
        let kelvin = "holiday\u{212A} holidays";
        assert_eq!(WordPattern::stem_variants("holiday").unwrap().count(kelvin), 1);
        assert_eq!(
            WordPattern::stem_prefix("holiday").unwrap().find_all(kelvin),
            vec![Occurrence { start: 0, end: 7 }, Occurrence { start: 9, end: 17 }]
        );
    }

    #[test]
    fn upper_case_suffixes_still_count() {
        assert_eq!(
            VariantCounts::count("HOLIDAYS and Holiday", "holiday").unwrap(),
            VariantCounts {
                exact: 1,
                plural: 1,
                variants: 2,
            }
        );
    }

    #[test]
    fn stem_prefix_ignores_boundaries() {
        let found = WordPattern::stem_prefix("day")
            .unwrap()
            .find_all("holiday days");
        assert_eq!(
            found,
            vec![Occurrence { start: 4, end: 7 }, Occurrence { start: 8, end: 12 }]
        );
    }
}
