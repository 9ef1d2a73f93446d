//! Sentence-level excerpts around a keyword.
//!
//! Text is split into sentences after `.`, `!` or `?` followed by
//! whitespace. Each sentence containing the keyword as a whole word yields
//! one excerpt made of that sentence and its neighbours.

use crate::search::WordPattern;
use regex::Regex;
use std::sync::LazyLock;

/// Excerpts longer than this many words are cut short.
pub const MAX_EXCERPT_WORDS: usize = 150;

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?]\s+").expect("valid sentence break pattern")
});

/// Split `text` into sentences, keeping the closing punctuation.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last = 0;
    for m in SENTENCE_BREAK.find_iter(text) {
        // The punctuation mark is a single ASCII byte.
        sentences.push(&text[last..m.start() + 1]);
        last = m.end();
    }
    sentences.push(&text[last..]);
    sentences
}

/// Up to `max` excerpts for sentences matching `pattern`, in text order.
///
/// An excerpt is prefixed with `...` unless its matching sentence is the
/// first one, and suffixed with `...` unless that sentence is the last one.
/// Excerpts over [`MAX_EXCERPT_WORDS`] are truncated and end with a single
/// `...`.
pub fn extract(text: &str, pattern: &WordPattern, max: usize) -> Vec<String> {
    let sentences = sentences(text);
    let last = sentences.len() - 1;

    sentences
        .iter()
        .enumerate()
        .filter(|(_, sentence)| pattern.is_match(sentence))
        .take(max)
        .map(|(i, sentence)| {
            let mut parts = Vec::with_capacity(3);
            if i > 0 {
                parts.push(sentences[i - 1]);
            }
            parts.push(*sentence);
            if i < last {
                parts.push(sentences[i + 1]);
            }

            let joined = parts.join(" ");
            let mut excerpt = joined.trim().to_string();

            let words: Vec<&str> = excerpt.split_whitespace().collect();
            let truncated = words.len() > MAX_EXCERPT_WORDS;
            if truncated {
                excerpt = format!("{}...", words[..MAX_EXCERPT_WORDS].join(" "));
            }
            if i > 0 {
                excerpt.insert_str(0, "...");
            }
            if i < last && !truncated {
                excerpt.push_str("...");
            }
            excerpt
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holiday() -> WordPattern {
        WordPattern::whole_word("holiday").unwrap()
    }

    #[test]
    fn splits_after_sentence_punctuation() {
        assert_eq!(
            sentences("One. Two!  Three? Four"),
            vec!["One.", "Two!", "Three?", "Four"]
        );
        assert_eq!(sentences("v1.2 is out."), vec!["v1.2 is out."]);
        assert_eq!(sentences(""), vec![""]);
    }

    #[test]
    fn excerpt_includes_neighbours() {
        let text = "Welcome. Holiday demand was strong. Margins held. Thanks.";
        assert_eq!(
            extract(text, &holiday(), 10),
            vec!["...Welcome. Holiday demand was strong. Margins held...."]
        );
    }

    #[test]
    fn ellipses_follow_the_matching_sentence() {
        assert_eq!(
            extract("Holiday sales. Then more.", &holiday(), 10),
            vec!["Holiday sales. Then more...."]
        );
        assert_eq!(
            extract("Intro. A holiday", &holiday(), 10),
            vec!["...Intro. A holiday"]
        );
        assert_eq!(extract("holiday", &holiday(), 10), vec!["holiday"]);
    }

    #[test]
    fn whole_words_only() {
        assert!(extract("Holidays are fun. Really.", &holiday(), 10).is_empty());
    }

    #[test]
    fn stops_at_max() {
        let text = "holiday one. holiday two. holiday three.";
        assert_eq!(extract(text, &holiday(), 2).len(), 2);
        assert!(extract(text, &holiday(), 0).is_empty());
    }

    #[test]
    fn long_excerpts_are_truncated() {
        let filler = vec!["word"; 200].join(" ");
        let text = format!("Start. holiday {filler}. End.");
        let excerpts = extract(&text, &holiday(), 10);
        assert_eq!(excerpts.len(), 1);

        let excerpt = &excerpts[0];
        assert!(excerpt.starts_with("...Start. holiday word"));
        assert!(excerpt.ends_with("word..."));
        assert!(!excerpt.ends_with("word......"));
        assert_eq!(
            excerpt.trim_start_matches("...").split_whitespace().count(),
            MAX_EXCERPT_WORDS
        );
    }
}
