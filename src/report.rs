//! Report building and rendering.
//!
//! [`verify`], [`debug`], [`excerpts`] and [`frequency`] are pure: they take a parsed collection and
//! return a report value whose `Display` impl produces the text shown to
//! the user.

use crate::context::ContextWindow;
use crate::error::{LocatorError, Result};
use crate::excerpt;
use crate::search::{self, Occurrence, VariantCounts, WordPattern};
use crate::transcript::TranscriptCollection;
use std::fmt;

/// One whole-word match with its surrounding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyEntry {
    pub occurrence: Occurrence,
    pub before: String,
    pub matched: String,
    pub after: String,
}

/// Whole-word occurrences of a word in one quarter's transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub quarter: String,
    pub word: String,
    /// Transcript length in characters
    pub text_len: usize,
    pub entries: Vec<VerifyEntry>,
    /// Set when there are no whole-word matches but the word occurs inside
    /// other tokens.
    pub appears_as_substring: bool,
}

/// Build a [`VerifyReport`] for `word` in `quarter`.
pub fn verify(
    collection: &TranscriptCollection,
    quarter: &str,
    word: &str,
    window: usize,
) -> Result<VerifyReport> {
    tracing::info!(quarter, word, window, "building verification report");
    let text = collection.find(quarter)?.transcript.as_str();
    let occurrences = search::find_occurrences(text, word)?;

    let appears_as_substring = occurrences.is_empty() && search::contains_substring(text, word)?;

    let entries = occurrences
        .into_iter()
        .map(|occurrence| {
            let ctx = ContextWindow::around(text, occurrence, window);
            VerifyEntry {
                occurrence,
                before: ctx.before.to_string(),
                matched: ctx.matched.to_string(),
                after: ctx.after.to_string(),
            }
        })
        .collect();

    Ok(VerifyReport {
        quarter: quarter.to_string(),
        word: word.to_string(),
        text_len: text.chars().count(),
        entries,
        appears_as_substring,
    })
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== WORD COUNT VERIFICATION =====")?;
        writeln!(f, "Quarter: {}", self.quarter)?;
        writeln!(f, "Word: \"{}\"", self.word)?;
        writeln!(f, "Transcript length: {} characters", group_thousands(self.text_len))?;
        writeln!(f)?;
        writeln!(f, "Total matches found: {}", self.entries.len())?;
        writeln!(f)?;

        if self.entries.is_empty() {
            writeln!(f, "No matches found for \"{}\" in {}", self.word, self.quarter)?;
            writeln!(f)?;
            if self.appears_as_substring {
                writeln!(
                    f,
                    "NOTE: \"{}\" appears in the transcript but not as a complete word.",
                    self.word
                )?;
                writeln!(
                    f,
                    "It may be part of another word or have different casing/punctuation."
                )?;
            }
            return Ok(());
        }

        writeln!(f, "===== ALL OCCURRENCES WITH CONTEXT =====")?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(f)?;
            writeln!(
                f,
                "{}. Position {}-{}:",
                i + 1,
                entry.occurrence.start,
                entry.occurrence.end
            )?;
            writeln!(f, "   ...{}[{}]{}...", entry.before, entry.matched, entry.after)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Variant counts and stem occurrences for a word in one quarter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugReport {
    pub quarter: String,
    pub word: String,
    /// Transcript length in characters
    pub text_len: usize,
    pub counts: VariantCounts,
    /// Lower-cased context around every stem occurrence
    pub snippets: Vec<String>,
}

/// Build a [`DebugReport`] for `word` in `quarter`.
pub fn debug(
    collection: &TranscriptCollection,
    quarter: &str,
    word: &str,
    window: usize,
) -> Result<DebugReport> {
    tracing::info!(quarter, word, window, "building debug report");
    let text = collection.find(quarter)?.transcript.as_str();
    let counts = VariantCounts::count(text, word)?;

    let snippets = WordPattern::stem_prefix(word)?
        .find_all(text)
        .into_iter()
        .map(|occurrence| {
            ContextWindow::around(text, occurrence, window)
                .joined()
                .to_lowercase()
        })
        .collect();

    Ok(DebugReport {
        quarter: quarter.to_string(),
        word: word.to_string(),
        text_len: text.chars().count(),
        counts,
        snippets,
    })
}

impl fmt::Display for DebugReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = self.word.to_lowercase();

        writeln!(f, "=== {} WORD COUNT DEBUG ===", self.word.to_uppercase())?;
        writeln!(f, "Transcript length: {} chars", self.text_len)?;
        writeln!(f, "Quarter: {}", self.quarter)?;
        writeln!(f)?;
        writeln!(f, "\"{word}\" (exact): {}", self.counts.exact)?;
        writeln!(f, "\"{word}s\" (plural): {}", self.counts.plural)?;
        writeln!(f, "All {word} variants: {}", self.counts.variants)?;
        writeln!(f)?;

        writeln!(f, "=== ALL OCCURRENCES WITH CONTEXT ===")?;
        for (i, snippet) in self.snippets.iter().enumerate() {
            writeln!(f, "{}. ...{snippet}...", i + 1)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A keyword with the sentence excerpts that mention it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcerptReport {
    pub quarter: String,
    pub keyword: String,
    /// Whole-word mentions in the whole transcript
    pub total_mentions: usize,
    pub excerpts: Vec<String>,
}

/// Longest keyword accepted by [`excerpts`], in characters.
pub const MAX_KEYWORD_CHARS: usize = 100;

/// Build an [`ExcerptReport`] listing at most `max` excerpts.
pub fn excerpts(
    collection: &TranscriptCollection,
    quarter: &str,
    keyword: &str,
    max: usize,
) -> Result<ExcerptReport> {
    tracing::info!(quarter, keyword, max, "building excerpt report");
    if keyword.chars().count() > MAX_KEYWORD_CHARS {
        return Err(LocatorError::InvalidInput(format!(
            "keyword must be at most {MAX_KEYWORD_CHARS} characters"
        )));
    }
    let text = collection.find(quarter)?.transcript.as_str();
    let pattern = WordPattern::whole_word(keyword)?;

    Ok(ExcerptReport {
        quarter: quarter.to_string(),
        keyword: keyword.to_string(),
        total_mentions: pattern.count(text),
        excerpts: excerpt::extract(text, &pattern, max),
    })
}

impl fmt::Display for ExcerptReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== KEYWORD EXCERPTS =====")?;
        writeln!(f, "Quarter: {}", self.quarter)?;
        writeln!(f, "Keyword: \"{}\"", self.keyword)?;
        writeln!(f, "Total mentions: {}", self.total_mentions)?;
        writeln!(f, "Excerpts shown: {}", self.excerpts.len())?;
        writeln!(f)?;

        if self.excerpts.is_empty() {
            writeln!(f, "No excerpts found for \"{}\" in {}", self.keyword, self.quarter)?;
            return Ok(());
        }
        for (i, excerpt) in self.excerpts.iter().enumerate() {
            writeln!(f, "{}. {excerpt}", i + 1)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Relative change between the recent and older halves above which a
/// word's usage counts as rising or falling.
pub const TREND_THRESHOLD_PERCENT: f64 = 15.0;

/// Direction of a word's usage across quarters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    /// Trend of per-quarter `counts`, listed newest first.
    ///
    /// Fewer than four quarters is always stable. Otherwise the average of
    /// the newer half is compared against the older half (the older half
    /// takes the extra quarter when the count is odd).
    pub fn from_counts(counts: &[usize]) -> Self {
        if counts.len() < 4 {
            return Trend::Stable;
        }
        let (recent, older) = counts.split_at(counts.len() / 2);
        let recent_avg = mean(recent);
        let older_avg = mean(older);
        let baseline = if older_avg == 0.0 { 1.0 } else { older_avg };
        let change = (recent_avg - older_avg) / baseline * 100.0;

        if change > TREND_THRESHOLD_PERCENT {
            Trend::Increasing
        } else if change < -TREND_THRESHOLD_PERCENT {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        })
    }
}

fn mean(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    counts.iter().sum::<usize>() as f64 / counts.len() as f64
}

/// Whole-word count of a word in one quarter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterCount {
    pub quarter: String,
    pub count: usize,
}

/// Usage of one word across every quarter in the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFrequency {
    pub word: String,
    /// Counts in document order
    pub quarters: Vec<QuarterCount>,
    pub total: usize,
    /// First quarter with the highest non-zero count
    pub highest: Option<QuarterCount>,
    /// First quarter with the lowest count
    pub lowest: Option<QuarterCount>,
    pub trend: Trend,
}

impl WordFrequency {
    fn count(collection: &TranscriptCollection, word: &str) -> Result<Self> {
        let pattern = WordPattern::whole_word(word)?;
        let quarters: Vec<QuarterCount> = collection
            .transcripts
            .iter()
            .map(|t| QuarterCount {
                quarter: t.quarter.clone(),
                count: pattern.count(&t.transcript),
            })
            .collect();

        let mut highest: Option<&QuarterCount> = None;
        let mut lowest: Option<&QuarterCount> = None;
        for q in &quarters {
            if q.count > highest.map_or(0, |h| h.count) {
                highest = Some(q);
            }
            if lowest.is_none_or(|l| q.count < l.count) {
                lowest = Some(q);
            }
        }

        let counts: Vec<usize> = quarters.iter().map(|q| q.count).collect();
        Ok(Self {
            word: word.to_string(),
            total: counts.iter().sum(),
            highest: highest.cloned(),
            lowest: lowest.cloned(),
            trend: Trend::from_counts(&counts),
            quarters,
        })
    }

    /// Mean count per quarter; zero for an empty collection.
    pub fn average(&self) -> f64 {
        if self.quarters.is_empty() {
            return 0.0;
        }
        self.total as f64 / self.quarters.len() as f64
    }
}

/// Per-quarter usage of several words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyReport {
    pub words: Vec<WordFrequency>,
}

/// Count each of `words` in every quarter of `collection`.
///
/// Transcripts are expected newest first. Words differing only in case are
/// counted once, under the first spelling given.
pub fn frequency(collection: &TranscriptCollection, words: &[String]) -> Result<FrequencyReport> {
    tracing::info!(?words, quarters = collection.transcripts.len(), "building frequency report");
    if words.is_empty() {
        return Err(LocatorError::InvalidInput(
            "at least one word is required".to_string(),
        ));
    }

    let mut seen = Vec::new();
    let mut frequencies = Vec::new();
    for word in words {
        let lowered = word.to_lowercase();
        if seen.contains(&lowered) {
            continue;
        }
        seen.push(lowered);
        frequencies.push(WordFrequency::count(collection, word)?);
    }

    Ok(FrequencyReport { words: frequencies })
}

impl fmt::Display for FrequencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== WORD FREQUENCY =====")?;
        let quarters = self.words.first().map_or(0, |w| w.quarters.len());
        writeln!(f, "Quarters: {quarters}")?;

        for word in &self.words {
            writeln!(f)?;
            writeln!(f, "\"{}\"", word.word)?;
            for q in &word.quarters {
                writeln!(f, "  {}: {}", q.quarter, q.count)?;
            }
            writeln!(f, "  Total: {}", word.total)?;
            writeln!(f, "  Average: {:.2}", word.average())?;
            writeln!(f, "  Highest: {}", describe(word.highest.as_ref()))?;
            writeln!(f, "  Lowest: {}", describe(word.lowest.as_ref()))?;
            writeln!(f, "  Trend: {}", word.trend)?;
        }
        Ok(())
    }
}

fn describe(quarter: Option<&QuarterCount>) -> String {
    match quarter {
        Some(q) => format!("{} ({})", q.quarter, q.count),
        None => "none".to_string(),
    }
}

/// `1234567` becomes `"1,234,567"`.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
