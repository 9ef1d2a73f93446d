//! Context windows around a match.

use crate::search::Occurrence;

/// Text surrounding a match, split into the part before, the match itself,
/// and the part after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow<'t> {
    pub before: &'t str,
    pub matched: &'t str,
    pub after: &'t str,
}

impl<'t> ContextWindow<'t> {
    /// Up to `window` characters either side of `occurrence`.
    ///
    /// Offsets are clamped to the text, so this never panics: an occurrence
    /// past the end yields empty parts and `end < start` is read as an empty
    /// match at `start`.
    pub fn around(text: &'t str, occurrence: Occurrence, window: usize) -> Self {
        let start = byte_offset(text, occurrence.start);
        let end = byte_offset(text, occurrence.end.max(occurrence.start));
        let from = byte_offset(text, occurrence.start.saturating_sub(window));
        let to = byte_offset(text, occurrence.end.max(occurrence.start).saturating_add(window));

        Self {
            before: &text[from..start],
            matched: &text[start..end],
            after: &text[end..to],
        }
    }

    /// The whole window as one string, without marking the match.
    pub fn joined(&self) -> String {
        [self.before, self.matched, self.after].concat()
    }
}

/// Byte offset of the `chars`-th character, or the text length past the end.
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}
