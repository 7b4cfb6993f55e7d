//! Candidate locator: boundary-safe phrase occurrences in the current buffer.
//!
//! Offsets are byte ranges into the text passed in, valid only until the next
//! mutation — every splice shifts downstream offsets, so callers re-run the
//! locator against the latest buffer instead of caching spans.
//!
//! Matching is ASCII-case-insensitive via fixed-width window comparison, which
//! keeps reported offsets identical to the original buffer (a full Unicode
//! case fold could change byte lengths and corrupt spans).

/// A `[start, end)` byte range in a specific text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// `true` for a zero-length span.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Find every whole-word occurrence of `phrase` in `text`.
///
/// An occurrence qualifies when the characters adjacent to both ends are
/// absent or non-alphanumeric, so "cat" never matches inside "catalog".
/// Matches do not overlap; scanning resumes after each hit. Returns an empty
/// vector for an empty phrase.
#[must_use]
pub fn find_occurrences(text: &str, phrase: &str) -> Vec<Span> {
    let plen = phrase.len();
    if plen == 0 || plen > text.len() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut i = 0;
    while i + plen <= text.len() {
        let Some(window) = text.get(i..i + plen) else {
            // Not a char boundary here; move to the next byte.
            i += 1;
            continue;
        };
        if window.eq_ignore_ascii_case(phrase) && is_word_boundary(text, i, i + plen) {
            spans.push(Span {
                start: i,
                end: i + plen,
            });
            i += plen;
        } else {
            i += 1;
        }
    }
    spans
}

/// Count of whole-word occurrences; feeds the relevance ranker.
#[must_use]
pub fn occurrence_count(text: &str, phrase: &str) -> usize {
    find_occurrences(text, phrase).len()
}

/// Both ends of `[start, end)` sit on non-alphanumeric neighbors (or the
/// text's edges).
fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .is_none_or(|c| !c.is_alphanumeric());
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_single_occurrence() {
        let spans = find_occurrences("learn about cat insurance today", "cat insurance");
        assert_eq!(spans, vec![Span { start: 12, end: 25 }]);
    }

    #[test]
    fn finds_multiple_occurrences() {
        let text = "cat insurance is great. get cat insurance now.";
        let spans = find_occurrences(text, "cat insurance");
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[1].start..spans[1].end], "cat insurance");
    }

    #[test]
    fn matching_is_case_insensitive_without_shifting_offsets() {
        let text = "Cat Insurance matters";
        let spans = find_occurrences(text, "cat insurance");
        assert_eq!(spans, vec![Span { start: 0, end: 13 }]);
        assert_eq!(&text[0..13], "Cat Insurance");
    }

    #[test]
    fn rejects_partial_word_matches() {
        // GIVEN: the phrase embedded inside larger words on either side
        // THEN: no occurrence is reported
        assert!(find_occurrences("concatenation", "cat").is_empty());
        assert!(find_occurrences("catalog", "cat").is_empty());
        assert!(find_occurrences("bobcat", "cat").is_empty());
    }

    #[test]
    fn punctuation_counts_as_a_boundary() {
        let spans = find_occurrences("Get insurance, today!", "insurance");
        assert_eq!(spans.len(), 1);
        let spans = find_occurrences("(cat insurance)", "cat insurance");
        assert_eq!(spans, vec![Span { start: 1, end: 14 }]);
    }

    #[test]
    fn matches_at_text_edges() {
        assert_eq!(
            find_occurrences("insurance", "insurance"),
            vec![Span { start: 0, end: 9 }]
        );
        let text = "buy insurance";
        assert_eq!(find_occurrences(text, "insurance"), vec![Span { start: 4, end: 13 }]);
    }

    #[test]
    fn digits_block_the_boundary() {
        assert!(find_occurrences("insurance2", "insurance").is_empty());
        assert!(find_occurrences("2insurance", "insurance").is_empty());
    }

    #[test]
    fn empty_phrase_yields_nothing() {
        assert!(find_occurrences("some text", "").is_empty());
    }

    #[test]
    fn phrase_longer_than_text_yields_nothing() {
        assert!(find_occurrences("cat", "cat insurance").is_empty());
    }

    #[test]
    fn occurrences_do_not_overlap() {
        // "aa aa aa" with phrase "aa" — three discrete hits, no overlap
        let spans = find_occurrences("aa aa aa", "aa");
        assert_eq!(spans.len(), 3);
    }

    #[test]
    fn handles_multibyte_neighbors() {
        // é is alphabetic, so it blocks the boundary; — does not
        assert!(find_occurrences("écat insurance", "cat insurance").is_empty());
        let text = "tips — cat insurance — here";
        let spans = find_occurrences(text, "cat insurance");
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "cat insurance");
    }

    #[test]
    fn occurrence_count_matches_span_count() {
        let text = "pet insurance and pet insurance and pet insurance";
        assert_eq!(occurrence_count(text, "pet insurance"), 3);
        assert_eq!(occurrence_count(text, "missing"), 0);
    }
}
