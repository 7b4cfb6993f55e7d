//! Relevance ranker: decides which keyword claims a document position first.
//!
//! Each keyword with at least one located occurrence gets an aggregate score:
//!
//! ```text
//! score = weight
//!       + ln(occurrences + 1) × 2
//!       + 3  if the phrase appears in a heading
//!       + 2  if the phrase appears in the first paragraph
//!       + 1  if intent is commercial or transactional
//! ```
//!
//! Keywords are processed in descending score order; the sort is stable, so
//! equal scores keep table-declaration order. Later keywords may find every
//! remaining position disqualified by the distance rule — that is the
//! intended pressure valve, not an error.

use std::sync::OnceLock;

use regex::Regex;

use crate::index::{IntentCategory, KeywordEntry, KeywordIndex};
use crate::locate::occurrence_count;

/// Score bonus when the phrase appears inside a heading.
const HEADING_BONUS: f64 = 3.0;

/// Score bonus when the phrase appears in the first paragraph.
const FIRST_PARAGRAPH_BONUS: f64 = 2.0;

/// Score bonus for monetizable intents.
const INTENT_BONUS: f64 = 1.0;

/// A keyword admitted to the insertion loop, with its aggregate score.
#[derive(Debug, Clone)]
pub struct RankedKeyword<'a> {
    /// The underlying table row.
    pub entry: &'a KeywordEntry,
    /// Whole-word occurrences in the document at ranking time.
    pub occurrences: usize,
    /// Aggregate relevance score.
    pub score: f64,
}

/// Rank every keyword with at least one occurrence in `text`, best first.
#[must_use]
pub fn rank_keywords<'a>(index: &'a KeywordIndex, text: &str) -> Vec<RankedKeyword<'a>> {
    let headings = heading_texts(text);
    let first_paragraph = first_paragraph(text);

    let mut ranked: Vec<RankedKeyword<'a>> = index
        .entries()
        .iter()
        .filter_map(|entry| {
            let occurrences = occurrence_count(text, &entry.phrase);
            if occurrences == 0 {
                return None;
            }
            let score = keyword_score(entry, occurrences, &headings, first_paragraph);
            Some(RankedKeyword {
                entry,
                occurrences,
                score,
            })
        })
        .collect();

    // Stable sort: ties keep table order.
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Aggregate score for one keyword.
#[allow(clippy::cast_precision_loss)]
fn keyword_score(
    entry: &KeywordEntry,
    occurrences: usize,
    headings: &[&str],
    first_paragraph: &str,
) -> f64 {
    let mut score = entry.weight + ((occurrences as f64) + 1.0).ln() * 2.0;

    if headings
        .iter()
        .any(|h| occurrence_count(h, &entry.phrase) > 0)
    {
        score += HEADING_BONUS;
    }
    if occurrence_count(first_paragraph, &entry.phrase) > 0 {
        score += FIRST_PARAGRAPH_BONUS;
    }
    if matches!(
        entry.intent,
        IntentCategory::Commercial | IntentCategory::Transactional
    ) {
        score += INTENT_BONUS;
    }

    score
}

/// Inner text of every `<h1>`–`<h6>` element.
fn heading_texts(text: &str) -> Vec<&str> {
    static HEADING_RE: OnceLock<Regex> = OnceLock::new();
    let re = HEADING_RE.get_or_init(|| {
        Regex::new(r"(?is)<h[1-6][^>]*>(.*?)</h[1-6]\s*>").expect("static regex")
    });
    re.captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// The document's first paragraph: the inner text of the first `<p>…</p>`,
/// else everything before the first blank line, else the whole text.
fn first_paragraph(text: &str) -> &str {
    static PARAGRAPH_RE: OnceLock<Regex> = OnceLock::new();
    let re = PARAGRAPH_RE
        .get_or_init(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p\s*>").expect("static regex"));
    if let Some(captures) = re.captures(text) {
        if let Some(inner) = captures.get(1) {
            return inner.as_str();
        }
    }
    text.split("\n\n").next().unwrap_or(text)
}
