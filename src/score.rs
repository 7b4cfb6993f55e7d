//! Position scorer: structural heuristics over surviving candidate positions.
//!
//! Every candidate starts from a base of 100 and collects bonuses:
//! - early placement: +20 in the first third of the document, +10 in the
//!   middle third (gated by `prefer_first_third`),
//! - sentence flow: +15 when the offset sits in the middle 60% of its
//!   sentence (gated by `prefer_sentence_middle`),
//! - lead-in: +10 when the preceding ~50 characters end with a comma or a
//!   connective word.
//!
//! The highest-scoring candidate wins; ties resolve to the earliest offset.

use crate::config::LinkerConfig;
use crate::locate::Span;

/// Score every candidate starts from before bonuses.
pub const BASE_SCORE: f64 = 100.0;

/// Look-behind for the lead-in bonus, in bytes.
const LEAD_WINDOW: usize = 50;

/// Words that signal a natural continuation point before the candidate.
const CONNECTIVES: &[&str] = &["and", "but", "for", "or", "with"];

/// Compute the placement score for a candidate span.
#[must_use]
pub fn position_score(text: &str, span: Span, config: &LinkerConfig) -> f64 {
    let mut score = BASE_SCORE;

    if config.prefer_first_third {
        score += early_position_bonus(text, span.start);
    }
    if config.prefer_sentence_middle && in_sentence_middle(text, span.start) {
        score += 15.0;
    }
    if has_lead_in(text, span.start) {
        score += 10.0;
    }

    score
}

/// +20 in the first third of the document, +10 in the middle third.
#[allow(clippy::cast_precision_loss)]
fn early_position_bonus(text: &str, offset: usize) -> f64 {
    let relative = offset as f64 / text.len().max(1) as f64;
    if relative < 0.33 {
        20.0
    } else if relative < 0.66 {
        10.0
    } else {
        0.0
    }
}

/// `true` when `offset` falls in the middle 60% of its sentence.
///
/// The sentence is bounded by the nearest `.` on either side (or the text's
/// edges). Offsets within the first or last 20% of the span read as sentence
/// openers/closers and get no bonus.
#[allow(clippy::cast_precision_loss)]
fn in_sentence_middle(text: &str, offset: usize) -> bool {
    let start = text[..offset].rfind('.').map_or(0, |i| i + 1);
    let end = text[offset..].find('.').map_or(text.len(), |i| offset + i);
    let len = end.saturating_sub(start);
    if len == 0 {
        return false;
    }
    let relative = (offset - start) as f64 / len as f64;
    (0.2..=0.8).contains(&relative)
}

/// `true` when the text just before `offset` ends with a comma or a
/// connective word — a natural place to weave in a link.
fn has_lead_in(text: &str, offset: usize) -> bool {
    let window = window_before(text, offset, LEAD_WINDOW).trim_end();
    if window.ends_with(',') {
        return true;
    }
    window
        .rsplit(|c: char| c.is_whitespace())
        .next()
        .is_some_and(|word| CONNECTIVES.iter().any(|c| word.eq_ignore_ascii_case(c)))
}

/// Slice up to `len` bytes before `offset`, snapped to a char boundary.
fn window_before(text: &str, offset: usize, len: usize) -> &str {
    let mut start = offset.saturating_sub(len);
    while start < offset && !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..offset]
}
