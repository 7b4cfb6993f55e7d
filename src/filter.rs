//! Placement filter: rejects candidate positions that must not receive links.
//!
//! Three rules, checked in order:
//! 1. inside an existing `<a>…</a>` span,
//! 2. inside a heading (`<h1>`–`<h6>`) span when `avoid_headers` is set,
//! 3. closer than the configured minimum distance to the previous insertion.
//!
//! Tag enclosure is decided by scanning a bounded window of text before the
//! candidate for the nearest anchor/heading marker, not by parsing the HTML.
//! A tag or heading longer than the window can therefore be misjudged; the
//! windows are sized so that never happens on generated article markup, and
//! the scan stays cheap across thousands of documents.

use crate::config::LinkerConfig;
use crate::locate::Span;

/// Look-behind window for anchor-tag markers, in bytes.
pub const ANCHOR_WINDOW: usize = 100;

/// Look-behind window for heading markers, in bytes.
pub const HEADING_WINDOW: usize = 200;

/// Why a candidate position was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Candidate lies inside an existing anchor span.
    InsideAnchor,
    /// Candidate lies inside a heading span.
    InsideHeading,
    /// Candidate is too close to the previous insertion.
    TooClose,
}

impl Rejection {
    /// Short label for trace output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InsideAnchor => "inside-anchor",
            Self::InsideHeading => "inside-heading",
            Self::TooClose => "too-close",
        }
    }
}

/// Apply all placement rules to a candidate span.
///
/// Returns the first rule that rejects it, or `None` when the position may
/// receive a link. `last_insertion` is the offset of the most recent splice
/// in this document, when any.
#[must_use]
pub fn check_placement(
    text: &str,
    span: Span,
    config: &LinkerConfig,
    last_insertion: Option<usize>,
) -> Option<Rejection> {
    if inside_anchor(text, span.start) {
        return Some(Rejection::InsideAnchor);
    }
    if config.avoid_headers && inside_heading(text, span.start) {
        return Some(Rejection::InsideHeading);
    }
    if let Some(last) = last_insertion {
        if span.start.abs_diff(last) < config.min_char_distance_between_links {
            return Some(Rejection::TooClose);
        }
    }
    None
}

/// `true` when `offset` falls inside an `<a>…</a>` span.
///
/// The nearest anchor marker in the preceding [`ANCHOR_WINDOW`] bytes decides:
/// an opening `<a` with no `</a>` after it means the offset is inside the
/// anchor (including inside the opening tag's own attributes).
#[must_use]
pub fn inside_anchor(text: &str, offset: usize) -> bool {
    let window = window_before(text, offset, ANCHOR_WINDOW).to_ascii_lowercase();
    let last_open = rfind_tag_open(&window, "a");
    let last_close = window.rfind("</a>");
    match (last_open, last_close) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// `true` when `offset` falls inside a `<h1>`–`<h6>` span.
///
/// Same nearest-marker rule as [`inside_anchor`], over the wider
/// [`HEADING_WINDOW`] (headings carry more text than anchor labels).
#[must_use]
pub fn inside_heading(text: &str, offset: usize) -> bool {
    let window = window_before(text, offset, HEADING_WINDOW).to_ascii_lowercase();
    let mut last_open = None;
    let mut last_close = None;
    for level in 1..=6u8 {
        let tag = format!("h{level}");
        last_open = last_open.max(rfind_tag_open(&window, &tag));
        last_close = last_close.max(window.rfind(&format!("</{tag}>")));
    }
    match (last_open, last_close) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Slice up to `len` bytes of text before `offset`, snapped to a char boundary.
fn window_before(text: &str, offset: usize, len: usize) -> &str {
    let mut start = offset.saturating_sub(len);
    while start < offset && !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..offset]
}

/// Byte position of the last `<tag` marker that starts a real opening tag
/// (followed by whitespace, `>`, or end of window — so `<a` never matches
/// `<article`).
fn rfind_tag_open(window: &str, tag: &str) -> Option<usize> {
    let marker = format!("<{tag}");
    let mut best = None;
    for (pos, _) in window.match_indices(&marker) {
        let rest = &window.as_bytes()[pos + marker.len()..];
        if rest.first().is_none_or(|b| b.is_ascii_whitespace() || *b == b'>') {
            best = Some(pos);
        }
    }
    best
}
