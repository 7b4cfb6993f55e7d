//! Non-mutating linking audit.
//!
//! [`analyze_document`] reports what a linking pass *could* do — ranked
//! opportunities with their scores — plus a link-density metric over the
//! text as it stands. It never touches the buffer and does not depend on
//! whether (or how often) the engine has run; external auditing tooling is
//! the only consumer.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::index::{IntentCategory, KeywordIndex};
use crate::rank::rank_keywords;

/// One ranked linking opportunity.
#[derive(Debug, Clone, Serialize)]
pub struct LinkOpportunity {
    /// Keyword phrase.
    pub phrase: String,
    /// Target page id.
    pub target: String,
    /// Whole-word occurrences in the text.
    pub occurrences: usize,
    /// Table priority weight.
    pub weight: f64,
    /// Intent category.
    pub intent: IntentCategory,
    /// Aggregate relevance score.
    pub score: f64,
}

/// Audit report for one document.
#[derive(Debug, Clone, Serialize)]
pub struct LinkReport {
    /// Document the text belongs to.
    pub document_id: String,
    /// Whitespace-separated word count.
    pub word_count: usize,
    /// `<a>` tags already present in the text.
    pub existing_anchor_count: usize,
    /// Existing anchors ÷ words; 0 for empty text.
    pub link_density: f64,
    /// Ranked opportunities, best first. Self-targeting keywords are
    /// excluded, matching what a linking pass would do.
    pub opportunities: Vec<LinkOpportunity>,
}

/// Build the audit report for `text`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn analyze_document(index: &KeywordIndex, text: &str, document_id: &str) -> LinkReport {
    let word_count = text.split_whitespace().count();
    let existing_anchor_count = count_anchors(text);
    let link_density = if word_count == 0 {
        0.0
    } else {
        existing_anchor_count as f64 / word_count as f64
    };

    let opportunities = rank_keywords(index, text)
        .into_iter()
        .filter(|k| k.entry.target != document_id)
        .map(|k| LinkOpportunity {
            phrase: k.entry.phrase.clone(),
            target: k.entry.target.clone(),
            occurrences: k.occurrences,
            weight: k.entry.weight,
            intent: k.entry.intent,
            score: k.score,
        })
        .collect();

    LinkReport {
        document_id: document_id.to_string(),
        word_count,
        existing_anchor_count,
        link_density,
        opportunities,
    }
}

/// Count opening `<a>` tags in the text.
fn count_anchors(text: &str) -> usize {
    static ANCHOR_RE: OnceLock<Regex> = OnceLock::new();
    let re = ANCHOR_RE.get_or_init(|| Regex::new(r"(?i)<a[\s>]").expect("static regex"));
    re.find_iter(text).count()
}
