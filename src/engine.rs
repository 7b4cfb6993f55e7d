//! Insertion engine and constraint tracker.
//!
//! Walks the ranked keyword list and splices at most one anchor per keyword
//! into the document buffer, re-deriving candidate positions from the current
//! buffer before every insertion — offsets computed before a splice are
//! invalid after it, so nothing is cached across mutations.
//!
//! State machine per pass: **Scanning → Inserting → Done**. Scanning picks
//! the next ranked keyword and filters its candidates; Inserting splices the
//! winning candidate and updates the constraint tracker; Done is reached when
//! the keyword list is exhausted or the document-wide cap is hit.
//!
//! The engine is not idempotent: re-running it over already-linked output may
//! rescan and alter earlier anchors. Callers invoke it exactly once per
//! freshly generated document.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::anchor::{anchor_text, render_anchor};
use crate::analyze::{LinkReport, analyze_document};
use crate::config::{LinkerConfig, LinkerOverrides};
use crate::filter::check_placement;
use crate::index::{IntentCategory, KeywordIndex};
use crate::locate::{Span, find_occurrences};
use crate::rank::rank_keywords;
use crate::score::position_score;

/// Phase of the insertion loop; see the module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Scanning,
    Inserting,
    Done,
}

/// One completed splice.
#[derive(Debug, Clone)]
pub struct InsertionRecord {
    /// Target page the anchor points to.
    pub target: String,
    /// Rendered anchor label.
    pub anchor_text: String,
    /// Final offset range of the anchor markup in the output buffer.
    pub span: Span,
    /// Intent category of the keyword that produced the anchor.
    pub intent: IntentCategory,
}

/// Annotated text plus the insertions that produced it.
#[derive(Debug, Clone)]
pub struct LinkOutcome {
    /// The mutated document text.
    pub text: String,
    /// Insertions in the order they were made.
    pub insertions: Vec<InsertionRecord>,
}

/// Per-invocation constraint tracker. Created at the start of a pass and
/// discarded with it; nothing survives across calls.
struct DocumentContext<'a> {
    page_id: &'a str,
    per_target: HashMap<String, usize>,
    total: usize,
    last_offset: Option<usize>,
}

impl<'a> DocumentContext<'a> {
    fn new(page_id: &'a str) -> Self {
        Self {
            page_id,
            per_target: HashMap::new(),
            total: 0,
            last_offset: None,
        }
    }

    fn links_to(&self, target: &str) -> usize {
        self.per_target.get(target).copied().unwrap_or(0)
    }

    fn record(&mut self, target: &str, offset: usize) {
        *self.per_target.entry(target.to_string()).or_insert(0) += 1;
        self.total += 1;
        self.last_offset = Some(offset);
    }
}

/// The contextual keyword-linking engine.
///
/// Holds only immutable state (the keyword table and base constraints), so a
/// single engine can serve any number of concurrent linking passes — each
/// pass owns its document buffer exclusively.
#[derive(Debug, Clone)]
pub struct LinkEngine {
    index: KeywordIndex,
    config: LinkerConfig,
}

impl LinkEngine {
    /// Build an engine over a keyword table and base constraints.
    #[must_use]
    pub fn new(index: KeywordIndex, config: LinkerConfig) -> Self {
        Self { index, config }
    }

    /// The engine's keyword table.
    #[must_use]
    pub fn index(&self) -> &KeywordIndex {
        &self.index
    }

    /// The engine's base constraints.
    #[must_use]
    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Inject contextual links into `text` and return the annotated copy.
    ///
    /// `document_id` is the page the text belongs to; keywords targeting it
    /// are skipped so a page never links to itself. Empty input is returned
    /// unchanged. Never fails — anomalies degrade to fewer links.
    #[must_use]
    pub fn link(&self, text: &str, document_id: &str) -> String {
        self.run(text, document_id, self.config.clone()).text
    }

    /// Like [`link`](Self::link), with per-call constraint overrides.
    #[must_use]
    pub fn link_with(&self, text: &str, document_id: &str, overrides: &LinkerOverrides) -> String {
        self.run(text, document_id, overrides.apply(&self.config)).text
    }

    /// Full pass result: annotated text plus the insertion records.
    #[must_use]
    pub fn link_detailed(
        &self,
        text: &str,
        document_id: &str,
        overrides: &LinkerOverrides,
    ) -> LinkOutcome {
        self.run(text, document_id, overrides.apply(&self.config))
    }

    /// Non-mutating audit: ranked opportunities and current link density.
    ///
    /// Independent of engine invocation order; calling it before, after, or
    /// instead of [`link`](Self::link) yields the same report for the same
    /// input.
    #[must_use]
    pub fn analyze(&self, text: &str, document_id: &str) -> LinkReport {
        analyze_document(&self.index, text, document_id)
    }

    fn run(&self, text: &str, page_id: &str, config: LinkerConfig) -> LinkOutcome {
        if text.is_empty() {
            return LinkOutcome {
                text: String::new(),
                insertions: Vec::new(),
            };
        }

        // Keywords are ranked once against the input; candidate positions are
        // re-derived from the live buffer before every insertion.
        let ranked = rank_keywords(&self.index, text);
        let mut buffer = text.to_string();
        let mut ctx = DocumentContext::new(page_id);
        let mut insertions: Vec<InsertionRecord> = Vec::new();
        let mut state = EngineState::Scanning;

        for keyword in &ranked {
            if ctx.total >= config.max_links_per_document {
                state = EngineState::Done;
                trace!(state = ?state, "document link cap reached");
                break;
            }

            let entry = keyword.entry;
            if entry.target == ctx.page_id {
                trace!(keyword = %entry.phrase, "skip: self-link");
                continue;
            }
            let prior = ctx.links_to(&entry.target);
            if prior >= config.max_links_per_target {
                trace!(keyword = %entry.phrase, target = %entry.target, "skip: target cap");
                continue;
            }

            let Some((span, score)) = best_candidate(&buffer, &entry.phrase, &config, &ctx) else {
                trace!(keyword = %entry.phrase, "skip: no valid candidate");
                continue;
            };

            state = EngineState::Inserting;
            trace!(state = ?state, keyword = %entry.phrase, offset = span.start, score, "placing anchor");

            let label = anchor_text(entry.intent, &entry.phrase, prior);
            let markup = render_anchor(&entry.target, &label);
            buffer.replace_range(span.start..span.end, &markup);

            // A splice landing before an earlier insertion shifts that
            // insertion's final position; keep recorded spans current.
            let grown = markup.len() - span.len();
            for record in &mut insertions {
                if record.span.start >= span.start {
                    record.span.start += grown;
                    record.span.end += grown;
                }
            }

            let final_span = Span {
                start: span.start,
                end: span.start + markup.len(),
            };
            ctx.record(&entry.target, span.start);
            debug!(
                keyword = %entry.phrase,
                target = %entry.target,
                offset = span.start,
                total = ctx.total,
                "inserted link"
            );
            insertions.push(InsertionRecord {
                target: entry.target.clone(),
                anchor_text: label,
                span: final_span,
                intent: entry.intent,
            });
            state = EngineState::Scanning;
        }

        if state != EngineState::Done {
            state = EngineState::Done;
        }
        debug!(
            state = ?state,
            document = %page_id,
            inserted = ctx.total,
            ranked = ranked.len(),
            "linking pass complete"
        );

        LinkOutcome {
            text: buffer,
            insertions,
        }
    }
}

/// Locate, filter, and score candidates for one keyword against the current
/// buffer; return the best surviving position. Ties resolve to the earliest
/// offset.
fn best_candidate(
    buffer: &str,
    phrase: &str,
    config: &LinkerConfig,
    ctx: &DocumentContext<'_>,
) -> Option<(Span, f64)> {
    let mut best: Option<(Span, f64)> = None;
    for span in find_occurrences(buffer, phrase) {
        if let Some(rejection) = check_placement(buffer, span, config, ctx.last_offset) {
            trace!(phrase = %phrase, offset = span.start, reason = rejection.as_str(), "candidate rejected");
            continue;
        }
        let score = position_score(buffer, span, config);
        let better = best.is_none_or(|(_, best_score)| score > best_score);
        if better {
            best = Some((span, score));
        }
    }
    best
}
