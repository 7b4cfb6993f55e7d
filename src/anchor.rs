//! Anchor text generator: varied natural-language labels per intent category.
//!
//! Each intent category carries five fixed phrasing templates. The template
//! is picked by how many links the document already has to the same target,
//! so repeated links to one page read differently instead of stamping the
//! same label everywhere. Selection is purely positional — no randomness, so
//! output stays byte-identical across runs.

use crate::index::IntentCategory;

/// Fixed number of phrasing templates per intent category.
pub const TEMPLATES_PER_INTENT: usize = 5;

/// `{}` marks where the keyword phrase lands in a template.
const COMMERCIAL: [&str; TEMPLATES_PER_INTENT] = [
    "learn about {}",
    "explore {} options",
    "discover {}",
    "{} guide",
    "comprehensive {}",
];

const TRANSACTIONAL: [&str; TEMPLATES_PER_INTENT] = [
    "get {}",
    "compare {} plans",
    "{} quotes online",
    "sign up for {}",
    "{} deals",
];

const INFORMATIONAL: [&str; TEMPLATES_PER_INTENT] = [
    "what is {}",
    "{} explained",
    "understanding {}",
    "{} basics",
    "more on {}",
];

const NAVIGATIONAL: [&str; TEMPLATES_PER_INTENT] = [
    "visit our {} page",
    "{} overview",
    "see {}",
    "browse {}",
    "{} hub",
];

/// Build the anchor label for a phrase.
///
/// `prior_links_to_target` is how many links this document already has to the
/// same target; it rotates through the category's five templates so repeated
/// anchors vary.
#[must_use]
pub fn anchor_text(intent: IntentCategory, phrase: &str, prior_links_to_target: usize) -> String {
    let templates = match intent {
        IntentCategory::Commercial => &COMMERCIAL,
        IntentCategory::Transactional => &TRANSACTIONAL,
        IntentCategory::Informational => &INFORMATIONAL,
        IntentCategory::Navigational => &NAVIGATIONAL,
    };
    let template = templates[prior_links_to_target % TEMPLATES_PER_INTENT];
    template.replacen("{}", phrase, 1)
}

/// Human-readable title for a target id: separators become spaces.
///
/// `"cat-insurance"` → `"cat insurance"`.
#[must_use]
pub fn title_for_target(target: &str) -> String {
    target.replace(['-', '_'], " ")
}

/// Render the full anchor markup spliced into the document.
#[must_use]
pub fn render_anchor(target: &str, label: &str) -> String {
    format!(
        r#"<a href="{}" title="{}">{label}</a>"#,
        escape_attr(target),
        escape_attr(&title_for_target(target)),
    )
}

/// Minimal attribute escaping; target ids are opaque but must not be able to
/// break out of the quoted attribute.
fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
