//! Tests for the non-mutating audit entry point.

use linkweaver::{IntentCategory, KeywordEntry, KeywordIndex, LinkEngine, LinkerConfig};
use pretty_assertions::assert_eq;

fn engine() -> LinkEngine {
    LinkEngine::new(
        KeywordIndex::new(vec![
            KeywordEntry {
                phrase: "cat insurance".to_string(),
                target: "cat-insurance".to_string(),
                weight: 10.0,
                intent: IntentCategory::Commercial,
            },
            KeywordEntry {
                phrase: "vet visits".to_string(),
                target: "vet-visits".to_string(),
                weight: 3.0,
                intent: IntentCategory::Informational,
            },
        ]),
        LinkerConfig::default(),
    )
}

#[test]
fn analyze_reports_opportunities_without_mutating() {
    let engine = engine();
    let text = "cat insurance and vet visits for new owners";
    let report = engine.analyze(text, "some-page");

    assert_eq!(report.opportunities.len(), 2);
    assert_eq!(report.opportunities[0].phrase, "cat insurance");
    assert_eq!(report.opportunities[0].target, "cat-insurance");
    assert_eq!(report.opportunities[0].occurrences, 1);
    assert_eq!(report.opportunities[0].intent, IntentCategory::Commercial);
    // The input is untouched — analyze returns a report, never text
    assert_eq!(report.existing_anchor_count, 0);
}

#[test]
fn analyze_before_and_after_link_agree_on_fresh_input() {
    let engine = engine();
    let text = "cat insurance and vet visits for new owners";

    let before = engine.analyze(text, "page");
    let _ = engine.link(text, "page");
    let after = engine.analyze(text, "page");

    assert_eq!(before.opportunities.len(), after.opportunities.len());
    assert!((before.opportunities[0].score - after.opportunities[0].score).abs() < 1e-12);
    assert_eq!(before.word_count, after.word_count);
}

#[test]
fn link_density_counts_existing_anchors() {
    let engine = engine();
    let text = r#"five words <a href="x">linked</a> here"#;
    let report = engine.analyze(text, "page");
    assert_eq!(report.existing_anchor_count, 1);
    // whitespace-separated tokens: five, words, <a, href="x">linked</a>, here
    assert_eq!(report.word_count, 5);
    assert!((report.link_density - 1.0 / 5.0).abs() < 1e-12);
}

#[test]
fn analyze_excludes_the_current_page() {
    let engine = engine();
    let report = engine.analyze("cat insurance and vet visits", "cat-insurance");
    assert_eq!(report.opportunities.len(), 1);
    assert_eq!(report.opportunities[0].target, "vet-visits");
}

#[test]
fn report_round_trips_through_json() {
    let engine = engine();
    let report = engine.analyze("cat insurance for indoor cats", "page");
    let json = serde_json::to_string_pretty(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["document_id"], "page");
    assert_eq!(value["opportunities"][0]["phrase"], "cat insurance");
    assert_eq!(value["opportunities"][0]["intent"], "commercial");
}
