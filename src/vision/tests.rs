use super::openai::{
    DEFAULT_VERDICT_CONFIDENCE, MAX_KEYWORDS, finalize_keywords, parse_codes, parse_keywords,
    parse_verdict,
};
use super::*;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_parse_keywords_drops_blank_entries() {
    let content = r#"{"keywords": ["Asahi Super Dry", "  ", "", "asahi beer 350ml"]}"#;
    let keywords = parse_keywords(content).unwrap();
    assert_eq!(keywords, vec!["Asahi Super Dry", "asahi beer 350ml"]);
}

#[test]
fn test_parse_keywords_missing_field_is_empty() {
    let keywords = parse_keywords(r#"{"other": 1}"#).unwrap();
    assert!(keywords.is_empty());
}

#[test]
fn test_parse_keywords_rejects_non_json() {
    let result = parse_keywords("Sure! Here are some keywords: foo, bar");
    assert!(matches!(result, Err(VisionError::MalformedOutput { .. })));
}

#[test]
fn test_finalize_keywords_appends_product_name_once() {
    let keywords = finalize_keywords(strings(&["asahi beer"]), "Asahi Super Dry");
    assert_eq!(keywords, vec!["asahi beer", "Asahi Super Dry"]);

    let keywords = finalize_keywords(strings(&["Asahi Super Dry"]), "Asahi Super Dry");
    assert_eq!(keywords, vec!["Asahi Super Dry"]);

    let keywords = finalize_keywords(Vec::new(), "");
    assert!(keywords.is_empty());
}

#[test]
fn test_finalize_keywords_never_exceeds_the_cap() {
    // A full model answer plus the appended name must still respect the cap.
    let keywords = finalize_keywords(strings(&["a", "b", "c", "d", "e"]), "product");
    assert_eq!(keywords, vec!["a", "b", "c", "d", "e"]);

    let keywords = finalize_keywords(strings(&["a", "b", "c", "d", "e", "f", "g"]), "product");
    assert_eq!(keywords.len(), MAX_KEYWORDS);
}

#[test]
fn test_parse_verdict_orders_and_dedupes() {
    let content = r#"{
        "jancodes": ["4901234567894", "4902102072670", "4901234567894"],
        "confidence": 0.85
    }"#;
    let verdict = parse_verdict(content).unwrap();

    assert_eq!(verdict.jancodes, vec!["4901234567894", "4902102072670"]);
    assert!((verdict.confidence - 0.85).abs() < f64::EPSILON);
}

#[test]
fn test_parse_verdict_clamps_confidence() {
    let verdict = parse_verdict(r#"{"jancodes": [], "confidence": 1.7}"#).unwrap();
    assert_eq!(verdict.confidence, 1.0);

    let verdict = parse_verdict(r#"{"jancodes": [], "confidence": -0.2}"#).unwrap();
    assert_eq!(verdict.confidence, 0.0);
}

#[test]
fn test_parse_verdict_defaults_missing_confidence() {
    let verdict = parse_verdict(r#"{"jancodes": ["4901234567894"]}"#).unwrap();
    assert_eq!(verdict.confidence, DEFAULT_VERDICT_CONFIDENCE);
}

#[test]
fn test_parse_codes_ignores_confidence() {
    let codes = parse_codes(r#"{"jancodes": ["4901234567894"], "confidence": 0.1}"#).unwrap();
    assert_eq!(codes, vec!["4901234567894"]);
}

#[tokio::test]
async fn test_mock_default_filter_is_malformed() {
    let mock = MockVisionModel::new();
    let result = mock.filter_candidates(&[], "name", "http://img").await;
    assert!(matches!(result, Err(VisionError::MalformedOutput { .. })));
    assert_eq!(mock.filter_calls(), 1);
}

#[tokio::test]
async fn test_mock_keyword_failure() {
    let mock = MockVisionModel::new().with_keyword_failure();
    let result = mock.generate_keywords("name", "http://img").await;
    assert!(matches!(result, Err(VisionError::Unavailable { .. })));
}
