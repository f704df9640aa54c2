use pagesift::sanitize::{sanitize, sanitize_html, SanitizationSpec};
use pagesift::{analyze_html, Options};
use std::sync::Arc;
use std::time::{Duration, Instant};

async fn analyze(html: &str) -> pagesift::AnalysisResult {
    match analyze_html("https://example.com/", html, &Options::default()).await {
        Ok(result) => result,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[tokio::test]
async fn analyze_does_not_fail_on_unclosed_tags() {
    let result = analyze("<p>text text<div>rain rain").await;
    assert_eq!(result.title, "Untitled");
    assert_eq!(result.total_words, 4);
}

#[tokio::test]
async fn analyze_does_not_fail_on_invalid_nesting() {
    let result = analyze("<p><div></p></div>").await;
    assert_eq!(result.total_words, 0);
    assert!(result.relevance.is_empty());
}

#[tokio::test]
async fn analyze_does_not_fail_on_broken_attributes() {
    let result = analyze("<div class=\"test id=broken><meta property=og:title content=>").await;
    assert!(!result.title.is_empty());
}

#[tokio::test]
async fn analyze_empty_document() {
    let result = analyze("").await;
    assert_eq!(result.title, "Untitled");
    assert_eq!(result.total_words, 0);
    assert!(result.relevance.is_empty());
}

#[tokio::test]
async fn analyze_document_without_head_or_body_tags() {
    let result = analyze("<title>Bare</title>bare words bare words").await;
    assert_eq!(result.title, "Bare");
    assert!(result.relevance.iter().any(|k| k.term.contains("bare")));
}

#[tokio::test]
async fn analyze_non_latin_text() {
    let result = analyze("<html><body><p>Größe Größe Straße Straße 東京 東京</p></body></html>").await;
    let terms: Vec<&str> = result.relevance.iter().map(|k| k.term.as_str()).collect();
    assert!(terms.iter().any(|t| t.contains("größe")), "terms: {terms:?}");
    assert!(terms.iter().any(|t| t.contains("東京")), "terms: {terms:?}");
}

#[tokio::test]
async fn analyze_deep_nesting() {
    let depth = 500;
    let html = format!(
        "<html><body>{}deep deep deep{}</body></html>",
        "<div>".repeat(depth),
        "</div>".repeat(depth)
    );
    let result = analyze(&html).await;
    assert_eq!(result.relevance[0].term, "deep");
}

#[tokio::test]
async fn analyze_large_page_completes_promptly() {
    let paragraph = "<p>Reservoir levels dropped as the drought extended into autumn.</p>";
    let html = format!("<html><body>{}</body></html>", paragraph.repeat(500));

    let started = Instant::now();
    let result = analyze(&html).await;

    assert!(started.elapsed() < Duration::from_secs(30));
    assert!(result.total_words > 2000);
    assert!(result.relevance.len() <= 20);
}

#[tokio::test]
async fn class_on_body_does_not_erase_the_page() {
    let result = analyze(r#"<html><body class="has-header nav-open"><p>kept kept text</p></body></html>"#).await;
    assert!(result.relevance.iter().any(|k| k.term == "kept"));
}

#[test]
fn sanitize_missing_target_yields_empty_fragment() {
    let fragment = sanitize_html("<p>no explicit head</p>", &SanitizationSpec::METADATA);
    assert!(fragment.text.is_empty());
}

#[tokio::test]
async fn sanitize_async_matches_sync() {
    let html = "<html><head><title>T</title></head><body><nav>x</nav><p>a  b</p></body></html>";
    let fragment = sanitize(Arc::from(html), SanitizationSpec::BODY).await.unwrap();
    assert_eq!(fragment, sanitize_html(html, &SanitizationSpec::BODY));
    assert!(!fragment.text.contains('x'));
}
