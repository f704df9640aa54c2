//! Performance benchmarks for pagesift.
//!
//! Run with: `cargo bench`
//!
//! Covers the offline path only (no renderer, no network):
//! - each sanitizing pass on a small synthetic page
//! - keyword scoring on the normalized body
//! - the full `analyze_html` pipeline, and a synthetic page of growing size

#![allow(clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pagesift::relevance::english_stemmer;
use pagesift::sanitize::{sanitize_html, SanitizationSpec};
use pagesift::text::normalize;
use pagesift::{analyze_html, Options, RelevanceScorer, ScoringOptions, StopWords};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article</title>
    <meta property="og:title" content="Solar Panels &amp; Home Batteries">
    <meta property="og:image" content="/img/lead.jpg">
    <meta property="og:description" content="A sample article for benchmarking.">
    <script>window.analytics = {};</script>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About</a>
    </nav>
    <article>
        <h1>Solar panels and home batteries</h1>
        <p>Solar panels turn sunlight into electricity. Home batteries store the
        electricity that solar panels produce during the day.</p>
        <p>Home batteries smooth out the evening peak, when solar panels are idle
        and grid prices are highest.</p>
        <p>Installers size home batteries against the output of the solar panels
        and the household's evening demand.</p>
    </article>
    <div class="share-widget">Share on social media</div>
    <aside>
        <h3>Related Articles</h3>
        <ul>
            <li>Related article 1</li>
            <li>Related article 2</li>
        </ul>
    </aside>
    <footer>
        <p>Copyright 2024</p>
    </footer>
</body>
</html>
"#;

fn bench_sanitize_passes(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");
    for (name, spec) in [
        ("head", SanitizationSpec::METADATA),
        ("body", SanitizationSpec::BODY),
        ("source", SanitizationSpec::SOURCE),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| sanitize_html(black_box(SAMPLE_HTML), &spec));
        });
    }
    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let body = sanitize_html(SAMPLE_HTML, &SanitizationSpec::BODY);
    let text = normalize(&body.text, StopWords::bundled(), true);
    let stemmer = english_stemmer();
    let options = ScoringOptions::default();
    let scorer = RelevanceScorer::new(StopWords::bundled(), &stemmer, &options);

    c.bench_function("score", |b| {
        b.iter(|| scorer.score(black_box("Solar Panels & Home Batteries"), black_box(&text)));
    });
}

fn bench_analyze_html(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let options = Options::default();

    c.bench_function("analyze_html", |b| {
        b.iter(|| rt.block_on(analyze_html("https://example.com/post", black_box(SAMPLE_HTML), &options)));
    });
}

/// Synthetic pages with a growing number of paragraphs.
fn bench_page_size(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let options = Options::default();
    let paragraph = "<p>Grid operators balance solar output against evening demand with \
        storage, imports and demand response programs.</p>";

    let mut group = c.benchmark_group("page_size");
    for paragraphs in [10usize, 100, 1000] {
        let html = format!(
            "<html><head><title>Grid</title></head><body>{}</body></html>",
            paragraph.repeat(paragraphs)
        );
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("analyze_html", paragraphs), &html, |b, html| {
            b.iter(|| rt.block_on(analyze_html("https://example.com/", black_box(html), &options)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sanitize_passes,
    bench_scoring,
    bench_analyze_html,
    bench_page_size
);
criterion_main!(benches);
