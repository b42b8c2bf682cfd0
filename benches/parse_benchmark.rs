//! Benchmarks for unhtml conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks convert synthetic HTML documents of increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a synthetic article with the given number of sections.
fn create_test_html(section_count: usize) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html><head><title>Benchmark</title>");
    html.push_str("<meta name=\"generator\" content=\"bench\"></head><body>\n");

    for i in 0..section_count {
        html.push_str(&format!("<h2>Section {}</h2>\n", i + 1));
        html.push_str(
            "<p>Benchmark paragraph with <b>bold</b>, <i>italic</i> and \
             <a href=\"https://example.com/\">linked</a> text.<br>Second line.</p>\n",
        );
        html.push_str("<ul><li>first item</li><li>second <code>item</code><ol><li>nested</li></ol></li></ul>\n");
        html.push_str("<table><thead><tr><td>Key</td><td>Value</td></tr></thead>");
        html.push_str(&format!("<tr><td>row</td><td>{}</td></tr></table>\n", i));
        html.push_str("<blockquote>Quoted <em>words</em></blockquote><pre>  code\n  block</pre><hr>\n");
    }

    html.push_str("</body></html>\n");
    html
}

/// Benchmark input detection.
fn bench_format_detection(c: &mut Criterion) {
    let html = create_test_html(1).into_bytes();
    let binary = b"%PDF-1.7\nnot html";

    c.bench_function("detect_html", |b| {
        b.iter(|| unhtml::detect_format_from_bytes(black_box(&html)).unwrap());
    });

    c.bench_function("detect_binary", |b| {
        b.iter(|| unhtml::detect_format_from_bytes(black_box(binary)).is_err());
    });
}

/// Benchmark HTML conversion at various sizes.
fn bench_html_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("html_parsing");

    for section_count in [1, 10, 100].iter() {
        let html = create_test_html(*section_count);

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| unhtml::parse_str(black_box(&html)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark Markdown rendering of a converted document.
fn bench_markdown_render(c: &mut Criterion) {
    let doc = unhtml::parse_str(&create_test_html(50)).unwrap();
    let options = unhtml::RenderOptions::default();

    c.bench_function("markdown_50_sections", |b| {
        b.iter(|| unhtml::render::to_markdown(black_box(&doc), &options).unwrap());
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_html_parsing,
    bench_markdown_render,
);
criterion_main!(benches);
