//! Integration tests for rendering converted documents.

use unhtml::render::{to_json, to_markdown, to_text};
use unhtml::{parse_str, Document, HtmlParser, JsonFormat, MemorySink, RenderOptions, Unhtml};

const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Release Notes</title>
  <meta name="author" content="Docs Team">
</head>
<body>
  <h1>Version 2</h1>
  <p>This release adds <b>tables</b> and <a href="https://example.com/links">links</a>.</p>
  <ul>
    <li>Faster parsing</li>
    <li>Nested lists
      <ol><li>first</li><li>second</li></ol>
    </li>
  </ul>
  <blockquote>Quoted text</blockquote>
  <pre>let x = 1;</pre>
  <table>
    <thead><tr><td>Name</td><td>Value</td></tr></thead>
    <tr><td>depth</td><td>512</td></tr>
  </table>
  <hr>
  <img src="https://example.com/chart.png">
</body>
</html>"#;

fn article() -> Document {
    parse_str(ARTICLE).unwrap()
}

#[test]
fn test_markdown_article() {
    let markdown = to_markdown(&article(), &RenderOptions::default()).unwrap();

    let expected = [
        "# Version 2",
        "",
        "This release adds **tables** and [links](https://example.com/links).",
        "",
        "- Faster parsing",
        "- Nested lists",
        "  1. first",
        "  2. second",
        "",
        "> Quoted text",
        "",
        "```",
        "let x = 1;",
        "```",
        "",
        "| Name | Value |",
        "| --- | --- |",
        "| depth | 512 |",
        "",
        "---",
        "",
        "![](https://example.com/chart.png)",
    ]
    .join("\n");
    assert_eq!(markdown, expected);
}

#[test]
fn test_markdown_frontmatter() {
    let options = RenderOptions::new().with_frontmatter(true);
    let markdown = to_markdown(&article(), &options).unwrap();
    assert!(markdown.starts_with("---\ntitle: \"Release Notes\"\n\"author\": \"Docs Team\"\n---\n\n# Version 2"));
}

#[test]
fn test_text_output() {
    let text = to_text(&article(), &RenderOptions::default()).unwrap();
    assert!(text.starts_with("Version 2\n\nThis release adds tables and links."));
    assert!(text.contains("Name\tValue\ndepth\t512"));
}

#[test]
fn test_json_output_shape() {
    let json = to_json(&article(), JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["title"], "Release Notes");
    assert_eq!(value["metadata"]["author"], "Docs Team");

    let kinds: Vec<&str> = value["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|block| block["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading_1",
            "paragraph",
            "bulleted_list_item",
            "bulleted_list_item",
            "quote",
            "code",
            "table",
            "divider",
            "image",
        ]
    );

    let table = &value["content"][6];
    assert_eq!(table["has_column_header"], true);
    assert_eq!(table["rows"][1]["cells"][1]["content"], "512");

    let image = &value["content"][8];
    assert_eq!(image["source"]["type"], "external");
    assert_eq!(image["source"]["url"], "https://example.com/chart.png");
}

#[test]
fn test_uploaded_image_uses_prefix() {
    let mut sink = MemorySink::new();
    let doc = HtmlParser::from_html(r#"<img src="data:image/png;base64,AAAA">"#)
        .parse_with_sink(&mut sink)
        .unwrap();

    let options = RenderOptions::new().with_image_prefix("assets/");
    let markdown = to_markdown(&doc, &options).unwrap();
    assert_eq!(markdown, "![](assets/resource://image1)");

    let json = to_json(&doc, JsonFormat::Compact).unwrap();
    assert!(json.contains(r#""type":"uploaded""#));
    assert!(json.contains(r#""media_type":"image/png""#));
}

#[test]
fn test_builder_round_trip() {
    let result = Unhtml::new()
        .with_frontmatter()
        .parse_str("<title>T</title><h3>Small</h3><p><s>old</s> <u>new</u></p>")
        .unwrap();

    let markdown = result.to_markdown().unwrap();
    assert!(markdown.ends_with("### Small\n\n~~old~~ <u>new</u>"));
    assert_eq!(result.plain_text(), "Small\n\nold new");
    assert_eq!(result.document().title.as_deref(), Some("T"));
}
