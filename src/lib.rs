//! # unhtml
//!
//! HTML to structured block content conversion for Rust.
//!
//! This library walks an HTML document and produces a tree of typed content
//! blocks (paragraphs, headings, lists, tables, quotes, code, images, embeds)
//! carrying styled text runs, along with the document title and head
//! metadata. Documents can be rendered to Markdown, plain text and JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unhtml::{parse_file, render};
//!
//! fn main() -> unhtml::Result<()> {
//!     // Parse an HTML file
//!     let doc = parse_file("page.html")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Block model**: headings, paragraphs, quotes, code, nested lists, tables
//! - **Inline styles**: bold, italic, strikethrough, underline, code and links
//! - **Embedded images**: `data:` URIs decoded into a pluggable [`BlobSink`]
//! - **Forgiving input**: malformed markup is repaired, never rejected
//! - **Parallel processing**: Uses Rayon for batches of documents

pub mod detect;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, HtmlFormat, TextEncoding};
pub use error::{Error, Result};
pub use model::{
    Annotations, Block, BlockContainer, Document, DocumentStats, Embed, Image, ImageSource,
    ListItem, Resource, RichText, Table, TableRow, TextRun,
};
pub use parser::{
    BlobSink, DirectorySink, ErrorMode, HtmlParser, MemorySink, ParseOptions, StylePolicy,
    UnknownTagPolicy,
};
pub use render::{JsonFormat, RenderOptions, TableFallback};

use std::io::Read;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

/// Parse an HTML string and return a structured document.
///
/// # Example
///
/// ```
/// use unhtml::parse_str;
///
/// let doc = parse_str("<h1>Title</h1><p>Hello <b>world</b></p>").unwrap();
/// assert_eq!(doc.block_count(), 2);
/// ```
pub fn parse_str(html: &str) -> Result<Document> {
    HtmlParser::from_html(html).parse()
}

/// Parse an HTML string with custom options.
pub fn parse_str_with_options(html: &str, options: ParseOptions) -> Result<Document> {
    HtmlParser::from_html_with_options(html, options).parse()
}

/// Parse an HTML file and return a structured document.
///
/// The file name becomes the initial document title.
///
/// # Example
///
/// ```no_run
/// use unhtml::parse_file;
///
/// let doc = parse_file("page.html").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = HtmlParser::open(path)?;
    parser.parse()
}

/// Parse an HTML file with custom options.
///
/// # Example
///
/// ```no_run
/// use unhtml::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new()
///     .strict()
///     .with_base_url("https://example.com/");
/// let doc = parse_file_with_options("page.html", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = HtmlParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse HTML from bytes.
///
/// UTF-8 (with or without BOM) and UTF-16 with BOM are accepted; binary
/// data is rejected.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = HtmlParser::from_bytes(data)?;
    parser.parse()
}

/// Parse HTML from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let parser = HtmlParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse HTML from a reader.
///
/// # Example
///
/// ```no_run
/// use unhtml::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("page.html").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = HtmlParser::from_reader(reader)?;
    parser.parse()
}

/// Parse HTML from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Document> {
    let parser = HtmlParser::from_reader_with_options(reader, options)?;
    parser.parse()
}

/// Parse many HTML files in parallel.
///
/// Each file gets its own parser and style state; results are returned in
/// input order, one per path.
pub fn parse_files<P>(paths: &[P], options: &ParseOptions) -> Vec<(PathBuf, Result<Document>)>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let result = parse_file_with_options(path, options.clone());
            if let Err(ref e) = result {
                log::warn!("failed to convert {}: {}", path.display(), e);
            }
            (path.to_path_buf(), result)
        })
        .collect()
}

/// Extract plain text from an HTML file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(doc.plain_text())
}

/// Convert an HTML file to Markdown.
///
/// # Example
///
/// ```no_run
/// use unhtml::to_markdown;
///
/// let markdown = to_markdown("page.html").unwrap();
/// std::fs::write("page.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    let options = RenderOptions::default();
    render::to_markdown(&doc, &options)
}

/// Convert an HTML file to Markdown with custom options.
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_markdown(&doc, options)
}

/// Convert an HTML file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_text(&doc, options)
}

/// Convert an HTML file to JSON.
///
/// # Example
///
/// ```no_run
/// use unhtml::{to_json, JsonFormat};
///
/// let json = to_json("page.html", JsonFormat::Pretty).unwrap();
/// std::fs::write("page.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and converting HTML documents.
///
/// # Example
///
/// ```no_run
/// use unhtml::Unhtml;
///
/// let markdown = Unhtml::new()
///     .strict()
///     .with_frontmatter()
///     .with_base_url("https://example.com/")
///     .parse("page.html")?
///     .to_markdown()?;
/// # Ok::<(), unhtml::Error>(())
/// ```
pub struct Unhtml {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Unhtml {
    /// Create a new Unhtml builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Abort on the first element that fails to convert.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Skip elements that fail to convert (the default).
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set how nested style elements combine.
    pub fn with_style_policy(mut self, policy: StylePolicy) -> Self {
        self.parse_options = self.parse_options.with_style_policy(policy);
        self
    }

    /// Set what happens to elements without a handler.
    pub fn with_unknown_tags(mut self, policy: UnknownTagPolicy) -> Self {
        self.parse_options = self.parse_options.with_unknown_tags(policy);
        self
    }

    /// Set the initial base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_base_url(url);
        self
    }

    /// Set the maximum element nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.parse_options = self.parse_options.with_max_depth(depth);
        self
    }

    /// Convert `<h4>`..`<h6>` to level-3 headings.
    pub fn with_clamped_headings(mut self) -> Self {
        self.parse_options = self.parse_options.with_clamped_headings(true);
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Set table fallback mode.
    pub fn with_table_fallback(mut self, fallback: TableFallback) -> Self {
        self.render_options = self.render_options.with_table_fallback(fallback);
        self
    }

    /// Parse an HTML file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnhtmlResult> {
        let parser = HtmlParser::open_with_options(path, self.parse_options)?;
        let document = parser.parse()?;
        Ok(UnhtmlResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse an HTML string.
    pub fn parse_str(self, html: &str) -> Result<UnhtmlResult> {
        let parser = HtmlParser::from_html_with_options(html, self.parse_options);
        let document = parser.parse()?;
        Ok(UnhtmlResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse HTML from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UnhtmlResult> {
        let parser = HtmlParser::from_bytes_with_options(data, self.parse_options)?;
        let document = parser.parse()?;
        Ok(UnhtmlResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Unhtml {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing an HTML document.
pub struct UnhtmlResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl UnhtmlResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get plain text.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unhtml_builder() {
        let builder = Unhtml::new()
            .strict()
            .with_frontmatter()
            .with_style_policy(StylePolicy::Toggle);

        assert_eq!(builder.parse_options.error_mode, ErrorMode::Strict);
        assert_eq!(builder.parse_options.style_policy, StylePolicy::Toggle);
        assert!(builder.render_options.include_frontmatter);
    }

    #[test]
    fn test_unhtml_builder_default() {
        let builder = Unhtml::default();
        assert_eq!(builder.parse_options.error_mode, ErrorMode::Lenient);
        assert!(!builder.render_options.include_frontmatter);
    }

    #[test]
    fn test_unhtml_builder_chained() {
        let builder = Unhtml::new()
            .with_unknown_tags(UnknownTagPolicy::Descend)
            .with_base_url("http://example.com/")
            .with_max_depth(16)
            .with_table_fallback(TableFallback::Html);

        assert_eq!(builder.parse_options.unknown_tags, UnknownTagPolicy::Descend);
        assert_eq!(
            builder.parse_options.base_url.as_deref(),
            Some("http://example.com/")
        );
        assert_eq!(builder.parse_options.max_depth, 16);
        assert_eq!(builder.render_options.table_fallback, TableFallback::Html);
    }

    #[test]
    fn test_parse_bytes_empty_data() {
        let doc = parse_bytes(&[]).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.title, None);
    }

    #[test]
    fn test_parse_bytes_binary() {
        let data = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(matches!(parse_bytes(&data), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_parse_bytes_invalid_utf8_keeps_document() {
        let doc = parse_bytes(b"<p>caf\xe9 au lait</p><p>second</p>").unwrap();
        assert_eq!(doc.block_count(), 2);
        assert!(doc.content[0].plain_text().starts_with("caf"));
        assert_eq!(doc.content[1].plain_text(), "second");
    }

    #[test]
    fn test_builder_parse_str_to_markdown() {
        let markdown = Unhtml::new()
            .parse_str("<h2>Intro</h2><p>Some <i>text</i></p>")
            .unwrap()
            .to_markdown()
            .unwrap();
        assert_eq!(markdown, "## Intro\n\nSome *text*");
    }

    #[test]
    fn test_json_format_variants() {
        let result = Unhtml::new().parse_str("<p>x</p>").unwrap();
        assert!(result.to_json(JsonFormat::Pretty).unwrap().contains('\n'));
        assert!(!result.to_json(JsonFormat::Compact).unwrap().contains('\n'));
    }
}
