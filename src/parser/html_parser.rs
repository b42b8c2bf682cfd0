//! HTML document parser using scraper.

use std::io::Read;
use std::path::Path;

use scraper::Html;

use crate::detect::decode_bytes;
use crate::error::Result;
use crate::model::Document;

use super::blob::BlobSink;
use super::options::ParseOptions;
use super::walker::Walker;

/// HTML document parser.
pub struct HtmlParser {
    source: String,
    options: ParseOptions,
}

impl HtmlParser {
    /// Parse HTML from a string.
    pub fn from_html(html: impl Into<String>) -> Self {
        Self::from_html_with_options(html, ParseOptions::default())
    }

    /// Parse HTML from a string with custom options.
    pub fn from_html_with_options(html: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            source: html.into(),
            options,
        }
    }

    /// Open an HTML file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an HTML file with custom options.
    ///
    /// The path becomes the source name unless the options already set one.
    pub fn open_with_options<P: AsRef<Path>>(path: P, mut options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        let data = std::fs::read(path)?;
        log::debug!("opening {} ({} bytes)", path.display(), data.len());

        if options.source_name.is_none() {
            options.source_name = Some(path.to_string_lossy().into_owned());
        }
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse HTML from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse HTML from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let source = decode_bytes(data)?;
        Ok(Self::from_html_with_options(source, options))
    }

    /// Parse HTML from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse HTML from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Options this parser was created with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse the document and return a structured Document.
    ///
    /// Embedded `data:` images are decoded and discarded.
    pub fn parse(&self) -> Result<Document> {
        self.run(None)
    }

    /// Parse the document, handing embedded `data:` images to `sink`.
    pub fn parse_with_sink(&self, sink: &mut dyn BlobSink) -> Result<Document> {
        self.run(Some(sink))
    }

    fn run(&self, sink: Option<&mut dyn BlobSink>) -> Result<Document> {
        let html = Html::parse_document(&self.source);
        for error in &html.errors {
            log::debug!("recovered from malformed markup: {}", error);
        }

        let document = Walker::new(&self.options, sink).walk(html.root_element())?;
        log::debug!(
            "parsed {} top-level blocks (title: {:?})",
            document.block_count(),
            document.title
        );
        Ok(document)
    }
}
