//! Recursive element dispatch.
//!
//! One [`Walker`] converts one document. It owns the style state, the
//! document-level fields found while walking (title, metadata, base URL) and
//! a queue of blocks that had to be lifted out of a parent unable to own them.

use std::collections::BTreeMap;
use std::path::Path;

use scraper::node::Node;
use scraper::ElementRef;

use super::blob::{decode_data_uri, is_data_uri, BlobSink};
use super::inline::process_text;
use super::options::{ErrorMode, ParseOptions, UnknownTagPolicy};
use super::style::StyleState;
use super::tag::{is_raw_text, Tag};
use crate::error::{Error, Result};
use crate::model::{Block, BlockContainer, Document, Image, ListItem, Table, TableRow};
use crate::normalize::normalize;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Converts a parsed element tree into blocks.
pub(crate) struct Walker<'a, 's> {
    options: &'a ParseOptions,
    sink: Option<&'s mut dyn BlobSink>,
    style: StyleState,
    title: Option<String>,
    metadata: BTreeMap<String, String>,
    base_url: Option<String>,
    hoisted: Vec<Block>,
    depth: usize,
}

impl<'a, 's> Walker<'a, 's> {
    pub(crate) fn new(options: &'a ParseOptions, sink: Option<&'s mut dyn BlobSink>) -> Self {
        let title = options.source_name.as_deref().and_then(|name| {
            Path::new(name)
                .file_name()
                .map(|base| base.to_string_lossy().into_owned())
        });

        Self {
            options,
            sink,
            style: StyleState::new(options.style_policy),
            title,
            metadata: BTreeMap::new(),
            base_url: options.base_url.clone(),
            hoisted: Vec::new(),
            depth: 0,
        }
    }

    /// Walk `root` and assemble the document.
    pub(crate) fn walk(mut self, root: ElementRef<'_>) -> Result<Document> {
        let mut content: Vec<Block> = Vec::new();
        self.render(root, &mut content)?;
        content.append(&mut self.hoisted);

        Ok(Document {
            title: self.title,
            metadata: self.metadata,
            base_url: self.base_url,
            content,
        })
    }

    /// Dispatch one element to its handler.
    pub(crate) fn render(
        &mut self,
        element: ElementRef<'_>,
        parent: &mut dyn BlockContainer,
    ) -> Result<()> {
        let name = element.value().name();

        if &*element.value().name.ns != HTML_NAMESPACE {
            log::debug!("skipping foreign element <{}>", name);
            return Ok(());
        }

        if self.depth >= self.options.max_depth {
            return self.isolate(Error::DepthLimitExceeded(self.options.max_depth), name);
        }

        self.depth += 1;
        let result = self.dispatch(element, parent);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, element: ElementRef<'_>, parent: &mut dyn BlockContainer) -> Result<()> {
        let name = element.value().name();
        let Some(tag) = Tag::from_name(name) else {
            return self.render_unknown(element, parent);
        };
        log::debug!("rendering element - {} :: {:?}", name, tag);

        match tag {
            Tag::Passthrough => self.process_contents(element, parent),

            Tag::Title => {
                self.title = gather_text(element);
                Ok(())
            }

            Tag::Meta => {
                let attrs = element.value();
                match (attrs.attr("name"), attrs.attr("content")) {
                    (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => {
                        self.metadata.insert(key.to_string(), value.to_string());
                    }
                    _ => {}
                }
                Ok(())
            }

            Tag::Base => {
                if let Some(href) = element.value().attr("href") {
                    self.base_url = Some(href.to_string());
                }
                Ok(())
            }

            Tag::Paragraph | Tag::DefinitionList => {
                self.render_block(Block::paragraph(), element, parent)
            }
            Tag::Heading(level) if level > 3 && !self.options.clamp_minor_headings => {
                self.render_unknown(element, parent)
            }
            Tag::Heading(level) => self.render_block(Block::heading(level), element, parent),
            Tag::Blockquote => self.render_block(Block::quote(), element, parent),
            Tag::Preformatted => self.render_block(Block::code(), element, parent),

            Tag::Rule => {
                self.attach(parent, Block::Divider);
                Ok(())
            }

            Tag::LineBreak => {
                if let Some(text) = parent.rich_text_mut() {
                    text.push_line_break();
                }
                Ok(())
            }

            Tag::Image => self.render_image(element, parent),

            Tag::Frame => {
                if let Some(src) = element.value().attr("src") {
                    self.attach(parent, Block::embed(src));
                }
                Ok(())
            }

            Tag::Anchor => {
                self.style.enter_link(element.value().attr("href"));
                let result = self.process_contents(element, parent);
                self.style.exit_link();
                result
            }

            Tag::Inline(style) => {
                self.style.enter(style);
                let result = self.process_contents(element, parent);
                self.style.exit(style);
                result
            }

            Tag::UnorderedList => self.render_list(element, parent, Block::BulletedListItem),
            Tag::OrderedList => self.render_list(element, parent, Block::NumberedListItem),

            Tag::Table => self.render_block(Block::Table(Table::new()), element, parent),

            Tag::TableHead => {
                if let Some(table) = parent.table_mut() {
                    table.has_column_header = true;
                }
                self.process_contents(element, parent)
            }

            Tag::TableRow => {
                let mut row = Block::TableRow(TableRow::new());
                let mark = self.hoisted.len();
                for cell in child_elements(element).filter(|c| c.value().name() == "td") {
                    self.render(cell, &mut row)?;
                }
                self.attach(parent, row);
                self.release_hoisted(parent, mark);
                Ok(())
            }

            Tag::TableCell => {
                if has_leading_text(element) {
                    self.process_contents(element, parent)
                } else {
                    process_text(" ", parent, &self.style);
                    Ok(())
                }
            }
        }
    }

    /// Process the text and child elements of `element` against `parent`, in
    /// document order.
    pub(crate) fn process_contents(
        &mut self,
        element: ElementRef<'_>,
        parent: &mut dyn BlockContainer,
    ) -> Result<()> {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => process_text(&text.text, parent, &self.style),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.render(child, parent)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Fill `block` from the element's contents and attach it to `parent`,
    /// followed by anything its descendants could not place inside it.
    fn render_block(
        &mut self,
        mut block: Block,
        element: ElementRef<'_>,
        parent: &mut dyn BlockContainer,
    ) -> Result<()> {
        let mark = self.hoisted.len();
        self.process_contents(element, &mut block)?;

        if matches!(&block, Block::Table(table) if table.width() == 0) {
            log::debug!("dropping empty table");
        } else {
            self.attach(parent, block);
        }

        self.release_hoisted(parent, mark);
        Ok(())
    }

    fn render_list(
        &mut self,
        element: ElementRef<'_>,
        parent: &mut dyn BlockContainer,
        make_item: fn(ListItem) -> Block,
    ) -> Result<()> {
        for li in child_elements(element).filter(|c| c.value().name() == "li") {
            self.render_block(make_item(ListItem::new()), li, parent)?;
        }
        Ok(())
    }

    fn render_image(&mut self, element: ElementRef<'_>, parent: &mut dyn BlockContainer) -> Result<()> {
        let Some(src) = element.value().attr("src") else {
            return Ok(());
        };

        if !is_data_uri(src) {
            self.attach(parent, Block::image(src));
            return Ok(());
        }

        match self.store_embedded(src) {
            Ok(Some(image)) => {
                self.attach(parent, Block::Image(image));
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => self.isolate(e, "img"),
        }
    }

    fn store_embedded(&mut self, src: &str) -> Result<Option<Image>> {
        let embedded = decode_data_uri(src)?;

        let Some(sink) = self.sink.as_deref_mut() else {
            log::debug!(
                "no blob sink; dropping embedded {} ({} bytes)",
                embedded.media_type,
                embedded.data.len()
            );
            return Ok(None);
        };

        let reference = sink.store(embedded.data, &embedded.media_type)?;
        Ok(Some(Image::uploaded(reference, embedded.media_type)))
    }

    fn render_unknown(&mut self, element: ElementRef<'_>, parent: &mut dyn BlockContainer) -> Result<()> {
        let name = element.value().name();
        match self.options.unknown_tags {
            UnknownTagPolicy::Descend if !is_raw_text(name) => {
                log::debug!("descending into unknown element <{}>", name);
                self.process_contents(element, parent)
            }
            _ => {
                log::debug!("no handler for <{}>; dropping subtree", name);
                Ok(())
            }
        }
    }

    /// Append `block` to `parent`.
    ///
    /// A text-bearing parent that cannot own the block absorbs the runs of a
    /// plain text block, separated by a line break. Anything else is queued
    /// and placed after the nearest enclosing block.
    fn attach(&mut self, parent: &mut dyn BlockContainer, block: Block) {
        let Err(block) = parent.append_block(block) else {
            return;
        };

        let mergeable = block.is_text_bearing() && block.children().is_empty() && !is_list_item(&block);
        let verbatim = parent.preserves_whitespace();
        match parent.rich_text_mut() {
            Some(text) if mergeable => {
                if let Some(runs) = block.into_rich_text() {
                    if !text.has_content() && !verbatim {
                        // indentation before the first block carries no text
                        *text = runs;
                    } else {
                        if text.has_content() && runs.has_content() {
                            text.push_line_break();
                        }
                        text.extend(runs);
                    }
                }
            }
            _ => {
                log::debug!("lifting {} block out of its parent", block.kind());
                self.hoisted.push(block);
            }
        }
    }

    fn release_hoisted(&mut self, parent: &mut dyn BlockContainer, mark: usize) {
        if self.hoisted.len() <= mark {
            return;
        }
        for block in self.hoisted.split_off(mark) {
            self.attach(parent, block);
        }
    }

    /// Apply the error mode to a failure raised while converting `element`.
    ///
    /// Only element-local failures can be skipped; anything else propagates.
    fn isolate(&self, error: Error, element: &str) -> Result<()> {
        match self.options.error_mode {
            ErrorMode::Strict => Err(error),
            ErrorMode::Lenient if !error.is_element_local() => Err(error),
            ErrorMode::Lenient => {
                log::warn!("skipping <{}>: {}", element, error);
                Ok(())
            }
        }
    }
}

fn is_list_item(block: &Block) -> bool {
    matches!(block, Block::BulletedListItem(_) | Block::NumberedListItem(_))
}

fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.children().filter_map(ElementRef::wrap)
}

/// All descendant text of `element`, normalized.
pub(crate) fn gather_text(element: ElementRef<'_>) -> Option<String> {
    let text: String = element.text().collect();
    normalize(&text)
}

/// Whether `element` has non-empty text before its first child node that is
/// not text.
fn has_leading_text(element: ElementRef<'_>) -> bool {
    for child in element.children() {
        match child.value() {
            Node::Text(text) if !text.text.is_empty() => return true,
            Node::Text(_) => {}
            _ => return false,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn walk(html: &str) -> Document {
        let options = ParseOptions::default();
        let doc = Html::parse_document(html);
        Walker::new(&options, None).walk(doc.root_element()).unwrap()
    }

    #[test]
    fn test_gather_text_normalizes() {
        let doc = Html::parse_document("<title>  A\n <b>B</b>  </title>");
        let title = doc
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "title")
            .unwrap();
        assert_eq!(gather_text(title).as_deref(), Some("A B"));
    }

    #[test]
    fn test_image_in_paragraph_is_lifted_after_it() {
        let doc = walk("<p>before<img src='http://x/a.png'>after</p>");
        assert_eq!(doc.content.len(), 2);
        assert_eq!(doc.content[0].plain_text(), "beforeafter");
        assert!(matches!(doc.content[1], Block::Image(_)));
    }

    #[test]
    fn test_paragraph_in_quote_is_merged() {
        let doc = walk("<blockquote>intro<p>body</p></blockquote>");
        assert_eq!(doc.content.len(), 1);
        assert_eq!(doc.content[0].kind(), "quote");
        assert_eq!(doc.content[0].plain_text(), "intro\nbody");
    }

    #[test]
    fn test_source_name_basename_is_initial_title() {
        let options = ParseOptions::default().with_source_name("docs/guide/page.html");
        let html = Html::parse_document("<p>x</p>");
        let doc = Walker::new(&options, None).walk(html.root_element()).unwrap();
        assert_eq!(doc.title.as_deref(), Some("page.html"));
    }

    #[test]
    fn test_leading_text_detection() {
        let doc = walk("<table><tr><td><b>x</b></td><td>y</td></tr></table>");
        let Block::Table(table) = &doc.content[0] else {
            panic!("expected table");
        };
        assert_eq!(table.rows[0].cells[0].content, " ");
        assert_eq!(table.rows[0].cells[1].content, "y");
    }
}
