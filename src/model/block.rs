//! Block-level content types.

use super::{RichText, Table, TableRow};
use serde::{Deserialize, Serialize};

/// One structural unit of document content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text
    Paragraph {
        /// Text runs
        text: RichText,
    },

    /// A level 1 heading
    #[serde(rename = "heading_1")]
    Heading1 {
        /// Text runs
        text: RichText,
    },

    /// A level 2 heading
    #[serde(rename = "heading_2")]
    Heading2 {
        /// Text runs
        text: RichText,
    },

    /// A level 3 heading
    #[serde(rename = "heading_3")]
    Heading3 {
        /// Text runs
        text: RichText,
    },

    /// A block quotation
    Quote {
        /// Text runs
        text: RichText,
    },

    /// Preformatted code; whitespace is kept verbatim
    Code {
        /// Text runs
        text: RichText,
    },

    /// A horizontal rule / separator
    Divider,

    /// An unordered list item
    BulletedListItem(ListItem),

    /// An ordered list item
    NumberedListItem(ListItem),

    /// A table
    Table(Table),

    /// A table row outside of any table
    TableRow(TableRow),

    /// An image reference
    Image(Image),

    /// An embedded external page
    Embed(Embed),
}

impl Block {
    /// Create an empty paragraph.
    pub fn paragraph() -> Self {
        Block::Paragraph {
            text: RichText::new(),
        }
    }

    /// Create an empty heading; levels outside 1-3 are clamped.
    pub fn heading(level: u8) -> Self {
        let text = RichText::new();
        match level.clamp(1, 3) {
            1 => Block::Heading1 { text },
            2 => Block::Heading2 { text },
            _ => Block::Heading3 { text },
        }
    }

    /// Create an empty quote.
    pub fn quote() -> Self {
        Block::Quote {
            text: RichText::new(),
        }
    }

    /// Create an empty code block.
    pub fn code() -> Self {
        Block::Code {
            text: RichText::new(),
        }
    }

    /// Create an image block referencing an external URL.
    pub fn image(url: impl Into<String>) -> Self {
        Block::Image(Image::external(url))
    }

    /// Create an embed block.
    pub fn embed(url: impl Into<String>) -> Self {
        Block::Embed(Embed { url: url.into() })
    }

    /// The text runs of a text-bearing block (list items included).
    pub fn rich_text(&self) -> Option<&RichText> {
        match self {
            Block::Paragraph { text }
            | Block::Heading1 { text }
            | Block::Heading2 { text }
            | Block::Heading3 { text }
            | Block::Quote { text }
            | Block::Code { text } => Some(text),
            Block::BulletedListItem(item) | Block::NumberedListItem(item) => Some(&item.text),
            _ => None,
        }
    }

    fn rich_text_mut_inner(&mut self) -> Option<&mut RichText> {
        match self {
            Block::Paragraph { text }
            | Block::Heading1 { text }
            | Block::Heading2 { text }
            | Block::Heading3 { text }
            | Block::Quote { text }
            | Block::Code { text } => Some(text),
            Block::BulletedListItem(item) | Block::NumberedListItem(item) => Some(&mut item.text),
            _ => None,
        }
    }

    /// Nested child blocks (only list items own children).
    pub fn children(&self) -> &[Block] {
        match self {
            Block::BulletedListItem(item) | Block::NumberedListItem(item) => &item.children,
            _ => &[],
        }
    }

    /// Consume the block and return its text runs, if it bears text.
    pub fn into_rich_text(self) -> Option<RichText> {
        match self {
            Block::Paragraph { text }
            | Block::Heading1 { text }
            | Block::Heading2 { text }
            | Block::Heading3 { text }
            | Block::Quote { text }
            | Block::Code { text } => Some(text),
            Block::BulletedListItem(item) | Block::NumberedListItem(item) => Some(item.text),
            _ => None,
        }
    }

    /// Check if this block carries text runs.
    pub fn is_text_bearing(&self) -> bool {
        self.rich_text().is_some()
    }

    /// Heading level (1-3) or None.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading1 { .. } => Some(1),
            Block::Heading2 { .. } => Some(2),
            Block::Heading3 { .. } => Some(3),
            _ => None,
        }
    }

    /// Block type name as used in serialized output.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::Heading1 { .. } => "heading_1",
            Block::Heading2 { .. } => "heading_2",
            Block::Heading3 { .. } => "heading_3",
            Block::Quote { .. } => "quote",
            Block::Code { .. } => "code",
            Block::Divider => "divider",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::Image(_) => "image",
            Block::Embed(_) => "embed",
        }
    }

    /// Get plain text content of the block, including nested children.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Table(t) => t.plain_text(),
            Block::TableRow(r) => r.plain_text(),
            Block::BulletedListItem(item) | Block::NumberedListItem(item) => item.plain_text(),
            _ => self.rich_text().map(RichText::plain_text).unwrap_or_default(),
        }
    }
}

/// A list item: text runs plus nested blocks from the item's children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Text directly inside the item
    pub text: RichText,

    /// Nested blocks (paragraphs, sub-lists, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl ListItem {
    /// Create an empty list item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get plain text of the item and its children.
    pub fn plain_text(&self) -> String {
        let mut parts = vec![self.text.plain_text()];
        parts.extend(self.children.iter().map(Block::plain_text));
        parts.retain(|p| !p.is_empty());
        parts.join("\n")
    }
}

/// An image block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Where the image data lives
    pub source: ImageSource,
}

impl Image {
    /// Create an image referencing an external URL.
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            source: ImageSource::External { url: url.into() },
        }
    }

    /// Create an image referencing a stored upload.
    pub fn uploaded(reference: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            source: ImageSource::Uploaded {
                reference: reference.into(),
                media_type: media_type.into(),
            },
        }
    }

    /// The URL or reference of the image.
    pub fn url(&self) -> &str {
        match &self.source {
            ImageSource::External { url } => url,
            ImageSource::Uploaded { reference, .. } => reference,
        }
    }
}

/// Image data location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageSource {
    /// A file hosted elsewhere, referenced by URL
    External {
        /// Image URL
        url: String,
    },

    /// An embedded image handed to a blob sink
    Uploaded {
        /// Reference returned by the sink
        reference: String,
        /// Media type of the stored bytes
        media_type: String,
    },
}

/// An embed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    /// Embedded page URL
    pub url: String,
}

/// Construction-time capabilities of anything blocks are attached to.
///
/// Containers expose only what they support; the default for every optional
/// capability is "not supported".
pub trait BlockContainer {
    /// Attach a completed block. A container that cannot own the block hands
    /// it back.
    fn append_block(&mut self, block: Block) -> Result<(), Block>;

    /// Run container for inline text, if this container bears text.
    fn rich_text_mut(&mut self) -> Option<&mut RichText> {
        None
    }

    /// Row accepting cell values, if this container is a table row.
    fn table_row_mut(&mut self) -> Option<&mut TableRow> {
        None
    }

    /// Owning table, if this container is a table.
    fn table_mut(&mut self) -> Option<&mut Table> {
        None
    }

    /// Whether inline text is kept verbatim (no whitespace collapsing).
    fn preserves_whitespace(&self) -> bool {
        false
    }
}

impl BlockContainer for Vec<Block> {
    fn append_block(&mut self, block: Block) -> Result<(), Block> {
        self.push(block);
        Ok(())
    }
}

impl BlockContainer for Block {
    fn append_block(&mut self, block: Block) -> Result<(), Block> {
        match (self, block) {
            (Block::BulletedListItem(item) | Block::NumberedListItem(item), block) => {
                item.children.push(block);
                Ok(())
            }
            (Block::Table(table), Block::TableRow(row)) => {
                table.add_row(row);
                Ok(())
            }
            (_, block) => Err(block),
        }
    }

    fn rich_text_mut(&mut self) -> Option<&mut RichText> {
        self.rich_text_mut_inner()
    }

    fn table_row_mut(&mut self) -> Option<&mut TableRow> {
        match self {
            Block::TableRow(row) => Some(row),
            _ => None,
        }
    }

    fn table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Block::Table(table) => Some(table),
            _ => None,
        }
    }

    fn preserves_whitespace(&self) -> bool {
        matches!(self, Block::Code { .. })
    }
}
