//! Document-level types.

use super::Block;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A converted HTML document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document title (source name or `<title>`)
    pub title: Option<String>,

    /// Head metadata (`<meta name=... content=...>`)
    pub metadata: BTreeMap<String, String>,

    /// Base URL captured from the options or a `<base href>` element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Content blocks in document order
    pub content: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: Block) {
        self.content.push(block);
    }

    /// Get the number of top-level blocks.
    pub fn block_count(&self) -> usize {
        self.content.len()
    }

    /// Check if the document has no content blocks.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(Block::plain_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Count blocks by kind, descending into list item children.
    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats::default();
        for block in &self.content {
            stats.count(block);
        }
        stats
    }

    /// Convert title and metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        for (key, value) in &self.metadata {
            lines.push(format!("\"{}\": \"{}\"", escape_yaml(key), escape_yaml(value)));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Block counts for a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Paragraphs, quotes and code blocks
    pub paragraph_count: u32,

    /// Headings of any level
    pub heading_count: u32,

    /// Bulleted and numbered list items
    pub list_item_count: u32,

    /// Tables
    pub table_count: u32,

    /// Images
    pub image_count: u32,

    /// Embeds
    pub embed_count: u32,

    /// Dividers
    pub divider_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,
}

impl DocumentStats {
    fn count(&mut self, block: &Block) {
        match block {
            Block::Paragraph { .. } | Block::Quote { .. } | Block::Code { .. } => {
                self.paragraph_count += 1
            }
            Block::Heading1 { .. } | Block::Heading2 { .. } | Block::Heading3 { .. } => {
                self.heading_count += 1
            }
            Block::BulletedListItem(_) | Block::NumberedListItem(_) => self.list_item_count += 1,
            Block::Table(_) => self.table_count += 1,
            Block::Image(_) => self.image_count += 1,
            Block::Embed(_) => self.embed_count += 1,
            Block::Divider => self.divider_count += 1,
            Block::TableRow(_) => {}
        }

        if let Some(text) = block.rich_text() {
            self.word_count += text.plain_text().split_whitespace().count() as u32;
        }
        for child in block.children() {
            self.count(child);
        }
    }
}
