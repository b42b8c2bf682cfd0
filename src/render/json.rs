//! JSON rendering for converted documents.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, ListItem, RichText, TextRun};

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.title = Some("Test".to_string());
        doc.add_block(Block::Paragraph {
            text: RichText::from(vec![TextRun::bold("Hello")]),
        });
        doc.add_block(Block::BulletedListItem(ListItem {
            text: RichText::plain("item"),
            children: vec![Block::Divider],
        }));
        doc
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Test\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_blocks_tagged_by_type() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let content = value["content"].as_array().unwrap();
        assert_eq!(content[0]["type"], "paragraph");
        assert_eq!(content[0]["text"][0]["content"], "Hello");
        assert_eq!(content[0]["text"][0]["annotations"]["bold"], true);
        assert_eq!(content[1]["type"], "bulleted_list_item");
        assert_eq!(content[1]["children"][0]["type"], "divider");
    }

    #[test]
    fn test_json_round_trips() {
        let doc = sample();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
