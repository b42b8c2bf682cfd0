//! Plain text rendering for converted documents.

use crate::error::Result;
use crate::model::Document;

use super::RenderOptions;

/// Convert a document to plain text.
///
/// Blocks are separated by blank lines. Line breaks inside blocks are kept
/// unless `preserve_line_breaks` is off, in which case they become spaces.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut output = doc.plain_text();

    if !options.preserve_line_breaks {
        output = output
            .split("\n\n")
            .map(|block| block.replace('\n', " "))
            .collect::<Vec<_>>()
            .join("\n\n");
    }

    Ok(output.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, RichText};

    fn doc_with(texts: &[&str]) -> Document {
        let mut doc = Document::new();
        for text in texts {
            doc.add_block(Block::Paragraph {
                text: RichText::plain(*text),
            });
        }
        doc
    }

    #[test]
    fn test_to_text() {
        let doc = doc_with(&["Hello, world!", "Second paragraph."]);
        let result = to_text(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(result, "Hello, world!\n\nSecond paragraph.");
    }

    #[test]
    fn test_line_breaks_flattened() {
        let doc = doc_with(&["a\nb", "c"]);
        let options = RenderOptions::new().with_line_breaks(false);
        assert_eq!(to_text(&doc, &options).unwrap(), "a b\n\nc");
    }
}
