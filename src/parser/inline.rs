//! Conversion of text nodes into styled runs.

use super::style::StyleState;
use crate::model::{BlockContainer, TextRun};
use crate::normalize::condense;

/// Attach `text` to `parent` as a run carrying the current style and link.
///
/// Text-bearing parents merge the run into their trailing run when formats
/// match; table rows take it as a new cell; every other parent ignores it.
/// Whitespace is collapsed except inside code blocks.
pub fn process_text(text: &str, parent: &mut dyn BlockContainer, style: &StyleState) {
    let content = if parent.preserves_whitespace() {
        Some(text.to_string()).filter(|t| !t.is_empty())
    } else {
        condense(text)
    };
    let Some(content) = content else {
        return;
    };

    let run = TextRun {
        content,
        annotations: style.annotations(),
        link: style.link().map(str::to_string),
    };

    if let Some(runs) = parent.rich_text_mut() {
        runs.append(run);
    } else if let Some(row) = parent.table_row_mut() {
        row.add_cell(run);
    }
}
