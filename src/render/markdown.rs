//! Markdown rendering for converted documents.

use crate::error::Result;
use crate::model::{Block, Document, ImageSource, ListItem, RichText, Table, TableRow, TextRun};

use super::{RenderOptions, TableFallback};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

/// A rendered block plus whether it is a list item, which decides the
/// separator to the next chunk.
struct Chunk {
    text: String,
    list_item: bool,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.to_yaml_frontmatter());
            output.push('\n');
        }

        output.push_str(&self.render_blocks(&doc.content, 0));

        Ok(output.trim_end().to_string())
    }

    fn render_blocks(&self, blocks: &[Block], depth: usize) -> String {
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut number = 0;

        for block in blocks {
            if let Block::NumberedListItem(_) = block {
                number += 1;
            } else {
                number = 0;
            }

            let chunk = match block {
                Block::BulletedListItem(item) => {
                    let marker = self.options.list_marker.to_string();
                    Some(self.render_list_item(item, &marker, depth))
                }
                Block::NumberedListItem(item) => {
                    Some(self.render_list_item(item, &format!("{}.", number), depth))
                }
                _ => self
                    .render_block(block)
                    .filter(|text| !text.trim().is_empty())
                    .map(|text| Chunk {
                        text: indent(&text, depth),
                        list_item: false,
                    }),
            };
            chunks.extend(chunk);
        }

        let mut output = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i > 0 {
                let tight = chunk.list_item && chunks[i - 1].list_item;
                output.push_str(if tight { "\n" } else { "\n\n" });
            }
            output.push_str(&chunk.text);
        }
        output
    }

    fn render_list_item(&self, item: &ListItem, marker: &str, depth: usize) -> Chunk {
        let mut text = "  ".repeat(depth);
        text.push_str(marker);
        text.push(' ');
        let continuation = " ".repeat(2 * depth + marker.len() + 1);
        // `<li><p>..</p></li>` puts the paragraph on the marker line.
        let (lead, children) = match item.children.split_first() {
            Some((Block::Paragraph { text: lead }, rest)) if !item.text.has_content() => {
                (lead, rest)
            }
            _ => (&item.text, item.children.as_slice()),
        };
        text.push_str(self.render_inline(lead, &continuation).trim());

        let nested = self.render_blocks(children, depth + 1);
        if !nested.is_empty() {
            text.push('\n');
            text.push_str(&nested);
        }

        Chunk {
            text,
            list_item: true,
        }
    }

    /// Render any block other than a list item; empty text blocks yield
    /// nothing.
    fn render_block(&self, block: &Block) -> Option<String> {
        if block.rich_text().is_some_and(|text| !text.has_content()) {
            return None;
        }

        let rendered = match block {
            Block::Paragraph { text } => self.render_inline(text, "").trim().to_string(),
            Block::Heading1 { .. } | Block::Heading2 { .. } | Block::Heading3 { .. } => {
                let level = block
                    .heading_level()
                    .unwrap_or(1)
                    .min(self.options.max_heading_level);
                let text = block.rich_text().map(|t| self.render_heading_text(t));
                format!("{} {}", "#".repeat(level as usize), text.unwrap_or_default())
            }
            Block::Quote { text } => self
                .render_inline(text, "")
                .trim()
                .lines()
                .map(|line| format!("> {}", line.trim_end()))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Code { text } => {
                let code = text.plain_text();
                let fence = if code.contains("```") { "````" } else { "```" };
                format!("{}\n{}\n{}", fence, code.trim_end_matches('\n'), fence)
            }
            Block::Divider => "---".to_string(),
            Block::Table(table) => self.render_table(table)?,
            Block::TableRow(row) => self.render_row(&self.cell_texts(row, row.width())),
            Block::Image(image) => {
                let path = match &image.source {
                    ImageSource::External { url } => url.clone(),
                    ImageSource::Uploaded { reference, .. } => {
                        format!("{}{}", self.options.image_path_prefix, reference)
                    }
                };
                format!("![]({})", path)
            }
            Block::Embed(embed) => format!("[{}]({})", embed.url, embed.url),
            Block::BulletedListItem(_) | Block::NumberedListItem(_) => return None,
        };

        Some(rendered)
    }

    fn render_heading_text(&self, text: &RichText) -> String {
        let inline = self.render_inline(text, "");
        inline.replace("  \n", " ").replace('\n', " ").trim().to_string()
    }

    /// Render runs to inline Markdown; `continuation` is prepended to every
    /// line after a hard break.
    fn render_inline(&self, text: &RichText, continuation: &str) -> String {
        let mut output = String::new();
        for run in text.runs() {
            output.push_str(&self.render_run(run));
        }

        let separator = if self.options.preserve_line_breaks {
            format!("  \n{}", continuation)
        } else {
            " ".to_string()
        };
        output.replace('\n', &separator)
    }

    fn render_run(&self, run: &TextRun) -> String {
        let content = run.content.as_str();
        let core = content.trim_matches(' ');
        if core.is_empty() {
            return content.to_string();
        }
        let lead = &content[..content.len() - content.trim_start_matches(' ').len()];
        let trail = &content[content.trim_end_matches(' ').len()..];

        let annotations = run.annotations;
        let mut result = if annotations.code {
            let tick = if core.contains('`') { "``" } else { "`" };
            format!("{}{}{}", tick, core, tick)
        } else if self.options.escape_special_chars {
            escape_markdown(core)
        } else {
            core.to_string()
        };

        if annotations.strikethrough {
            result = format!("~~{}~~", result);
        }
        if annotations.italic {
            result = format!("*{}*", result);
        }
        if annotations.bold {
            result = format!("**{}**", result);
        }
        if annotations.underline {
            result = format!("<u>{}</u>", result);
        }
        if let Some(ref link) = run.link {
            result = format!("[{}]({})", result, link);
        }

        format!("{}{}{}", lead, result, trail)
    }

    fn render_table(&self, table: &Table) -> Option<String> {
        let width = table.width();
        if width == 0 {
            return None;
        }

        let ragged = table.rows.iter().any(|row| row.width() != width);
        let multiline = table
            .rows
            .iter()
            .any(|row| row.cells.iter().any(|cell| cell.content.contains('\n')));
        if self.options.table_fallback == TableFallback::Html && (ragged || multiline) {
            return Some(self.render_table_html(table));
        }

        let mut lines = Vec::with_capacity(table.rows.len() + 2);
        let mut rows = table.rows.iter();

        if table.has_column_header {
            if let Some(header) = rows.next() {
                lines.push(self.render_row(&self.cell_texts(header, width)));
            }
        } else {
            lines.push(self.render_row(&vec![String::new(); width]));
        }
        lines.push(format!("|{}", " --- |".repeat(width)));

        for row in rows {
            lines.push(self.render_row(&self.cell_texts(row, width)));
        }

        Some(lines.join("\n"))
    }

    fn render_row(&self, cells: &[String]) -> String {
        let mut line = String::from("|");
        for cell in cells {
            let content = escape_pipes(&cell.replace('\n', " "));
            line.push_str(&format!(" {} |", content.trim()));
        }
        line
    }

    /// Rendered cells of `row`, padded with empty cells to `width`.
    fn cell_texts(&self, row: &TableRow, width: usize) -> Vec<String> {
        let mut cells: Vec<String> = row.cells.iter().map(|cell| self.render_run(cell)).collect();
        cells.resize(width.max(cells.len()), String::new());
        cells
    }

    fn render_table_html(&self, table: &Table) -> String {
        let mut output = String::from("<table>\n");

        for (i, row) in table.rows.iter().enumerate() {
            let tag = if i == 0 && table.has_column_header {
                "th"
            } else {
                "td"
            };
            output.push_str("<tr>");
            for cell in &row.cells {
                output.push_str(&format!(
                    "<{}>{}</{}>",
                    tag,
                    escape_html(&cell.content).replace('\n', "<br>"),
                    tag
                ));
            }
            output.push_str("</tr>\n");
        }

        output.push_str("</table>");
        output
    }
}

/// Escape `|` so it cannot end a table cell; pipes escaped earlier are kept.
fn escape_pipes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut escaped = false;
    for c in text.chars() {
        if c == '|' && !escaped {
            result.push('\\');
        }
        escaped = c == '\\' && !escaped;
        result.push(c);
    }
    result
}

fn indent(text: &str, depth: usize) -> String {
    if depth == 0 {
        return text.to_string();
    }
    let prefix = "  ".repeat(depth);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape special Markdown characters.
/// Only characters that could be misinterpreted as inline syntax are escaped.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' | '<' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Annotations, Embed, TextRun};

    fn para(runs: Vec<TextRun>) -> Block {
        Block::Paragraph {
            text: RichText::from(runs),
        }
    }

    fn render(blocks: Vec<Block>) -> String {
        let doc = Document {
            content: blocks,
            ..Default::default()
        };
        to_markdown(&doc, &RenderOptions::new()).unwrap()
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
    }

    #[test]
    fn test_styles_keep_spaces_outside_markers() {
        let result = render(vec![para(vec![
            TextRun::new("Hello "),
            TextRun::bold("world "),
            TextRun::new("!"),
        ])]);
        assert_eq!(result, "Hello **world** !");
    }

    #[test]
    fn test_link_and_code() {
        let code = Annotations {
            code: true,
            ..Default::default()
        };
        let result = render(vec![para(vec![
            TextRun::new("see").with_link("http://example.com"),
            TextRun::new(" "),
            TextRun::new("a_b").with_annotations(code),
        ])]);
        assert_eq!(result, "[see](http://example.com) `a_b`");
    }

    #[test]
    fn test_headings_and_divider() {
        let h2 = Block::Heading2 {
            text: RichText::plain("Section"),
        };
        let result = render(vec![h2, Block::Divider]);
        assert_eq!(result, "## Section\n\n---");
    }

    #[test]
    fn test_quote_lines_prefixed() {
        let quote = Block::Quote {
            text: RichText::plain("a\nb"),
        };
        let options = RenderOptions::new().with_line_breaks(false);
        let doc = Document {
            content: vec![quote.clone()],
            ..Default::default()
        };
        assert_eq!(to_markdown(&doc, &options).unwrap(), "> a b");
        assert_eq!(render(vec![quote]), "> a\n> b");
    }

    #[test]
    fn test_code_block_verbatim() {
        let code = Block::Code {
            text: RichText::plain("let x = *p;\n  y();"),
        };
        assert_eq!(render(vec![code]), "```\nlet x = *p;\n  y();\n```");
    }

    #[test]
    fn test_nested_lists() {
        let inner = ListItem {
            text: RichText::plain("inner"),
            children: vec![],
        };
        let outer = ListItem {
            text: RichText::plain("outer"),
            children: vec![Block::BulletedListItem(inner)],
        };
        let second = ListItem {
            text: RichText::plain("second"),
            children: vec![],
        };
        let result = render(vec![
            Block::NumberedListItem(outer),
            Block::NumberedListItem(second),
        ]);
        assert_eq!(result, "1. outer\n  - inner\n2. second");
    }

    #[test]
    fn test_list_item_paragraph_on_marker_line() {
        let item = ListItem {
            text: RichText::new(),
            children: vec![
                para(vec![TextRun::new("first")]),
                para(vec![TextRun::new("second")]),
            ],
        };
        let result = render(vec![Block::BulletedListItem(item)]);
        assert_eq!(result, "- first\n  second");
    }

    #[test]
    fn test_table_with_header() {
        let mut table = Table::new();
        table.has_column_header = true;
        table.add_row(TableRow::from_strings(["Name", "Age"]));
        table.add_row(TableRow::from_strings(["Ann"]));
        let result = render(vec![Block::Table(table)]);
        assert_eq!(result, "| Name | Age |\n| --- | --- |\n| Ann |  |");
    }

    #[test]
    fn test_table_without_header_gets_blank_header() {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["a", "b"]));
        let result = render(vec![Block::Table(table)]);
        assert_eq!(result, "|  |  |\n| --- | --- |\n| a | b |");
    }

    #[test]
    fn test_table_cells_keep_styles_and_links() {
        let mut row = TableRow::new();
        row.add_cell(TextRun::bold("Name"));
        row.add_cell(TextRun::new("docs").with_link("http://x/"));
        row.add_cell(TextRun::new("a|b"));
        let mut code = TextRun::new("x|y");
        code.annotations.code = true;
        row.add_cell(code);

        let mut table = Table::new();
        table.has_column_header = true;
        table.add_row(row);
        let result = render(vec![Block::Table(table)]);
        assert_eq!(
            result.lines().next(),
            Some("| **Name** | [docs](http://x/) | a\\|b | `x\\|y` |")
        );
    }

    #[test]
    fn test_html_table_fallback_for_ragged_rows() {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["a", "b"]));
        table.add_row(TableRow::from_strings(["c"]));
        let doc = Document {
            content: vec![Block::Table(table)],
            ..Default::default()
        };
        let options = RenderOptions::new().with_table_fallback(TableFallback::Html);
        let result = to_markdown(&doc, &options).unwrap();
        assert!(result.starts_with("<table>"));
        assert!(result.contains("<tr><td>c</td></tr>"));
    }

    #[test]
    fn test_images_and_embeds() {
        let doc = Document {
            content: vec![
                Block::image("http://x/a.png"),
                Block::Image(crate::model::Image::uploaded("image-1.png", "image/png")),
                Block::Embed(Embed {
                    url: "http://video".to_string(),
                }),
            ],
            ..Default::default()
        };
        let options = RenderOptions::new().with_image_prefix("./images/");
        let result = to_markdown(&doc, &options).unwrap();
        assert_eq!(
            result,
            "![](http://x/a.png)\n\n![](./images/image-1.png)\n\n[http://video](http://video)"
        );
    }

    #[test]
    fn test_empty_paragraphs_skipped() {
        let result = render(vec![Block::paragraph(), para(vec![TextRun::new("x")])]);
        assert_eq!(result, "x");
    }

    #[test]
    fn test_render_with_frontmatter() {
        let mut doc = Document::new();
        doc.title = Some("Test Doc".to_string());
        doc.add_block(para(vec![TextRun::new("body")]));

        let options = RenderOptions::new().with_frontmatter(true);
        let result = to_markdown(&doc, &options).unwrap();
        assert!(result.starts_with("---\ntitle: \"Test Doc\"\n---\n"));
        assert!(result.ends_with("body"));
    }
}
