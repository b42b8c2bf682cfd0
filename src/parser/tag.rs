//! The closed set of elements the walker has handlers for.

use super::style::Style;

/// Supported HTML elements, grouped by handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Recurse with the same parent: html, head, body, li, dt, dd, tbody,
    /// tfoot, object and generic grouping containers
    Passthrough,
    /// `<title>`
    Title,
    /// `<meta>`
    Meta,
    /// `<base>`
    Base,
    /// `<p>`
    Paragraph,
    /// `<h1>`..`<h6>`
    Heading(u8),
    /// `<blockquote>`
    Blockquote,
    /// `<pre>`
    Preformatted,
    /// `<dl>`
    DefinitionList,
    /// `<hr>`
    Rule,
    /// `<br>`
    LineBreak,
    /// `<img>`
    Image,
    /// `<iframe>`
    Frame,
    /// `<a>`
    Anchor,
    /// Inline style elements
    Inline(Style),
    /// `<ul>`, `<menu>`
    UnorderedList,
    /// `<ol>`
    OrderedList,
    /// `<table>`
    Table,
    /// `<thead>`
    TableHead,
    /// `<tr>`
    TableRow,
    /// `<td>`, `<th>`
    TableCell,
}

impl Tag {
    /// Look up the handler for a local element name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Tag> {
        let tag = match name.to_ascii_lowercase().as_str() {
            "html" | "head" | "body" | "li" | "dt" | "dd" | "tbody" | "tfoot" | "object"
            | "div" | "section" | "article" | "main" | "header" | "footer" | "nav" | "aside"
            | "center" => Tag::Passthrough,
            "title" => Tag::Title,
            "meta" => Tag::Meta,
            "base" => Tag::Base,
            "p" => Tag::Paragraph,
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "h5" => Tag::Heading(5),
            "h6" => Tag::Heading(6),
            "blockquote" => Tag::Blockquote,
            "pre" => Tag::Preformatted,
            "dl" => Tag::DefinitionList,
            "hr" => Tag::Rule,
            "br" => Tag::LineBreak,
            "img" => Tag::Image,
            "iframe" => Tag::Frame,
            "a" => Tag::Anchor,
            "b" | "strong" => Tag::Inline(Style::Bold),
            "i" | "em" => Tag::Inline(Style::Italic),
            "u" | "ins" => Tag::Inline(Style::Underline),
            "s" | "strike" | "del" => Tag::Inline(Style::Strikethrough),
            "code" | "tt" | "kbd" | "samp" | "var" => Tag::Inline(Style::Code),
            "ul" | "menu" => Tag::UnorderedList,
            "ol" => Tag::OrderedList,
            "table" => Tag::Table,
            "thead" => Tag::TableHead,
            "tr" => Tag::TableRow,
            "td" | "th" => Tag::TableCell,
            _ => return None,
        };
        Some(tag)
    }
}

/// Elements whose text content is never document prose, even when unknown
/// elements are descended into.
pub fn is_raw_text(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "script" | "style" | "template" | "noscript" | "textarea"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_share_handlers() {
        assert_eq!(Tag::from_name("strong"), Tag::from_name("b"));
        assert_eq!(Tag::from_name("em"), Some(Tag::Inline(Style::Italic)));
        assert_eq!(Tag::from_name("ins"), Some(Tag::Inline(Style::Underline)));
        assert_eq!(Tag::from_name("strike"), Some(Tag::Inline(Style::Strikethrough)));
        assert_eq!(Tag::from_name("kbd"), Some(Tag::Inline(Style::Code)));
        assert_eq!(Tag::from_name("menu"), Some(Tag::UnorderedList));
        assert_eq!(Tag::from_name("th"), Some(Tag::TableCell));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(Tag::from_name("P"), Some(Tag::Paragraph));
        assert_eq!(Tag::from_name("TaBlE"), Some(Tag::Table));
    }

    #[test]
    fn test_unknown_tags() {
        assert_eq!(Tag::from_name("foo"), None);
        assert_eq!(Tag::from_name("span"), None);
        assert_eq!(Tag::from_name("script"), None);
    }

    #[test]
    fn test_raw_text_elements() {
        assert!(is_raw_text("script"));
        assert!(is_raw_text("STYLE"));
        assert!(!is_raw_text("span"));
    }
}
