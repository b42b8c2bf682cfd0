//! Rendering options and configuration.

/// Options for rendering document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prefix for stored image references in output (e.g., "./images/")
    pub image_path_prefix: String,

    /// How to render tables
    pub table_fallback: TableFallback,

    /// Maximum heading level (1-3)
    pub max_heading_level: u8,

    /// Include YAML frontmatter with title and metadata
    pub include_frontmatter: bool,

    /// Render line breaks inside text as hard breaks
    pub preserve_line_breaks: bool,

    /// Character to use for unordered list markers
    pub list_marker: char,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image path prefix.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_path_prefix = prefix.into();
        self
    }

    /// Set the table fallback mode.
    pub fn with_table_fallback(mut self, fallback: TableFallback) -> Self {
        self.table_fallback = fallback;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 3);
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable line break preservation.
    pub fn with_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable escaping of Markdown syntax characters.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_path_prefix: String::new(),
            table_fallback: TableFallback::Markdown,
            max_heading_level: 3,
            include_frontmatter: false,
            preserve_line_breaks: true,
            list_marker: '-',
            escape_special_chars: true,
        }
    }
}

/// How to render tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFallback {
    /// Pipe table syntax
    #[default]
    Markdown,
    /// HTML table tags, for tables with ragged rows or multi-line cells
    Html,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_max_heading(2)
            .with_list_marker('*')
            .with_table_fallback(TableFallback::Html);

        assert!(options.include_frontmatter);
        assert_eq!(options.max_heading_level, 2);
        assert_eq!(options.list_marker, '*');
        assert_eq!(options.table_fallback, TableFallback::Html);
    }

    #[test]
    fn test_max_heading_clamped() {
        assert_eq!(RenderOptions::new().with_max_heading(6).max_heading_level, 3);
        assert_eq!(RenderOptions::new().with_max_heading(0).max_heading_level, 1);
    }
}
