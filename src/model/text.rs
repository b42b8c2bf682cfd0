//! Text runs and run containers.

use serde::{Deserialize, Serialize};

/// Inline style flags carried by a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotations {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Underlined text
    pub underline: bool,

    /// Inline code
    pub code: bool,
}

impl Annotations {
    /// Check if no styling is applied.
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.strikethrough || self.underline || self.code)
    }
}

/// A contiguous span of text sharing one set of annotations and one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub content: String,

    /// Style flags
    pub annotations: Annotations,

    /// Hyperlink target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TextRun {
    /// Create a new plain text run.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            annotations: Annotations::default(),
            link: None,
        }
    }

    /// Create a bold text run.
    pub fn bold(content: impl Into<String>) -> Self {
        Self::new(content).with_annotations(Annotations {
            bold: true,
            ..Default::default()
        })
    }

    /// Create an italic text run.
    pub fn italic(content: impl Into<String>) -> Self {
        Self::new(content).with_annotations(Annotations {
            italic: true,
            ..Default::default()
        })
    }

    /// Set the annotations and return self.
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Set the link target and return self.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether two runs carry identical annotations and link target.
    pub fn same_format(&self, other: &TextRun) -> bool {
        self.annotations == other.annotations && self.link == other.link
    }
}

/// An ordered sequence of text runs owned by a text-bearing block.
///
/// Adjacent runs never share the same format: appending a run whose
/// annotations and link match the trailing run extends that run instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText {
    runs: Vec<TextRun>,
}

impl RichText {
    /// Create an empty run container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container holding a single plain run.
    pub fn plain(content: impl Into<String>) -> Self {
        let mut text = Self::new();
        text.append(TextRun::new(content));
        text
    }

    /// Append a run, merging it into the trailing run when formats match.
    /// Empty runs are ignored.
    pub fn append(&mut self, run: TextRun) {
        if run.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.same_format(&run) => last.content.push_str(&run.content),
            _ => self.runs.push(run),
        }
    }

    /// Append every run of `other` in order.
    pub fn extend(&mut self, other: RichText) {
        for run in other.runs {
            self.append(run);
        }
    }

    /// Append a line break to the current trailing run.
    pub fn push_line_break(&mut self) {
        match self.runs.last_mut() {
            Some(last) => last.content.push('\n'),
            None => self.runs.push(TextRun::new("\n")),
        }
    }

    /// The runs in order.
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Check if there are no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Whether any run holds something other than whitespace.
    pub fn has_content(&self) -> bool {
        self.runs
            .iter()
            .any(|r| r.content.chars().any(|c| !c.is_whitespace()))
    }

    /// Concatenated content of all runs.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.content.as_str()).collect()
    }
}

impl From<Vec<TextRun>> for RichText {
    fn from(runs: Vec<TextRun>) -> Self {
        let mut text = RichText::new();
        for run in runs {
            text.append(run);
        }
        text
    }
}
