//! In-flight inline style and hyperlink state.

use super::options::StylePolicy;
use crate::model::Annotations;

/// One of the inline styles an element can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Italic,
    Strikethrough,
    Underline,
    Code,
}

/// Style flags and active link for one traversal.
///
/// Owned by the walker and threaded through every recursive call; one
/// instance per document.
#[derive(Debug)]
pub struct StyleState {
    policy: StylePolicy,
    depth: [u32; 5],
    links: Vec<Option<String>>,
}

impl StyleState {
    pub fn new(policy: StylePolicy) -> Self {
        Self {
            policy,
            depth: [0; 5],
            links: Vec::new(),
        }
    }

    fn slot(style: Style) -> usize {
        match style {
            Style::Bold => 0,
            Style::Italic => 1,
            Style::Strikethrough => 2,
            Style::Underline => 3,
            Style::Code => 4,
        }
    }

    /// Called when an element applying `style` opens.
    pub fn enter(&mut self, style: Style) {
        let slot = &mut self.depth[Self::slot(style)];
        *slot = match self.policy {
            StylePolicy::Toggle => 1,
            StylePolicy::Nested => *slot + 1,
        };
    }

    /// Called when an element applying `style` closes.
    pub fn exit(&mut self, style: Style) {
        let slot = &mut self.depth[Self::slot(style)];
        *slot = match self.policy {
            StylePolicy::Toggle => 0,
            StylePolicy::Nested => slot.saturating_sub(1),
        };
    }

    /// Called when an anchor opens, with its `href` (if any).
    pub fn enter_link(&mut self, href: Option<&str>) {
        let href = href.map(str::to_string);
        match self.policy {
            StylePolicy::Toggle => {
                self.links.clear();
                self.links.push(href);
            }
            StylePolicy::Nested => self.links.push(href),
        }
    }

    /// Called when an anchor closes.
    pub fn exit_link(&mut self) {
        match self.policy {
            StylePolicy::Toggle => self.links.clear(),
            StylePolicy::Nested => {
                self.links.pop();
            }
        }
    }

    pub fn is_active(&self, style: Style) -> bool {
        self.depth[Self::slot(style)] > 0
    }

    /// Snapshot of the current flags.
    pub fn annotations(&self) -> Annotations {
        Annotations {
            bold: self.is_active(Style::Bold),
            italic: self.is_active(Style::Italic),
            strikethrough: self.is_active(Style::Strikethrough),
            underline: self.is_active(Style::Underline),
            code: self.is_active(Style::Code),
        }
    }

    /// The link target text is currently inside, if any.
    pub fn link(&self) -> Option<&str> {
        self.links.last().and_then(|href| href.as_deref())
    }
}
