//! Parsing options and configuration.

/// Default bound on element nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options for converting HTML documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Handling of element-local failures
    pub error_mode: ErrorMode,

    /// How nested style and link elements combine
    pub style_policy: StylePolicy,

    /// What to do with elements that have no handler
    pub unknown_tags: UnknownTagPolicy,

    /// Maximum element nesting depth
    pub max_depth: usize,

    /// Convert `<h4>`..`<h6>` to level-3 headings instead of treating them
    /// as unsupported elements
    pub clamp_minor_headings: bool,

    /// Initial base URL (a `<base href>` element overrides it)
    pub base_url: Option<String>,

    /// Source name; its final path component becomes the initial title
    pub source_name: Option<String>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Abort on the first element-local failure.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Skip failing elements and continue.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the style policy.
    pub fn with_style_policy(mut self, policy: StylePolicy) -> Self {
        self.style_policy = policy;
        self
    }

    /// Set the unknown-tag policy.
    pub fn with_unknown_tags(mut self, policy: UnknownTagPolicy) -> Self {
        self.unknown_tags = policy;
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Convert `<h4>`..`<h6>` to level-3 headings.
    pub fn with_clamped_headings(mut self, clamp: bool) -> Self {
        self.clamp_minor_headings = clamp;
        self
    }

    /// Set the initial base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the source name.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            style_policy: StylePolicy::Nested,
            unknown_tags: UnknownTagPolicy::Drop,
            max_depth: DEFAULT_MAX_DEPTH,
            clamp_minor_headings: false,
            base_url: None,
            source_name: None,
        }
    }
}

/// Error handling mode for element-local failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the whole parse
    Strict,
    /// Log, omit the element and continue
    #[default]
    Lenient,
}

/// How style and link elements of the same kind nest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StylePolicy {
    /// Each element sets its flag on entry and clears it on exit, so an
    /// inner element of the same kind ends the style for its outer one too.
    Toggle,
    /// Styles are reference counted and links stacked; a style stays active
    /// until every element applying it has closed.
    #[default]
    Nested,
}

/// Handling of elements without a dedicated handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTagPolicy {
    /// Drop the element and its whole subtree
    #[default]
    Drop,
    /// Process the element's contents against the current parent
    Descend,
}
