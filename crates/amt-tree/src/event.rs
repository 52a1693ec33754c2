//! Flat event stream consumed by the tree builder.
//!
//! A tokenizer emits one [`Event`] per token. Containers are bracketed by an
//! opening and a closing event; everything else is a terminal event.

use std::fmt;

/// How an event changes the nesting depth of the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nesting {
    /// Opens a container (+1).
    Open,
    /// Closes the innermost open container (−1).
    Close,
    /// Stands alone (0).
    Terminal,
}

impl Nesting {
    /// Numeric nesting delta.
    #[must_use]
    pub fn delta(self) -> i32 {
        match self {
            Self::Open => 1,
            Self::Close => -1,
            Self::Terminal => 0,
        }
    }
}

/// How a reference-style link or image names its definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceType {
    /// `[text][label]`
    Full,
    /// `[label][]`
    Collapsed,
    /// `[label]`
    Shortcut,
}

impl ReferenceType {
    /// Name used in the JSON interchange format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Collapsed => "collapsed",
            Self::Shortcut => "shortcut",
        }
    }
}

/// Event type together with its tag-specific payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    /// Paragraph; `hidden` marks a tight-list paragraph.
    Paragraph { hidden: bool },
    /// ATX or setext heading.
    Heading { depth: u8 },
    Blockquote,
    BulletList,
    /// Ordered list; `start` is only set when it differs from 1.
    OrderedList { start: Option<u64> },
    ListItem,
    /// Wrapper hosting the inline content of a block.
    Inline,
    Emphasis,
    Strong,
    /// Link with an inline or autolinked destination.
    Link { url: String, title: Option<String> },
    /// Link resolved through a definition.
    LinkReference {
        label: String,
        reference_type: ReferenceType,
    },
    /// Image with an inline destination. Inner events form the alt text.
    Image { url: String, title: Option<String> },
    /// Image resolved through a definition.
    ImageReference {
        label: String,
        reference_type: ReferenceType,
    },
    Text(String),
    SoftBreak,
    HardBreak,
    /// Code span.
    CodeInline(String),
    /// Indented code block.
    CodeBlock(String),
    /// Fenced code block with its raw info string.
    Fence { info: String, content: String },
    HtmlBlock(String),
    HtmlInline(String),
    /// Thematic break.
    Rule,
    /// Link reference definition.
    Definition {
        label: String,
        url: String,
        title: Option<String>,
    },
    /// A tokenizer tag outside the core vocabulary.
    Other(String),
}

impl Tag {
    /// Stable tag name, used in error messages and transform registration.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Heading { .. } => "heading",
            Self::Blockquote => "blockquote",
            Self::BulletList => "bullet_list",
            Self::OrderedList { .. } => "ordered_list",
            Self::ListItem => "list_item",
            Self::Inline => "inline",
            Self::Emphasis => "em",
            Self::Strong => "strong",
            Self::Link { .. } | Self::LinkReference { .. } => "link",
            Self::Image { .. } | Self::ImageReference { .. } => "image",
            Self::Text(_) => "text",
            Self::SoftBreak => "softbreak",
            Self::HardBreak => "hardbreak",
            Self::CodeInline(_) => "code_inline",
            Self::CodeBlock(_) => "code_block",
            Self::Fence { .. } => "fence",
            Self::HtmlBlock(_) => "html_block",
            Self::HtmlInline(_) => "html_inline",
            Self::Rule => "hr",
            Self::Definition { .. } => "definition",
            Self::Other(name) => name,
        }
    }

    /// Whether the event takes part in a merged text run.
    #[must_use]
    pub fn is_text_run(&self) -> bool {
        matches!(self, Self::Text(_) | Self::SoftBreak)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Zero-based, end-exclusive range of source lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

/// A single tokenizer event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// Event type and payload.
    pub tag: Tag,
    /// Nesting delta.
    pub nesting: Nesting,
    /// Source delimiter, e.g. `*`, `##` or a code fence. Empty when unknown.
    pub markup: String,
    /// Source lines covered by the event (block events only).
    pub map: Option<LineRange>,
}

impl Event {
    /// Create an opening event.
    #[must_use]
    pub fn open(tag: Tag) -> Self {
        Self::new(tag, Nesting::Open)
    }

    /// Create a closing event.
    #[must_use]
    pub fn close(tag: Tag) -> Self {
        Self::new(tag, Nesting::Close)
    }

    /// Create a terminal event.
    #[must_use]
    pub fn terminal(tag: Tag) -> Self {
        Self::new(tag, Nesting::Terminal)
    }

    /// Shorthand for a terminal text event.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::terminal(Tag::Text(content.into()))
    }

    fn new(tag: Tag, nesting: Nesting) -> Self {
        Self {
            tag,
            nesting,
            markup: String::new(),
            map: None,
        }
    }

    /// Attach the source delimiter.
    #[must_use]
    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.markup = markup.into();
        self
    }

    /// Attach a source line range.
    #[must_use]
    pub fn with_map(mut self, start: usize, end: usize) -> Self {
        self.map = Some(LineRange { start, end });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nesting_delta() {
        assert_eq!(Nesting::Open.delta(), 1);
        assert_eq!(Nesting::Close.delta(), -1);
        assert_eq!(Nesting::Terminal.delta(), 0);
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(Tag::Paragraph { hidden: true }.name(), "paragraph");
        assert_eq!(Tag::Rule.name(), "hr");
        assert_eq!(Tag::Other("table".to_owned()).name(), "table");
        assert_eq!(Tag::SoftBreak.to_string(), "softbreak");
    }

    #[test]
    fn test_text_run() {
        assert!(Tag::Text("a".to_owned()).is_text_run());
        assert!(Tag::SoftBreak.is_text_run());
        assert!(!Tag::HardBreak.is_text_run());
    }

    #[test]
    fn test_event_builders() {
        let event = Event::open(Tag::Emphasis).with_markup("_").with_map(2, 4);
        assert_eq!(event.nesting, Nesting::Open);
        assert_eq!(event.markup, "_");
        assert_eq!(event.map, Some(LineRange { start: 2, end: 4 }));
    }
}
