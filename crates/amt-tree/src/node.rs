//! Node vocabulary and per-node data.

use std::fmt;

use crate::event::{LineRange, ReferenceType};

/// Type of an AMT node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Paragraph,
    Text,
    Heading,
    List,
    ListItem,
    /// Indented or fenced code block.
    Code,
    InlineCode,
    Emphasis,
    Strong,
    Link,
    LinkReference,
    Image,
    ImageReference,
    /// Raw HTML, block or inline.
    Html,
    /// Hard line break.
    Break,
    ThematicBreak,
    Blockquote,
    Definition,
    /// Node produced by an extension transform.
    Custom(String),
}

impl NodeKind {
    /// Type name as used in the JSON interchange format.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::Paragraph => "paragraph",
            Self::Text => "text",
            Self::Heading => "heading",
            Self::List => "list",
            Self::ListItem => "listItem",
            Self::Code => "code",
            Self::InlineCode => "inlineCode",
            Self::Emphasis => "emphasis",
            Self::Strong => "strong",
            Self::Link => "link",
            Self::LinkReference => "linkReference",
            Self::Image => "image",
            Self::ImageReference => "imageReference",
            Self::Html => "html",
            Self::Break => "break",
            Self::ThematicBreak => "thematicBreak",
            Self::Blockquote => "blockquote",
            Self::Definition => "definition",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type-specific attributes. Only the fields relevant to a node's kind are set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    /// Heading level (1-6).
    pub depth: Option<u8>,
    pub ordered: Option<bool>,
    /// First number of an ordered list, when not 1.
    pub start: Option<u64>,
    /// Loose (`true`) or tight (`false`) list.
    pub spread: Option<bool>,
    pub lang: Option<String>,
    pub meta: Option<String>,
    /// Literal content of text, code and html nodes.
    pub value: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub alt: Option<String>,
    /// Normalized reference identifier.
    pub identifier: Option<String>,
    /// Reference label as written in the source.
    pub label: Option<String>,
    pub reference_type: Option<ReferenceType>,
}

/// A point in the source document (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

/// Source span of a node.
///
/// Only line information is available; columns are always 1 and `end` points
/// at the line after the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub start: Point,
    pub end: Point,
}

impl From<LineRange> for Position {
    fn from(map: LineRange) -> Self {
        Self {
            start: Point {
                line: map.start + 1,
                column: 1,
            },
            end: Point {
                line: map.end + 1,
                column: 1,
            },
        }
    }
}

/// Everything a node carries apart from its tree links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeData {
    pub kind: NodeKind,
    pub attrs: Attributes,
    /// Source delimiter the node was written with, if any.
    pub markup: Option<String>,
    pub position: Option<Position>,
}

impl NodeData {
    /// Create node data of the given kind with no attributes.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: Attributes::default(),
            markup: None,
            position: None,
        }
    }

    /// Create a custom node for extension transforms.
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Custom(name.into()))
    }

    /// Create a node holding a literal value (text, code, html).
    #[must_use]
    pub fn literal(kind: NodeKind, value: impl Into<String>) -> Self {
        let mut data = Self::new(kind);
        data.attrs.value = Some(value.into());
        data
    }

    /// Set the literal value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.attrs.value = Some(value.into());
        self
    }

    /// Set the source delimiter; empty markup is ignored.
    #[must_use]
    pub fn with_markup(mut self, markup: &str) -> Self {
        if !markup.is_empty() {
            self.markup = Some(markup.to_owned());
        }
        self
    }
}
