//! Event stream to tree conversion.
//!
//! The builder makes a single left-to-right pass with an explicit stack of
//! open events, so nesting depth is bounded by memory rather than by the
//! call stack. Every event between an opening event and its matching close
//! becomes a descendant of the opened node. Runs of text and soft breaks
//! merge into one text node, `inline` wrappers are spliced into their owning
//! block, and image content is flattened into the `alt` attribute.

use std::collections::HashMap;

use crate::definitions::{Definition, ReferenceTable, normalize_identifier};
use crate::error::BuildError;
use crate::event::{Event, Nesting, Tag};
use crate::node::{NodeData, NodeKind, Position};
use crate::tree::{NodeId, Tree};

/// Converts an event the core vocabulary does not cover into node data.
///
/// Register implementations with [`TreeBuilder::with_transform`]. Closures
/// taking `&Event` and returning [`NodeData`] implement this trait.
pub trait EventTransform: Send + Sync {
    /// Produce the node for `event`. Children of an opening event are built
    /// by the builder afterwards.
    fn transform(&self, event: &Event) -> NodeData;
}

impl<F> EventTransform for F
where
    F: Fn(&Event) -> NodeData + Send + Sync,
{
    fn transform(&self, event: &Event) -> NodeData {
        self(event)
    }
}

/// Builds a [`Tree`] from a tokenizer event stream.
///
/// # Example
///
/// ```
/// use amt_tree::{Event, NodeKind, Tag, TreeBuilder};
///
/// let events = vec![
///     Event::open(Tag::Paragraph { hidden: false }),
///     Event::open(Tag::Inline),
///     Event::text("Hello"),
///     Event::close(Tag::Inline),
///     Event::close(Tag::Paragraph { hidden: false }),
/// ];
/// let tree = TreeBuilder::new().build(&events).unwrap();
/// let para = tree.root().first_child().unwrap();
/// assert_eq!(*para.kind(), NodeKind::Paragraph);
/// assert_eq!(para.first_child().unwrap().attrs().value.as_deref(), Some("Hello"));
/// ```
pub struct TreeBuilder {
    positions: bool,
    transforms: HashMap<String, Box<dyn EventTransform>>,
}

/// Mutable state of a single build.
struct BuildContext {
    tree: Tree,
    definitions: ReferenceTable,
}

/// Opening event whose close has not been reached yet.
struct Frame {
    /// Stream index of the opening event.
    open: usize,
    /// Node that receives the events up to the close. For an `inline`
    /// wrapper this is the enclosing block.
    parent: NodeId,
}

impl TreeBuilder {
    /// Create a builder with source positions enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: true,
            transforms: HashMap::new(),
        }
    }

    /// Enable or disable source positions on block nodes.
    #[must_use]
    pub fn with_positions(mut self, enabled: bool) -> Self {
        self.positions = enabled;
        self
    }

    /// Register a transform for events tagged `Other(tag)`.
    ///
    /// Without a registered transform such events fail the build with
    /// [`BuildError::UnknownEvent`].
    #[must_use]
    pub fn with_transform<T: EventTransform + 'static>(
        mut self,
        tag: impl Into<String>,
        transform: T,
    ) -> Self {
        self.transforms.insert(tag.into(), Box::new(transform));
        self
    }

    /// Build a tree from a complete event stream.
    pub fn build(&self, events: &[Event]) -> Result<Tree, BuildError> {
        let mut ctx = BuildContext {
            tree: Tree::new(),
            definitions: ReferenceTable::new(),
        };
        self.build_events(&mut ctx, events)?;

        let BuildContext {
            mut tree,
            definitions,
        } = ctx;
        let definition_count = definitions.len();
        if !definitions.is_empty() {
            tree.set_definitions(definitions);
        }
        tracing::debug!(
            events = events.len(),
            nodes = tree.len(),
            definitions = definition_count,
            "Built tree"
        );
        Ok(tree)
    }

    /// Walk `events` once, keeping the chain of open events on a stack.
    fn build_events(&self, ctx: &mut BuildContext, events: &[Event]) -> Result<(), BuildError> {
        let mut stack: Vec<Frame> = Vec::new();
        let mut i = 0;

        while let Some(event) = events.get(i) {
            let parent = stack.last().map_or(NodeId::ROOT, |frame| frame.parent);
            match event.nesting {
                Nesting::Terminal if event.tag.is_text_run() => {
                    let run = events[i..]
                        .iter()
                        .take_while(|e| e.nesting == Nesting::Terminal && e.tag.is_text_run())
                        .count();
                    let value = merge_text(&events[i..i + run]);
                    ctx.tree.append(parent, NodeData::literal(NodeKind::Text, value));
                    i += run;
                    continue;
                }
                Nesting::Terminal => {
                    if event.tag != Tag::Inline {
                        self.add_node(ctx, parent, event)?;
                    }
                }
                Nesting::Open if event.tag == Tag::Inline => {
                    stack.push(Frame { open: i, parent });
                }
                Nesting::Open if is_image(&event.tag) => {
                    // Image content never becomes nodes; it is read once for `alt`.
                    let Some(close) = find_close(events, i) else {
                        let open = stack.first().map_or(i, |frame| frame.open);
                        return Err(unclosed(events, open));
                    };
                    let id = self.add_node(ctx, parent, event)?;
                    ctx.tree.data_mut(id).attrs.alt = Some(plain_text(&events[i + 1..close]));
                    i = close + 1;
                    continue;
                }
                Nesting::Open => {
                    let id = self.add_node(ctx, parent, event)?;
                    stack.push(Frame { open: i, parent: id });
                }
                Nesting::Close => {
                    if stack.pop().is_none() {
                        return Err(BuildError::UnexpectedNesting {
                            tag: event.tag.name().to_owned(),
                            index: i,
                            delta: event.nesting.delta(),
                        });
                    }
                }
            }
            i += 1;
        }

        match stack.first() {
            Some(frame) => Err(unclosed(events, frame.open)),
            None => Ok(()),
        }
    }

    fn add_node(
        &self,
        ctx: &mut BuildContext,
        parent: NodeId,
        event: &Event,
    ) -> Result<NodeId, BuildError> {
        let mut data = self.transform(event)?;
        if self.positions {
            data.position = event.map.map(Position::from);
        }
        let id = ctx.tree.append(parent, data);

        match &event.tag {
            Tag::Paragraph { hidden: true } => mark_tight(&mut ctx.tree, id),
            Tag::Definition { label, url, title } => {
                let definition = Definition {
                    url: url.clone(),
                    title: title.clone(),
                };
                if !ctx.definitions.insert(label, definition) {
                    tracing::debug!(label = %label, "Ignoring duplicate definition");
                }
            }
            _ => {}
        }
        Ok(id)
    }

    fn transform(&self, event: &Event) -> Result<NodeData, BuildError> {
        let data = match &event.tag {
            Tag::Paragraph { .. } => NodeData::new(NodeKind::Paragraph),
            Tag::Heading { depth } => {
                let mut data = NodeData::new(NodeKind::Heading);
                data.attrs.depth = Some(*depth);
                data
            }
            Tag::Blockquote => NodeData::new(NodeKind::Blockquote),
            Tag::BulletList => list(false, None),
            Tag::OrderedList { start } => list(true, *start),
            Tag::ListItem => NodeData::new(NodeKind::ListItem),
            // Spliced into the parent by `build_events`.
            Tag::Inline => {
                return Err(BuildError::UnknownEvent {
                    tag: event.tag.name().to_owned(),
                });
            }
            Tag::Emphasis => NodeData::new(NodeKind::Emphasis),
            Tag::Strong => NodeData::new(NodeKind::Strong),
            Tag::Link { url, title } => {
                let mut data = NodeData::new(NodeKind::Link);
                data.attrs.url = Some(url.clone());
                data.attrs.title.clone_from(title);
                data
            }
            Tag::LinkReference {
                label,
                reference_type,
            } => {
                let mut data = NodeData::new(NodeKind::LinkReference);
                data.attrs.identifier = Some(normalize_identifier(label));
                data.attrs.label = Some(label.clone());
                data.attrs.reference_type = Some(*reference_type);
                data
            }
            Tag::Image { url, title } => {
                let mut data = NodeData::new(NodeKind::Image);
                data.attrs.url = Some(url.clone());
                data.attrs.title.clone_from(title);
                data.attrs.alt = Some(String::new());
                data
            }
            Tag::ImageReference {
                label,
                reference_type,
            } => {
                let mut data = NodeData::new(NodeKind::ImageReference);
                data.attrs.identifier = Some(normalize_identifier(label));
                data.attrs.label = Some(label.clone());
                data.attrs.reference_type = Some(*reference_type);
                data.attrs.alt = Some(String::new());
                data
            }
            Tag::Text(content) => NodeData::literal(NodeKind::Text, content.clone()),
            Tag::SoftBreak => NodeData::literal(NodeKind::Text, "\n"),
            Tag::HardBreak => NodeData::new(NodeKind::Break),
            Tag::CodeInline(content) => NodeData::literal(NodeKind::InlineCode, content.clone()),
            Tag::CodeBlock(content) => NodeData::literal(NodeKind::Code, content.clone()),
            Tag::Fence { info, content } => {
                let mut data = NodeData::literal(NodeKind::Code, content.clone());
                let (lang, meta) = split_info(info);
                data.attrs.lang = lang;
                data.attrs.meta = meta;
                data
            }
            Tag::HtmlBlock(content) | Tag::HtmlInline(content) => {
                NodeData::literal(NodeKind::Html, content.clone())
            }
            Tag::Rule => NodeData::new(NodeKind::ThematicBreak),
            Tag::Definition { label, url, title } => {
                let mut data = NodeData::new(NodeKind::Definition);
                data.attrs.identifier = Some(normalize_identifier(label));
                data.attrs.label = Some(label.clone());
                data.attrs.url = Some(url.clone());
                data.attrs.title.clone_from(title);
                data
            }
            Tag::Other(name) => {
                let Some(transform) = self.transforms.get(name) else {
                    return Err(BuildError::UnknownEvent { tag: name.clone() });
                };
                tracing::trace!(tag = %name, "Applying extension transform");
                transform.transform(event)
            }
        };
        Ok(data.with_markup(&event.markup))
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a tree with the default configuration.
pub fn build(events: &[Event]) -> Result<Tree, BuildError> {
    TreeBuilder::new().build(events)
}

fn list(ordered: bool, start: Option<u64>) -> NodeData {
    let mut data = NodeData::new(NodeKind::List);
    data.attrs.ordered = Some(ordered);
    data.attrs.start = start;
    // Cleared by the first hidden paragraph two levels down.
    data.attrs.spread = Some(true);
    data
}

/// Mark the list two levels above a hidden paragraph as tight.
fn mark_tight(tree: &mut Tree, paragraph: NodeId) {
    let list = tree
        .get(paragraph)
        .and_then(|p| p.parent())
        .and_then(|item| item.parent())
        .filter(|list| *list.kind() == NodeKind::List)
        .map(|list| list.id());
    if let Some(list) = list {
        tree.data_mut(list).attrs.spread = Some(false);
    }
}

fn is_image(tag: &Tag) -> bool {
    matches!(tag, Tag::Image { .. } | Tag::ImageReference { .. })
}

fn unclosed(events: &[Event], open: usize) -> BuildError {
    BuildError::Unclosed {
        tag: events[open].tag.name().to_owned(),
        index: open,
    }
}

/// Index of the event closing the one opened at `open`.
fn find_close(events: &[Event], open: usize) -> Option<usize> {
    let mut depth = 0;
    for (i, event) in events.iter().enumerate().skip(open) {
        depth += event.nesting.delta();
        if depth == 0 {
            return Some(i);
        }
    }
    None
}

fn merge_text(events: &[Event]) -> String {
    let mut value = String::new();
    for event in events {
        match &event.tag {
            Tag::Text(content) => value.push_str(content),
            Tag::SoftBreak => value.push('\n'),
            _ => {}
        }
    }
    value
}

/// Flatten inline events to the plain text used for image `alt`.
///
/// Text, code span and inline HTML content is kept as written, line breaks
/// become a space and all other markup is dropped.
fn plain_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match &event.tag {
            Tag::Text(content) | Tag::CodeInline(content) | Tag::HtmlInline(content) => {
                text.push_str(content);
            }
            Tag::SoftBreak | Tag::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Split a fence info string into language and metadata.
fn split_info(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    if info.is_empty() {
        return (None, None);
    }
    match info.split_once(char::is_whitespace) {
        Some((lang, meta)) => {
            let meta = meta.trim();
            (
                Some(lang.to_owned()),
                (!meta.is_empty()).then(|| meta.to_owned()),
            )
        }
        None => (Some(info.to_owned()), None),
    }
}
