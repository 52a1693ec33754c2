//! CommonMark → event stream adapter.

use std::collections::{HashSet, VecDeque};
use std::ops::Range;

use amt_tree::{Event, LineRange, ReferenceType, Tag, normalize_identifier};
use pulldown_cmark::{
    CodeBlockKind, CowStr, Event as CmarkEvent, HeadingLevel, LinkType, Options, Parser,
    Tag as CmarkTag,
};

use crate::link::normalize_link;
use crate::source::{self, LineIndex};

/// Markdown tokenizer producing the flat event stream consumed by
/// [`amt_tree::TreeBuilder`].
///
/// Paragraphs and headings wrap their content in an `inline` event pair.
/// Paragraphs of tight list items, which the parser elides, are restored as
/// hidden paragraphs. Link reference definitions appear as terminal events
/// at their position in the document.
#[derive(Clone, Debug, Default)]
pub struct Tokenizer {
    gfm: bool,
}

impl Tokenizer {
    /// Create a strict CommonMark tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable GitHub Flavored Markdown extensions.
    ///
    /// Extension constructs (tables, strikethrough, task list markers) are
    /// emitted as [`Tag::Other`] events and need a registered transform to
    /// build.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    fn options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Tokenize a document.
    #[must_use]
    pub fn tokenize(&self, markdown: &str) -> Vec<Event> {
        let options = self.options();
        let parser = Parser::new_ext(markdown, options);
        let definitions = collect_definitions(&parser, 0);
        let definition_count = definitions.len();

        let mut state = State::new(markdown, options, definitions);
        for (event, range) in parser.into_offset_iter() {
            state.push(event, range);
        }
        let events = state.finish();

        tracing::debug!(
            events = events.len(),
            definitions = definition_count,
            gfm = self.gfm,
            "Tokenized document"
        );
        events
    }
}

/// Tokenize a document with the default [`Tokenizer`].
#[must_use]
pub fn tokenize(markdown: &str) -> Vec<Event> {
    Tokenizer::new().tokenize(markdown)
}

struct PendingDefinition {
    label: String,
    url: String,
    title: Option<String>,
    span: Range<usize>,
}

/// Definitions the parser recorded, in document order. Spans are shifted by
/// `offset`.
fn collect_definitions(parser: &Parser<'_>, offset: usize) -> Vec<PendingDefinition> {
    let mut definitions: Vec<_> = parser
        .reference_definitions()
        .iter()
        .map(|(label, def)| PendingDefinition {
            label: label.to_owned(),
            url: normalize_link(&def.dest),
            title: non_empty(def.title.as_deref()),
            span: def.span.start + offset..def.span.end + offset,
        })
        .collect();
    definitions.sort_by_key(|def| def.span.start);
    definitions
}

/// Definitions inside `gap` that the parser left out of its definition map
/// because an earlier definition already claimed the label.
///
/// `gap` must be source text no parser event covers, so anything parsed as
/// a definition there is one. Each pass recovers the first definition of
/// every label and rescans what lies between them.
fn shadowed_definitions(
    source: &str,
    gap: Range<usize>,
    options: Options,
) -> Vec<PendingDefinition> {
    let mut found = Vec::new();
    let mut pending = vec![gap];
    while let Some(piece) = pending.pop() {
        let Some(text) = source.get(piece.clone()).filter(|text| text.contains(']')) else {
            continue;
        };
        let definitions = collect_definitions(&Parser::new_ext(text, options), piece.start);
        if definitions.is_empty() {
            continue;
        }
        let mut start = piece.start;
        for def in &definitions {
            pending.push(start..def.span.start);
            start = def.span.end;
        }
        pending.push(start..piece.end);
        found.extend(definitions);
    }
    found.sort_by_key(|def| def.span.start);
    found
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.is_empty()).map(str::to_owned)
}

enum FrameKind {
    /// Blockquote, list, list item or an unsupported block.
    Container,
    /// Paragraph or heading; `inline` is set once the wrapper is open.
    Leaf { inline: bool },
    /// Paragraph restored around tight list item content.
    Hidden { open_index: usize, start: usize },
    /// Emphasis, link, image or an unsupported inline container.
    Span,
}

struct Frame {
    tag: Tag,
    kind: FrameKind,
}

enum Capture {
    Indented,
    Fenced { info: String },
    Html,
}

/// Literal block whose text arrives in several parser events.
struct Literal {
    capture: Capture,
    content: String,
    markup: String,
    lines: LineRange,
}

impl Literal {
    fn into_event(self) -> Event {
        let tag = match self.capture {
            Capture::Indented => Tag::CodeBlock(self.content),
            Capture::Fenced { info } => Tag::Fence {
                info,
                content: self.content,
            },
            Capture::Html => Tag::HtmlBlock(self.content),
        };
        Event::terminal(tag)
            .with_markup(self.markup)
            .with_map(self.lines.start, self.lines.end)
    }
}

struct State<'s> {
    source: &'s str,
    options: Options,
    lines: LineIndex,
    definitions: VecDeque<PendingDefinition>,
    /// Source offset up to which parser events and definitions account for
    /// the text.
    covered: usize,
    known_labels: HashSet<String>,
    stack: Vec<Frame>,
    literal: Option<Literal>,
    inline_end: usize,
    out: Vec<Event>,
}

impl<'s> State<'s> {
    fn new(source: &'s str, options: Options, definitions: Vec<PendingDefinition>) -> Self {
        let known_labels = definitions
            .iter()
            .map(|def| normalize_identifier(&def.label))
            .collect();
        Self {
            source,
            options,
            lines: LineIndex::new(source),
            definitions: definitions.into(),
            covered: 0,
            known_labels,
            stack: Vec::new(),
            literal: None,
            inline_end: 0,
            out: Vec::new(),
        }
    }

    fn slice(&self, range: &Range<usize>) -> &'s str {
        self.source.get(range.clone()).unwrap_or_default()
    }

    fn push(&mut self, event: CmarkEvent<'_>, range: Range<usize>) {
        if self.literal.is_some() {
            self.push_literal(event);
            return;
        }

        let boundary = match event {
            CmarkEvent::End(_) => range.end,
            _ => range.start,
        };
        self.flush_definitions(boundary);
        // Container content is accounted for by the events inside it.
        let covered = match event {
            CmarkEvent::Start(
                CmarkTag::BlockQuote(_)
                | CmarkTag::List(_)
                | CmarkTag::Item
                | CmarkTag::FootnoteDefinition(_),
            ) => range.start,
            _ => range.end,
        };
        self.covered = self.covered.max(covered);

        match event {
            CmarkEvent::Start(tag) => self.start(tag, range),
            CmarkEvent::End(_) => self.end(),
            CmarkEvent::Text(text) => self.inline(Event::text(text.into_string()), &range),
            CmarkEvent::Code(code) => {
                let markup = source::code_span(self.slice(&range));
                let event = Event::terminal(Tag::CodeInline(code.into_string())).with_markup(markup);
                self.inline(event, &range);
            }
            CmarkEvent::InlineHtml(html) => {
                self.inline(Event::terminal(Tag::HtmlInline(html.into_string())), &range);
            }
            CmarkEvent::Html(html) => {
                self.close_hidden();
                let lines = self.lines.lines(&range);
                self.out.push(
                    Event::terminal(Tag::HtmlBlock(html.into_string()))
                        .with_map(lines.start, lines.end),
                );
            }
            CmarkEvent::SoftBreak => self.inline(Event::terminal(Tag::SoftBreak), &range),
            CmarkEvent::HardBreak => self.inline(Event::terminal(Tag::HardBreak), &range),
            CmarkEvent::Rule => {
                self.close_hidden();
                let lines = self.lines.lines(&range);
                self.out.push(
                    Event::terminal(Tag::Rule)
                        .with_markup(source::rule(self.slice(&range)))
                        .with_map(lines.start, lines.end),
                );
            }
            CmarkEvent::TaskListMarker(_) => self.inline(other("task_list_marker"), &range),
            CmarkEvent::FootnoteReference(_) => self.inline(other("footnote_ref"), &range),
            CmarkEvent::InlineMath(_) => self.inline(other("math_inline"), &range),
            CmarkEvent::DisplayMath(_) => self.inline(other("math_block"), &range),
        }
    }

    fn push_literal(&mut self, event: CmarkEvent<'_>) {
        match event {
            CmarkEvent::Text(text) | CmarkEvent::Html(text) => {
                if let Some(literal) = &mut self.literal {
                    literal.content.push_str(&text);
                }
            }
            CmarkEvent::End(_) => {
                if let Some(literal) = self.literal.take() {
                    self.out.push(literal.into_event());
                }
            }
            ignored => tracing::trace!(event = ?ignored, "Ignored event inside literal block"),
        }
    }

    fn start(&mut self, tag: CmarkTag<'_>, range: Range<usize>) {
        let slice = self.slice(&range);
        match tag {
            CmarkTag::Paragraph => self.open_block(
                Tag::Paragraph { hidden: false },
                FrameKind::Leaf { inline: false },
                String::new(),
                &range,
            ),
            CmarkTag::Heading { level, .. } => {
                let depth = heading_depth(level);
                self.open_block(
                    Tag::Heading { depth },
                    FrameKind::Leaf { inline: false },
                    source::heading(slice, depth),
                    &range,
                );
            }
            CmarkTag::BlockQuote(_) => self.open_block(
                Tag::Blockquote,
                FrameKind::Container,
                ">".to_owned(),
                &range,
            ),
            CmarkTag::CodeBlock(kind) => {
                self.close_hidden();
                let (capture, markup) = match kind {
                    CodeBlockKind::Indented => (Capture::Indented, String::new()),
                    CodeBlockKind::Fenced(info) => (
                        Capture::Fenced {
                            info: info.into_string(),
                        },
                        source::fence(slice),
                    ),
                };
                self.literal = Some(Literal {
                    capture,
                    content: String::new(),
                    markup,
                    lines: self.lines.lines(&range),
                });
            }
            CmarkTag::HtmlBlock => {
                self.close_hidden();
                self.literal = Some(Literal {
                    capture: Capture::Html,
                    content: String::new(),
                    markup: String::new(),
                    lines: self.lines.lines(&range),
                });
            }
            CmarkTag::List(Some(start)) => self.open_block(
                Tag::OrderedList {
                    start: (start != 1).then_some(start),
                },
                FrameKind::Container,
                source::list_marker(slice),
                &range,
            ),
            CmarkTag::List(None) => self.open_block(
                Tag::BulletList,
                FrameKind::Container,
                source::list_marker(slice),
                &range,
            ),
            CmarkTag::Item => self.open_block(
                Tag::ListItem,
                FrameKind::Container,
                source::list_marker(slice),
                &range,
            ),
            CmarkTag::Emphasis => {
                self.open_span(Tag::Emphasis, source::emphasis(slice, 1), &range);
            }
            CmarkTag::Strong => self.open_span(Tag::Strong, source::emphasis(slice, 2), &range),
            CmarkTag::Link {
                link_type,
                dest_url,
                title,
                id,
            } => {
                let markup = if matches!(link_type, LinkType::Autolink | LinkType::Email) {
                    "autolink".to_owned()
                } else {
                    String::new()
                };
                let tag = self.link_tag(link_type, dest_url, title, id, false);
                self.open_span(tag, markup, &range);
            }
            CmarkTag::Image {
                link_type,
                dest_url,
                title,
                id,
            } => {
                let tag = self.link_tag(link_type, dest_url, title, id, true);
                self.open_span(tag, String::new(), &range);
            }
            CmarkTag::Strikethrough => self.open_span(other_tag("s"), "~~".to_owned(), &range),
            unsupported => self.open_block(
                other_tag(unsupported_block_name(&unsupported)),
                FrameKind::Container,
                String::new(),
                &range,
            ),
        }
    }

    fn end(&mut self) {
        self.close_hidden();
        if let Some(frame) = self.stack.pop() {
            if let FrameKind::Leaf { inline: true } = frame.kind {
                self.out.push(Event::close(Tag::Inline));
            }
            self.out.push(Event::close(frame.tag));
        }
    }

    fn open_block(&mut self, tag: Tag, kind: FrameKind, markup: String, range: &Range<usize>) {
        self.close_hidden();
        let lines = self.lines.lines(range);
        self.out.push(
            Event::open(tag.clone())
                .with_markup(markup)
                .with_map(lines.start, lines.end),
        );
        self.stack.push(Frame { tag, kind });
    }

    fn open_span(&mut self, tag: Tag, markup: String, range: &Range<usize>) {
        self.ensure_inline(range.start);
        self.out.push(Event::open(tag.clone()).with_markup(markup));
        self.stack.push(Frame {
            tag,
            kind: FrameKind::Span,
        });
    }

    fn inline(&mut self, event: Event, range: &Range<usize>) {
        self.ensure_inline(range.start);
        self.inline_end = self.inline_end.max(range.end);
        self.out.push(event);
    }

    /// Make sure inline content has an enclosing `inline` wrapper.
    fn ensure_inline(&mut self, offset: usize) {
        let frame = self.stack.last_mut().map(|frame| &mut frame.kind);
        match frame {
            Some(FrameKind::Leaf { inline }) => {
                if !*inline {
                    *inline = true;
                    self.out.push(Event::open(Tag::Inline));
                }
            }
            Some(FrameKind::Span | FrameKind::Hidden { .. }) => {}
            Some(FrameKind::Container) | None => {
                let tag = Tag::Paragraph { hidden: true };
                let open_index = self.out.len();
                self.out.push(Event::open(tag.clone()));
                self.out.push(Event::open(Tag::Inline));
                self.inline_end = offset;
                self.stack.push(Frame {
                    tag,
                    kind: FrameKind::Hidden {
                        open_index,
                        start: offset,
                    },
                });
            }
        }
    }

    fn close_hidden(&mut self) {
        let Some(Frame {
            kind: FrameKind::Hidden { open_index, start },
            ..
        }) = self.stack.last()
        else {
            return;
        };
        let (open_index, start) = (*open_index, *start);
        self.stack.pop();

        let lines = self.lines.lines(&(start..self.inline_end));
        if let Some(open) = self.out.get_mut(open_index) {
            open.map = Some(lines);
        }
        self.out.push(Event::close(Tag::Inline));
        self.out.push(Event::close(Tag::Paragraph { hidden: true }));
    }

    /// Emit every definition that starts before `boundary`.
    fn flush_definitions(&mut self, boundary: usize) {
        while let Some(start) = self
            .definitions
            .front()
            .map(|def| def.span.start)
            .filter(|&start| start < boundary)
        {
            self.flush_shadowed(start);
            let Some(def) = self.definitions.pop_front() else {
                break;
            };
            self.covered = self.covered.max(def.span.end);
            self.push_definition(def);
        }
        self.flush_shadowed(boundary);
    }

    /// Emit duplicate definitions between the covered offset and `boundary`.
    fn flush_shadowed(&mut self, boundary: usize) {
        let boundary = boundary.min(self.source.len());
        if self.covered >= boundary {
            return;
        }
        let gap = self.covered..boundary;
        self.covered = boundary;
        for def in shadowed_definitions(self.source, gap, self.options) {
            tracing::trace!(label = %def.label, "Recovered duplicate definition");
            self.push_definition(def);
        }
    }

    fn push_definition(&mut self, def: PendingDefinition) {
        self.close_hidden();
        let lines = self.lines.lines(&def.span);
        self.out.push(
            Event::terminal(Tag::Definition {
                label: def.label,
                url: def.url,
                title: def.title,
            })
            .with_map(lines.start, lines.end),
        );
    }

    fn link_tag(
        &self,
        link_type: LinkType,
        dest_url: CowStr<'_>,
        title: CowStr<'_>,
        id: CowStr<'_>,
        image: bool,
    ) -> Tag {
        let reference_type = match link_type {
            LinkType::Reference => Some(ReferenceType::Full),
            LinkType::Collapsed => Some(ReferenceType::Collapsed),
            LinkType::Shortcut => Some(ReferenceType::Shortcut),
            _ => None,
        };
        if let Some(reference_type) = reference_type
            && !id.is_empty()
            && self.known_labels.contains(&normalize_identifier(&id))
        {
            let label = id.into_string();
            return if image {
                Tag::ImageReference {
                    label,
                    reference_type,
                }
            } else {
                Tag::LinkReference {
                    label,
                    reference_type,
                }
            };
        }

        let url = match link_type {
            LinkType::Email => normalize_link(&format!("mailto:{dest_url}")),
            _ => normalize_link(&dest_url),
        };
        let title = non_empty(Some(&*title));
        if image {
            Tag::Image { url, title }
        } else {
            Tag::Link { url, title }
        }
    }

    fn finish(mut self) -> Vec<Event> {
        self.flush_definitions(usize::MAX);
        while !self.stack.is_empty() {
            self.end();
        }
        self.out
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn other_tag(name: &str) -> Tag {
    Tag::Other(name.to_owned())
}

fn other(name: &str) -> Event {
    Event::terminal(other_tag(name))
}

fn unsupported_block_name(tag: &CmarkTag<'_>) -> &'static str {
    match tag {
        CmarkTag::Table(_) => "table",
        CmarkTag::TableHead => "thead",
        CmarkTag::TableRow => "tr",
        CmarkTag::TableCell => "td",
        CmarkTag::FootnoteDefinition(_) => "footnote",
        CmarkTag::MetadataBlock(_) => "front_matter",
        _ => "unsupported",
    }
}

#[cfg(test)]
mod tests {
    use amt_tree::Nesting;
    use pretty_assertions::assert_eq;

    use super::*;

    /// `(nesting, tag name)` pairs for compact assertions.
    fn outline(events: &[Event]) -> Vec<String> {
        events
            .iter()
            .map(|event| {
                let sign = match event.nesting {
                    Nesting::Open => "+",
                    Nesting::Close => "-",
                    Nesting::Terminal => "",
                };
                format!("{sign}{}", event.tag.name())
            })
            .collect()
    }

    #[test]
    fn test_heading_and_paragraph() {
        let events = tokenize("# Hi\n\nSome *text*.\n");
        assert_eq!(
            outline(&events),
            vec![
                "+heading",
                "+inline",
                "text",
                "-inline",
                "-heading",
                "+paragraph",
                "+inline",
                "text",
                "+em",
                "text",
                "-em",
                "text",
                "-inline",
                "-paragraph",
            ]
        );
        assert_eq!(events[0].markup, "#");
        assert_eq!(events[0].map, Some(LineRange { start: 0, end: 1 }));
        assert_eq!(events[5].map, Some(LineRange { start: 2, end: 3 }));
        assert_eq!(events[8].markup, "*");
    }

    #[test]
    fn test_tight_list_restores_hidden_paragraphs() {
        let events = tokenize("- a\n- b\n");
        assert_eq!(
            outline(&events),
            vec![
                "+bullet_list",
                "+list_item",
                "+paragraph",
                "+inline",
                "text",
                "-inline",
                "-paragraph",
                "-list_item",
                "+list_item",
                "+paragraph",
                "+inline",
                "text",
                "-inline",
                "-paragraph",
                "-list_item",
                "-bullet_list",
            ]
        );
        assert_eq!(events[0].markup, "-");
        assert_eq!(events[2].tag, Tag::Paragraph { hidden: true });
        assert_eq!(events[2].map, Some(LineRange { start: 0, end: 1 }));
        assert_eq!(events[9].map, Some(LineRange { start: 1, end: 2 }));
    }

    #[test]
    fn test_loose_list_keeps_paragraphs_visible() {
        let events = tokenize("1. a\n\n2. b\n");
        assert_eq!(events[0].tag, Tag::OrderedList { start: None });
        assert_eq!(events[0].markup, ".");
        assert_eq!(events[2].tag, Tag::Paragraph { hidden: false });
    }

    #[test]
    fn test_ordered_list_start() {
        let events = tokenize("3) x\n");
        assert_eq!(events[0].tag, Tag::OrderedList { start: Some(3) });
        assert_eq!(events[0].markup, ")");
    }

    #[test]
    fn test_fence_collects_content() {
        let events = tokenize("```rust extra\nfn main() {}\n```\n");
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].tag,
            Tag::Fence {
                info: "rust extra".to_owned(),
                content: "fn main() {}\n".to_owned(),
            }
        );
        assert_eq!(events[0].markup, "```");
        assert_eq!(events[0].map, Some(LineRange { start: 0, end: 3 }));
    }

    #[test]
    fn test_indented_code_block() {
        let events = tokenize("    a\n    b\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tag, Tag::CodeBlock("a\nb\n".to_owned()));
    }

    #[test]
    fn test_html_block() {
        let events = tokenize("<div>\nhi\n</div>\n");
        assert_eq!(
            events,
            vec![Event::terminal(Tag::HtmlBlock("<div>\nhi\n</div>\n".to_owned())).with_map(0, 3)]
        );
    }

    #[test]
    fn test_definition_emitted_in_place() {
        let events = tokenize("[Foo]\n\n[foo]: /url \"T\"\n");
        assert_eq!(
            outline(&events),
            vec![
                "+paragraph",
                "+inline",
                "+link",
                "text",
                "-link",
                "-inline",
                "-paragraph",
                "definition",
            ]
        );
        assert_eq!(
            events[2].tag,
            Tag::LinkReference {
                label: "Foo".to_owned(),
                reference_type: ReferenceType::Shortcut,
            }
        );
        assert_eq!(
            events[7].tag,
            Tag::Definition {
                label: "foo".to_owned(),
                url: "/url".to_owned(),
                title: Some("T".to_owned()),
            }
        );
        assert_eq!(events[7].map, Some(LineRange { start: 2, end: 3 }));
    }

    #[test]
    fn test_definition_inside_blockquote() {
        let events = tokenize("> [a]: /b\n");
        assert_eq!(outline(&events), vec!["+blockquote", "definition", "-blockquote"]);
    }

    #[test]
    fn test_duplicate_definitions_kept_in_place() {
        let events = tokenize("[foo]: /a\n[foo]: /b\n\n[foo]\n");
        assert_eq!(
            outline(&events),
            vec![
                "definition",
                "definition",
                "+paragraph",
                "+inline",
                "+link",
                "text",
                "-link",
                "-inline",
                "-paragraph",
            ]
        );
        let urls: Vec<_> = events
            .iter()
            .filter_map(|event| match &event.tag {
                Tag::Definition { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(urls, vec!["/a", "/b"]);
        assert_eq!(events[1].map, Some(LineRange { start: 1, end: 2 }));
    }

    #[test]
    fn test_repeated_duplicates_inside_blockquote() {
        let events = tokenize("> [x]: /1\n> [y]: /2\n> [x]: /3\n> [x]: /4\n");
        let labels: Vec<_> = events
            .iter()
            .filter_map(|event| match &event.tag {
                Tag::Definition { label, url, .. } => Some(format!("{label} {url}")),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["x /1", "y /2", "x /3", "x /4"]);
        assert_eq!(outline(&events).first().map(String::as_str), Some("+blockquote"));
        assert_eq!(outline(&events).last().map(String::as_str), Some("-blockquote"));
    }

    #[test]
    fn test_inline_link_normalized() {
        let events = tokenize("[x](</my uri> \"t\")\n");
        assert_eq!(
            events[2].tag,
            Tag::Link {
                url: "/my%20uri".to_owned(),
                title: Some("t".to_owned()),
            }
        );
    }

    #[test]
    fn test_email_autolink() {
        let events = tokenize("<foo@bar.example.com>\n");
        assert_eq!(
            events[2].tag,
            Tag::Link {
                url: "mailto:foo@bar.example.com".to_owned(),
                title: None,
            }
        );
        assert_eq!(events[2].markup, "autolink");
    }

    #[test]
    fn test_image_keeps_inner_events() {
        let events = tokenize("![a *b*](/i.png)\n");
        assert_eq!(
            outline(&events),
            vec![
                "+paragraph",
                "+inline",
                "+image",
                "text",
                "+em",
                "text",
                "-em",
                "-image",
                "-inline",
                "-paragraph",
            ]
        );
    }

    #[test]
    fn test_code_span_markup() {
        let events = tokenize("``a`b``\n");
        assert_eq!(events[2].tag, Tag::CodeInline("a`b".to_owned()));
        assert_eq!(events[2].markup, "``");
    }

    #[test]
    fn test_rule_and_setext_heading() {
        let events = tokenize("Title\n=====\n\n* * *\n");
        assert_eq!(events[0].tag, Tag::Heading { depth: 1 });
        assert_eq!(events[0].markup, "=");
        assert_eq!(events[0].map, Some(LineRange { start: 0, end: 2 }));
        let rule = events.last().unwrap();
        assert_eq!(rule.tag, Tag::Rule);
        assert_eq!(rule.markup, "***");
    }

    #[test]
    fn test_gfm_constructs_are_other_events() {
        let events = Tokenizer::new().with_gfm(true).tokenize("~~x~~\n");
        assert_eq!(events[2].tag, Tag::Other("s".to_owned()));

        let events = tokenize("~~x~~\n");
        assert!(!events.iter().any(|e| matches!(e.tag, Tag::Other(_))));
    }

    #[test]
    fn test_empty_document() {
        assert!(tokenize("").is_empty());
    }
}
