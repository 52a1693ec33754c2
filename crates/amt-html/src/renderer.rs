//! Tree → HTML renderer.

use std::collections::HashMap;
use std::fmt::Write;

use amt_tree::{NodeKind, NodeRef, Tree, WalkEvent};

use crate::error::RenderError;
use crate::escape::push_escaped;

/// Renders a node type the core vocabulary does not cover.
///
/// Register implementations with [`HtmlRenderer::with_handler`] under the
/// name of the custom node they handle.
///
/// # Example
///
/// ```
/// use amt_html::{HtmlRenderer, NodeHandler};
/// use amt_tree::NodeRef;
///
/// struct Math;
///
/// impl NodeHandler for Math {
///     fn enter(&self, node: NodeRef<'_>, out: &mut String) {
///         out.push_str(r#"<span class="math">"#);
///         out.push_str(node.attrs().value.as_deref().unwrap_or_default());
///     }
///
///     fn exit(&self, _node: NodeRef<'_>, out: &mut String) -> bool {
///         out.push_str("</span>");
///         true
///     }
/// }
///
/// let renderer = HtmlRenderer::new().with_handler("math", Math);
/// ```
pub trait NodeHandler: Send + Sync {
    /// Write the markup emitted before the node's children.
    fn enter(&self, node: NodeRef<'_>, out: &mut String);

    /// Write the markup emitted after the node's children.
    ///
    /// Returns `false` if the node has no closing markup, which is the
    /// default.
    fn exit(&self, _node: NodeRef<'_>, _out: &mut String) -> bool {
        false
    }
}

/// HTML renderer producing CommonMark reference output.
///
/// Walks the tree depth-first, writing opening markup on the way down and
/// closing markup on the way back up. Block nodes are separated by single
/// newlines; paragraphs of tight lists render without `<p>` tags.
pub struct HtmlRenderer {
    handlers: HashMap<String, Box<dyn NodeHandler>>,
    skip_unknown: bool,
}

impl HtmlRenderer {
    /// Create a renderer that fails on custom nodes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            skip_unknown: false,
        }
    }

    /// Register a handler for custom nodes named `name`.
    ///
    /// A later registration under the same name replaces the earlier one.
    #[must_use]
    pub fn with_handler<H: NodeHandler + 'static>(
        mut self,
        name: impl Into<String>,
        handler: H,
    ) -> Self {
        self.handlers.insert(name.into(), Box::new(handler));
        self
    }

    /// Skip custom nodes without a handler instead of failing.
    ///
    /// Only the node's own markup is dropped; its children still render.
    #[must_use]
    pub fn with_skip_unknown(mut self, enabled: bool) -> Self {
        self.skip_unknown = enabled;
        self
    }

    /// Render a tree to an HTML fragment.
    pub fn render(&self, tree: &Tree) -> Result<String, RenderError> {
        let mut out = String::with_capacity(4096);
        for event in tree.walk() {
            match event {
                WalkEvent::Enter(node) => {
                    self.enter(node, &mut out)?;
                    if newline_after_enter(node) {
                        out.push('\n');
                    }
                }
                WalkEvent::Exit(node) => {
                    if self.exit(node, &mut out) && newline_after_exit(node) {
                        out.push('\n');
                    }
                }
            }
        }
        tracing::debug!(nodes = tree.len(), bytes = out.len(), "Rendered HTML");
        Ok(out)
    }

    fn enter(&self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        let attrs = node.attrs();
        let value = attrs.value.as_deref().unwrap_or_default();
        match node.kind() {
            NodeKind::Root | NodeKind::Definition => {}
            NodeKind::Paragraph => {
                if !node.is_tight_paragraph() {
                    out.push_str("<p>");
                }
            }
            NodeKind::Text => push_escaped(out, value),
            NodeKind::Break => out.push_str("<br />\n"),
            NodeKind::Html => out.push_str(value),
            NodeKind::Heading => write!(out, "<h{}>", heading_depth(node)).unwrap(),
            NodeKind::List => match (attrs.ordered, attrs.start) {
                (Some(true), Some(start)) => write!(out, r#"<ol start="{start}">"#).unwrap(),
                (Some(true), None) => out.push_str("<ol>"),
                _ => out.push_str("<ul>"),
            },
            NodeKind::ListItem => out.push_str("<li>"),
            NodeKind::InlineCode => {
                out.push_str("<code>");
                push_escaped(out, value);
                out.push_str("</code>");
            }
            NodeKind::Code => {
                match attrs.lang.as_deref() {
                    Some(lang) => {
                        out.push_str(r#"<pre><code class="language-"#);
                        push_escaped(out, lang);
                        out.push_str(r#"">"#);
                    }
                    None => out.push_str("<pre><code>"),
                }
                push_escaped(out, value);
                out.push_str("</code></pre>");
            }
            NodeKind::Blockquote => out.push_str("<blockquote>"),
            NodeKind::ThematicBreak => out.push_str("<hr />\n"),
            NodeKind::Emphasis => out.push_str("<em>"),
            NodeKind::Strong => out.push_str("<strong>"),
            NodeKind::Link => {
                push_anchor(out, attrs.url.as_deref(), attrs.title.as_deref());
            }
            NodeKind::LinkReference => {
                let (url, title) = resolve(node)?;
                push_anchor(out, Some(url), title);
            }
            NodeKind::Image => push_image(
                out,
                attrs.url.as_deref(),
                attrs.alt.as_deref(),
                attrs.title.as_deref(),
            ),
            NodeKind::ImageReference => {
                let (url, title) = resolve(node)?;
                push_image(out, Some(url), attrs.alt.as_deref(), title);
            }
            NodeKind::Custom(name) => match self.handlers.get(name) {
                Some(handler) => handler.enter(node, out),
                None if self.skip_unknown => {
                    tracing::debug!(kind = %name, "Skipping node without handler");
                }
                None => return Err(RenderError::UnknownNode { kind: name.clone() }),
            },
        }
        Ok(())
    }

    /// Write closing markup. Returns whether the node type has any.
    fn exit(&self, node: NodeRef<'_>, out: &mut String) -> bool {
        match node.kind() {
            NodeKind::Paragraph => {
                if !node.is_tight_paragraph() {
                    out.push_str("</p>");
                }
            }
            NodeKind::Heading => write!(out, "</h{}>", heading_depth(node)).unwrap(),
            NodeKind::List => {
                if node.attrs().ordered == Some(true) {
                    out.push_str("</ol>");
                } else {
                    out.push_str("</ul>");
                }
            }
            NodeKind::ListItem => out.push_str("</li>"),
            NodeKind::Blockquote => out.push_str("</blockquote>"),
            NodeKind::Emphasis => out.push_str("</em>"),
            NodeKind::Strong => out.push_str("</strong>"),
            NodeKind::Link | NodeKind::LinkReference => out.push_str("</a>"),
            NodeKind::Custom(name) => {
                return self
                    .handlers
                    .get(name)
                    .is_some_and(|handler| handler.exit(node, out));
            }
            NodeKind::Root
            | NodeKind::Text
            | NodeKind::Break
            | NodeKind::Html
            | NodeKind::InlineCode
            | NodeKind::Code
            | NodeKind::Definition
            | NodeKind::ThematicBreak
            | NodeKind::Image
            | NodeKind::ImageReference => return false,
        }
        true
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn heading_depth(node: NodeRef<'_>) -> u8 {
    node.attrs().depth.unwrap_or(1)
}

/// Look up the definition a reference node points at.
fn resolve<'a>(node: NodeRef<'a>) -> Result<(&'a str, Option<&'a str>), RenderError> {
    let identifier = node.attrs().identifier.as_deref().unwrap_or_default();
    let definition = node
        .definitions()
        .and_then(|table| table.get(identifier))
        .ok_or_else(|| RenderError::UnresolvedReference {
            identifier: identifier.to_owned(),
        })?;
    Ok((&definition.url, definition.title.as_deref()))
}

fn push_title(out: &mut String, title: Option<&str>) {
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        out.push_str(r#" title=""#);
        push_escaped(out, title);
        out.push('"');
    }
}

fn push_anchor(out: &mut String, url: Option<&str>, title: Option<&str>) {
    out.push_str(r#"<a href=""#);
    push_escaped(out, url.unwrap_or_default());
    out.push('"');
    push_title(out, title);
    out.push('>');
}

fn push_image(out: &mut String, url: Option<&str>, alt: Option<&str>, title: Option<&str>) {
    out.push_str(r#"<img src=""#);
    push_escaped(out, url.unwrap_or_default());
    out.push_str(r#"" alt=""#);
    push_escaped(out, alt.unwrap_or_default());
    out.push('"');
    push_title(out, title);
    out.push_str(" />");
}

fn newline_after_enter(node: NodeRef<'_>) -> bool {
    match node.kind() {
        NodeKind::Blockquote | NodeKind::Code | NodeKind::List => {
            !node.first_child().is_some_and(|c| c.is_tight_paragraph())
        }
        NodeKind::ListItem => {
            node.has_children() && !node.first_child().is_some_and(|c| c.is_tight_paragraph())
        }
        _ => false,
    }
}

fn newline_after_exit(node: NodeRef<'_>) -> bool {
    if node.is_tight_paragraph() {
        return node.next_sibling().is_some();
    }
    matches!(
        node.kind(),
        NodeKind::Blockquote
            | NodeKind::Code
            | NodeKind::Heading
            | NodeKind::Html
            | NodeKind::List
            | NodeKind::ListItem
            | NodeKind::Paragraph
    )
}
