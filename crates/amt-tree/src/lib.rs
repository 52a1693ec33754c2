//! Abstract markup tree (AMT) for CommonMark documents.
//!
//! This crate turns the flat, nesting-annotated event stream produced by a
//! markdown tokenizer into a typed tree, and exposes read-only navigation
//! over it.
//!
//! # Architecture
//!
//! - [`Event`]: one tokenizer event (tag + payload, nesting delta, markup, lines)
//! - [`TreeBuilder`]: single-pass event stream to [`Tree`] conversion
//! - [`Tree`] / [`NodeRef`]: arena storage with parent, sibling and root navigation
//! - [`ReferenceTable`]: link reference definitions collected during the build
//!
//! With the `serde` feature, [`Tree`] serializes to the JSON interchange
//! format (`type`, attributes, `children`).
//!
//! # Example
//!
//! ```
//! use amt_tree::{Event, NodeKind, Tag, build};
//!
//! let events = vec![
//!     Event::open(Tag::Heading { depth: 1 }),
//!     Event::open(Tag::Inline),
//!     Event::text("Hi"),
//!     Event::close(Tag::Inline),
//!     Event::close(Tag::Heading { depth: 1 }),
//! ];
//! let tree = build(&events).unwrap();
//! let heading = tree.root().first_child().unwrap();
//! assert_eq!(*heading.kind(), NodeKind::Heading);
//! assert_eq!(heading.attrs().depth, Some(1));
//! ```

mod builder;
mod definitions;
mod error;
mod event;
#[cfg(feature = "serde")]
mod json;
mod node;
mod tree;

pub use builder::{EventTransform, TreeBuilder, build};
pub use definitions::{Definition, ReferenceTable, normalize_identifier};
pub use error::BuildError;
pub use event::{Event, LineRange, Nesting, ReferenceType, Tag};
pub use node::{Attributes, NodeData, NodeKind, Point, Position};
pub use tree::{Children, NodeId, NodeRef, Tree, Walk, WalkEvent};
