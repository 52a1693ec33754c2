//! JSON interchange format.
//!
//! A node serializes as an object with a `type`, its set attributes (camel
//! case), optional `data` and `position`, and `children` when it has any.
//! The root always lists `children` and carries `data.definitions` when the
//! document declared references.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::definitions::{Definition, ReferenceTable};
use crate::node::{Point, Position};
use crate::tree::{NodeRef, Tree};

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let attrs = self.attrs();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind().name())?;

        if let Some(depth) = attrs.depth {
            map.serialize_entry("depth", &depth)?;
        }
        if let Some(ordered) = attrs.ordered {
            map.serialize_entry("ordered", &ordered)?;
        }
        if let Some(start) = attrs.start {
            map.serialize_entry("start", &start)?;
        }
        if let Some(spread) = attrs.spread {
            map.serialize_entry("spread", &spread)?;
        }
        let strings = [
            ("lang", &attrs.lang),
            ("meta", &attrs.meta),
            ("value", &attrs.value),
            ("url", &attrs.url),
            ("title", &attrs.title),
            ("alt", &attrs.alt),
            ("identifier", &attrs.identifier),
            ("label", &attrs.label),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                map.serialize_entry(key, value)?;
            }
        }
        if let Some(reference_type) = attrs.reference_type {
            map.serialize_entry("referenceType", reference_type.as_str())?;
        }

        let definitions = if self.is_root() {
            self.definitions()
        } else {
            None
        };
        if self.markup().is_some() || definitions.is_some() {
            map.serialize_entry(
                "data",
                &NodeExtra {
                    markup: self.markup(),
                    definitions,
                },
            )?;
        }
        if let Some(position) = self.position() {
            map.serialize_entry("position", &position)?;
        }
        if self.has_children() || self.is_root() {
            map.serialize_entry("children", &ChildList(*self))?;
        }
        map.end()
    }
}

struct NodeExtra<'a> {
    markup: Option<&'a str>,
    definitions: Option<&'a ReferenceTable>,
}

impl Serialize for NodeExtra<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(markup) = self.markup {
            map.serialize_entry("markup", markup)?;
        }
        if let Some(definitions) = self.definitions {
            map.serialize_entry("definitions", definitions)?;
        }
        map.end()
    }
}

struct ChildList<'a>(NodeRef<'a>);

impl Serialize for ChildList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.children())
    }
}

impl Serialize for ReferenceTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Sorted for stable output.
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        serializer.collect_map(entries)
    }
}

impl Serialize for Definition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("url", &self.url)?;
        if let Some(title) = &self.title {
            map.serialize_entry("title", title)?;
        }
        map.end()
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("start", &self.start)?;
        map.serialize_entry("end", &self.end)?;
        map.end()
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("line", &self.line)?;
        map.serialize_entry("column", &self.column)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::builder::build;
    use crate::event::{Event, Tag};

    #[test]
    fn test_tree_serializes_to_interchange_format() {
        let events = vec![
            Event::terminal(Tag::Definition {
                label: "Foo".to_owned(),
                url: "/x".to_owned(),
                title: Some("T".to_owned()),
            })
            .with_map(0, 1),
            Event::open(Tag::Heading { depth: 2 })
                .with_markup("##")
                .with_map(2, 3),
            Event::open(Tag::Inline),
            Event::text("Hi"),
            Event::close(Tag::Inline),
            Event::close(Tag::Heading { depth: 2 }),
        ];
        let tree = build(&events).unwrap();
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "root",
                "data": {
                    "definitions": {
                        "FOO": { "url": "/x", "title": "T" }
                    }
                },
                "children": [
                    {
                        "type": "definition",
                        "url": "/x",
                        "title": "T",
                        "identifier": "FOO",
                        "label": "Foo",
                        "position": {
                            "start": { "line": 1, "column": 1 },
                            "end": { "line": 2, "column": 1 }
                        }
                    },
                    {
                        "type": "heading",
                        "depth": 2,
                        "data": { "markup": "##" },
                        "position": {
                            "start": { "line": 3, "column": 1 },
                            "end": { "line": 4, "column": 1 }
                        },
                        "children": [
                            { "type": "text", "value": "Hi" }
                        ]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_empty_root_lists_children() {
        let tree = build(&[]).unwrap();
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(value, json!({ "type": "root", "children": [] }));
    }
}
