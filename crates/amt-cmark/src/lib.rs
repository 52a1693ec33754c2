//! CommonMark tokenizer for `amt-tree`.
//!
//! Parses Markdown with `pulldown-cmark` and reshapes the result into the
//! flat open/close/terminal event stream that [`amt_tree::TreeBuilder`]
//! consumes.
//!
//! # Example
//!
//! ```
//! use amt_tree::{NodeKind, build};
//!
//! let events = amt_cmark::tokenize("- one\n- two\n");
//! let tree = build(&events).unwrap();
//! let list = tree.root().first_child().unwrap();
//! assert_eq!(list.kind(), &NodeKind::List);
//! assert_eq!(list.attrs().spread, Some(false));
//! ```

mod link;
mod source;
mod tokenizer;

pub use link::normalize_link;
pub use tokenizer::{Tokenizer, tokenize};

#[cfg(test)]
mod tests {
    use amt_tree::{NodeKind, ReferenceType, build};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_tokens_build_into_tree() {
        let tree = build(&tokenize("> [ref]: /u 'T'\n\n[x][ref]\n")).unwrap();
        let kinds: Vec<_> = tree.iter().map(|node| node.kind().name().to_owned()).collect();
        assert_eq!(
            kinds,
            vec![
                "root",
                "blockquote",
                "definition",
                "paragraph",
                "linkReference",
                "text",
            ]
        );

        let definition = tree.definitions().unwrap().get("REF").unwrap();
        assert_eq!(definition.url, "/u");
        assert_eq!(definition.title.as_deref(), Some("T"));

        let reference = tree.iter().find(|n| n.kind() == &NodeKind::LinkReference).unwrap();
        assert_eq!(reference.attrs().reference_type, Some(ReferenceType::Full));
        assert_eq!(reference.attrs().identifier.as_deref(), Some("REF"));
    }

    #[test]
    fn test_unknown_reference_falls_back_to_link() {
        let tree = build(&tokenize("[x][nope]\n")).unwrap();
        assert!(tree.iter().all(|n| n.kind() != &NodeKind::LinkReference));
    }

    #[test]
    fn test_positions_from_tokens() {
        let tree = build(&tokenize("a\n\n# b\n")).unwrap();
        let heading = tree.root().child(1).unwrap();
        let position = heading.position().unwrap();
        assert_eq!(position.start.line, 3);
        assert_eq!(position.end.line, 4);
    }
}
