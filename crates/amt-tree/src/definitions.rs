//! Link reference definitions collected while building a tree.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Target of a link reference definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub url: String,
    pub title: Option<String>,
}

/// Identifier → definition index for one document.
///
/// Keys are normalized with [`normalize_identifier`], so lookups match labels
/// case-insensitively and regardless of internal whitespace. The first
/// definition of an identifier wins; later duplicates are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    entries: HashMap<String, Definition>,
}

impl ReferenceTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. Returns `false` if the identifier was already defined.
    pub fn insert(&mut self, identifier: &str, definition: Definition) -> bool {
        match self.entries.entry(normalize_identifier(identifier)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(definition);
                true
            }
        }
    }

    /// Look up a definition by identifier or raw label.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Definition> {
        self.entries
            .get(identifier)
            .or_else(|| self.entries.get(&normalize_identifier(identifier)))
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(identifier, definition)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Definition)> {
        self.entries.iter().map(|(id, def)| (id.as_str(), def))
    }
}

/// Normalize a reference label for matching.
///
/// Strips surrounding whitespace, collapses internal whitespace runs to one
/// space and applies Unicode case folding, so `Foo  Bar` and `foo bar` match
/// and `ẞ` matches `SS`.
///
/// # Examples
///
/// ```
/// use amt_tree::normalize_identifier;
///
/// assert_eq!(normalize_identifier("  Foo \n bar "), "FOO BAR");
/// assert_eq!(normalize_identifier("ẞ"), normalize_identifier("ss"));
/// ```
#[must_use]
pub fn normalize_identifier(label: &str) -> String {
    let collapsed = label.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase().to_uppercase()
}
