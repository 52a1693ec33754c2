//! Error types for tree construction.

/// Error while building a tree from an event stream.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The stream ended before an opening event was closed.
    #[error("unclosed `{tag}` event at index {index}")]
    Unclosed {
        /// Tag of the opening event.
        tag: String,
        /// Position of the opening event in the stream.
        index: usize,
    },

    /// A node had to start at an event whose nesting is neither 0 nor +1.
    #[error("invalid nesting {delta} for `{tag}` event at index {index}")]
    UnexpectedNesting {
        /// Tag of the offending event.
        tag: String,
        /// Position of the offending event in the stream.
        index: usize,
        /// Nesting delta the event reported.
        delta: i32,
    },

    /// No transform is registered for the event's tag.
    #[error("no transform for event type `{tag}`")]
    UnknownEvent {
        /// Tag name of the event.
        tag: String,
    },
}

impl BuildError {
    /// Whether the stream violated the nesting contract.
    #[must_use]
    pub fn is_structure_error(&self) -> bool {
        matches!(self, Self::Unclosed { .. } | Self::UnexpectedNesting { .. })
    }
}
