//! Error types for rendering.

use amt_tree::BuildError;

/// Error while rendering a tree to HTML.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A custom node type has no registered handler.
    #[error("no handler for node type `{kind}`")]
    UnknownNode {
        /// Node type name.
        kind: String,
    },

    /// A link or image reference names an identifier with no definition.
    #[error("reference `{identifier}` has no definition")]
    UnresolvedReference {
        /// Normalized identifier of the reference.
        identifier: String,
    },
}

/// Error from the one-call Markdown → HTML pipeline.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Event stream could not be built into a tree.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Tree could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
}
