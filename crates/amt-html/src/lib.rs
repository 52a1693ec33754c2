//! HTML rendering for `amt-tree` documents.
//!
//! [`HtmlRenderer`] turns a built [`Tree`](amt_tree::Tree) into an HTML
//! fragment matching CommonMark reference output. [`markdown_to_html`] runs
//! the whole pipeline: tokenize, build, render.
//!
//! # Example
//!
//! ```
//! let html = amt_html::markdown_to_html("# Hi\n\nA *b* c.\n").unwrap();
//! assert_eq!(html, "<h1>Hi</h1>\n<p>A <em>b</em> c.</p>\n");
//! ```

mod error;
mod escape;
mod renderer;

pub use error::{Error, RenderError};
pub use escape::escape_html;
pub use renderer::{HtmlRenderer, NodeHandler};

/// Render CommonMark text to HTML with default settings.
pub fn markdown_to_html(markdown: &str) -> Result<String, Error> {
    let events = amt_cmark::tokenize(markdown);
    let tree = amt_tree::build(&events)?;
    Ok(HtmlRenderer::new().render(&tree)?)
}
