//! Source lookups: line numbers and delimiter recovery.
//!
//! The parser reports byte ranges but not the delimiters it consumed, so the
//! markup attached to events is read back from the source slice.

use std::ops::Range;

use amt_tree::LineRange;

/// Byte offset → zero-based line number index.
pub(crate) struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    pub(crate) fn line_of(&self, offset: usize) -> usize {
        self.starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Lines touched by `range`, end-exclusive.
    pub(crate) fn lines(&self, range: &Range<usize>) -> LineRange {
        let start = self.line_of(range.start);
        let end = if range.end > range.start {
            self.line_of(range.end - 1) + 1
        } else {
            start + 1
        };
        LineRange { start, end }
    }
}

/// Text of a block with leading indentation and blockquote markers removed.
fn block_text(slice: &str) -> &str {
    slice.trim_start_matches(|c: char| c == '>' || c.is_whitespace())
}

fn leading_run(text: &str, marker: char) -> String {
    text.chars().take_while(|&c| c == marker).collect()
}

/// `#` repeated for ATX headings, `=` or `-` for setext headings.
pub(crate) fn heading(slice: &str, depth: u8) -> String {
    if block_text(slice).starts_with('#') {
        return "#".repeat(usize::from(depth));
    }
    let underline = slice
        .lines()
        .rev()
        .map(block_text)
        .find(|line| !line.is_empty());
    match underline.and_then(|line| line.chars().next()) {
        Some('=') => "=".to_owned(),
        _ => "-".to_owned(),
    }
}

/// Bullet character or ordered delimiter of a list item.
pub(crate) fn list_marker(slice: &str) -> String {
    let text = block_text(slice).trim_start_matches(|c: char| c.is_ascii_digit());
    text.chars().next().map(String::from).unwrap_or_default()
}

/// Opening fence run of a fenced code block.
pub(crate) fn fence(slice: &str) -> String {
    let text = block_text(slice);
    match text.chars().next() {
        Some(marker @ ('`' | '~')) => leading_run(text, marker),
        _ => String::new(),
    }
}

/// Every marker character of a thematic break, spaces dropped.
pub(crate) fn rule(slice: &str) -> String {
    let text = block_text(slice).trim_end();
    match text.chars().next() {
        Some(marker) => text.chars().filter(|&c| c == marker).collect(),
        None => String::new(),
    }
}

/// `*` or `_` repeated `width` times, if the span starts with one.
pub(crate) fn emphasis(slice: &str, width: usize) -> String {
    match slice.chars().next() {
        Some(marker @ ('*' | '_')) => marker.to_string().repeat(width),
        _ => String::new(),
    }
}

/// Backtick run opening a code span.
pub(crate) fn code_span(slice: &str) -> String {
    leading_run(slice, '`')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("a\nbc\n\nd");
        assert_eq!(index.line_of(0), 0);
        assert_eq!(index.line_of(1), 0);
        assert_eq!(index.line_of(2), 1);
        assert_eq!(index.line_of(5), 2);
        assert_eq!(index.line_of(6), 3);
    }

    #[test]
    fn test_lines_exclude_trailing_newline_line() {
        let index = LineIndex::new("# Hi\n\ntext\n");
        assert_eq!(index.lines(&(0..5)), LineRange { start: 0, end: 1 });
        assert_eq!(index.lines(&(6..11)), LineRange { start: 2, end: 3 });
    }

    #[test]
    fn test_lines_empty_range() {
        let index = LineIndex::new("a\nb");
        assert_eq!(index.lines(&(2..2)), LineRange { start: 1, end: 2 });
    }

    #[test]
    fn test_heading_markup() {
        assert_eq!(heading("### x\n", 3), "###");
        assert_eq!(heading("> ## x", 2), "##");
        assert_eq!(heading("x\n===\n", 1), "=");
        assert_eq!(heading("x\ny\n---", 2), "-");
    }

    #[test]
    fn test_list_marker() {
        assert_eq!(list_marker("- a"), "-");
        assert_eq!(list_marker("  * a"), "*");
        assert_eq!(list_marker("12) a"), ")");
        assert_eq!(list_marker("> 3. a"), ".");
    }

    #[test]
    fn test_fence_markup() {
        assert_eq!(fence("````rust\nx\n````"), "````");
        assert_eq!(fence("~~~\n~~~"), "~~~");
        assert_eq!(fence("    indented"), "");
    }

    #[test]
    fn test_rule_markup() {
        assert_eq!(rule("***\n"), "***");
        assert_eq!(rule(" - - -"), "---");
        assert_eq!(rule("_____"), "_____");
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(emphasis("*a*", 1), "*");
        assert_eq!(emphasis("__a__", 2), "__");
        assert_eq!(emphasis("a", 1), "");
        assert_eq!(code_span("``a ` b``"), "``");
    }
}
