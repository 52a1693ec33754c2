/// Escape text for HTML content and double-quoted attribute values.
///
/// Only `&`, `<`, `>` and `"` are replaced; apostrophes pass through, as in
/// CommonMark reference output.
///
/// # Examples
///
/// ```
/// use amt_html::escape_html;
///
/// assert_eq!(escape_html("<a> & 'b'"), "&lt;a&gt; &amp; 'b'");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    push_escaped(&mut result, s);
    result
}

/// Append `s` to `out`, escaped like [`escape_html`].
pub(crate) fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
