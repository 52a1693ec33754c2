//! Link destination normalization.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left as-is in link destinations, besides ASCII alphanumerics.
const HREF_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b',')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Percent-encode a link destination for use in an `href` or `src`.
///
/// Existing `%XX` escapes are kept; a `%` that does not start one is
/// encoded as `%25`. Non-ASCII characters are encoded as UTF-8 bytes.
///
/// # Examples
///
/// ```
/// use amt_cmark::normalize_link;
///
/// assert_eq!(normalize_link("/my uri"), "/my%20uri");
/// assert_eq!(normalize_link("foo%20bä"), "foo%20b%C3%A4");
/// ```
#[must_use]
pub fn normalize_link(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut rest = url;

    while let Some(pos) = rest.find('%') {
        let (before, after) = rest.split_at(pos);
        out.extend(utf8_percent_encode(before, HREF_ENCODE_SET));

        match after.get(..3).filter(|escape| is_escape(escape)) {
            Some(escape) => {
                out.push_str(escape);
                rest = &after[3..];
            }
            None => {
                out.push_str("%25");
                rest = &after[1..];
            }
        }
    }
    out.extend(utf8_percent_encode(rest, HREF_ENCODE_SET));
    out
}

fn is_escape(candidate: &str) -> bool {
    candidate.bytes().skip(1).all(|b| b.is_ascii_hexdigit())
}
