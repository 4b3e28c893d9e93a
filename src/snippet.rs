use regex::RegexBuilder;

use crate::render::escape_html;

/// Marker appended to excerpts that (may) continue past what is shown.
pub const ELLIPSIS: char = '\u{2026}';

/// Builds the highlighted HTML fragment shown under a result title.
///
/// The first case-insensitive occurrence of `query` picks the excerpt: a
/// window of roughly `max_chars` bytes centered on the match. Every
/// occurrence inside the window is wrapped in `<b>` with its original
/// casing. A windowed excerpt always ends in an ellipsis, even when the
/// window happens to reach the end of the text. Without a match the head of
/// the text is returned, ellipsized only if something was cut off.
///
/// The query is escaped before the match pattern is built, so regex
/// metacharacters match literally, and all text is HTML-escaped on the way
/// out; the only markup in the returned fragment is the `<b>` pairs.
pub fn make_snippet(text: &str, query: &str, max_chars: usize) -> String {
    let matcher = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build();
    let matcher = match matcher {
        Ok(matcher) => matcher,
        Err(_) => return leading_excerpt(text, max_chars),
    };

    let Some(first) = matcher.find(text) else {
        return leading_excerpt(text, max_chars);
    };

    let start = floor_char_boundary(text, first.start().saturating_sub(max_chars / 2));
    let end = floor_char_boundary(text, (start + max_chars).min(text.len()));
    let window = &text[start..end];

    let mut out = String::with_capacity(window.len() + 32);
    let mut rest = 0;
    for hit in matcher.find_iter(window) {
        out.push_str(&escape_html(&window[rest..hit.start()]));
        out.push_str("<b>");
        out.push_str(&escape_html(hit.as_str()));
        out.push_str("</b>");
        rest = hit.end();
    }
    out.push_str(&escape_html(&window[rest..]));
    out.push(ELLIPSIS);
    out
}

fn leading_excerpt(text: &str, max_chars: usize) -> String {
    if text.len() <= max_chars {
        return escape_html(text);
    }
    let cut = floor_char_boundary(text, max_chars);
    let mut out = escape_html(&text[..cut]);
    out.push(ELLIPSIS);
    out
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
