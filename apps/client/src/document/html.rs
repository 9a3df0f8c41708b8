//! HTML fragment helpers for section content.
//!
//! The parser escapes text first and wraps markup around the escaped form.
//! `section_plain_lines` is the inverse used by the exporters: markup is
//! stripped back to plain lines, with list items re-prefixed by the bullet
//! glyph so a bullet survives the round trip.

/// Escapes the HTML-unsafe characters (`&`, `<`, `>`).
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverses [`escape`]. `&amp;` is handled last so double-escaped input
/// stays double-escaped.
pub fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Tags whose end marks a line boundary in the plain-text projection.
const BLOCK_CLOSERS: &[&str] = &["/p", "/li", "/div", "/h1", "/h2", "/h3"];

/// Converts a section's HTML content back to plain lines.
///
/// Block boundaries (`<br>`, closing block tags) become line breaks, list
/// items are re-prefixed with `• `, all other markup is dropped, entities
/// are unescaped, and empty lines are discarded.
pub fn section_plain_lines(html: &str) -> Vec<String> {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            // Unterminated tag: treat the remainder as literal text.
            text.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = after[..close].trim().to_lowercase();
        let name = tag
            .split(|c: char| c.is_whitespace() || c == '/')
            .find(|part| !part.is_empty())
            .unwrap_or("");

        if tag.starts_with("br") {
            text.push('\n');
        } else if BLOCK_CLOSERS.iter().any(|closer| tag.starts_with(closer)) {
            text.push('\n');
        } else if name == "li" && !tag.starts_with('/') {
            text.push_str("• ");
        }
        rest = &after[close + 1..];
    }
    text.push_str(rest);

    text.split('\n')
        .map(|line| unescape(line.trim_end()))
        .filter(|line| !line.trim().is_empty())
        .collect()
}
