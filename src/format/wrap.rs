//! Plain-terminal layout of raw message text.
//!
//! Each source line wraps on its own. List items keep a hanging indent under
//! their marker, and lines inside fenced code blocks are never wrapped.

use std::borrow::Cow;

use textwrap::Options;

/// Width of a leading `- ` or `N. ` marker, 0 for ordinary lines.
fn marker_width(line: &str) -> usize {
    if line.starts_with("- ") {
        return 2;
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && line[digits..].starts_with(". ") {
        digits + 2
    } else {
        0
    }
}

/// Lay out a message for the terminal, wrapping to `width` columns.
/// A width of 0 disables wrapping; newlines and blank lines are kept either way.
pub(crate) fn wrap_message(msg: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut in_code = false;
    for line in msg.split('\n') {
        if line.starts_with("```") {
            in_code = !in_code;
            out.push(line.to_string());
            continue;
        }
        if in_code || width == 0 || line.is_empty() {
            out.push(line.to_string());
            continue;
        }
        let indent = " ".repeat(marker_width(line));
        let options = Options::new(width).subsequent_indent(&indent);
        out.extend(textwrap::wrap(line, options).into_iter().map(Cow::into_owned));
    }
    out
}
