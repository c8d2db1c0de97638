//! Message formatting: chat markup to HTML fragments, transcript pages and
//! terminal wrapping.
//!
//! The supported dialect is small: `**bold**`, `*italic*`, `` `code` ``,
//! fenced code blocks, `- ` bullet items, `1. ` numbered items and newlines.
//! Only fenced code bodies are escaped; the rest of the text is trusted.

mod document;
mod escape;
mod markdown;
mod render;
mod segments;
mod wrap;

pub(crate) use document::render_document;
pub(crate) use wrap::wrap_message;

/// Format message content as an HTML fragment.
///
/// Never fails: unmatched or malformed markup is kept as literal text.
/// Apply once per raw message; formatting HTML output again is not supported.
pub(crate) fn format(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    render::render_blocks(&segments::parse_blocks(content))
}
