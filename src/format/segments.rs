//! Block segmentation: split content into paragraphs, list items, line breaks
//! and fenced code blocks.

use super::markdown::{Span, parse_spans};

const FENCE: &str = "```";

/// Marker that introduced a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListMarker {
    /// `- item`
    Bullet,
    /// `1. item`
    Numbered,
}

/// Block-level token of a message, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Block<'a> {
    /// Consecutive ordinary lines. Inner newlines stay in the span text.
    Paragraph(Vec<Span<'a>>),
    /// A list item with its marker stripped.
    Item {
        marker: ListMarker,
        spans: Vec<Span<'a>>,
    },
    /// A newline ending a paragraph or a list item.
    Break,
    /// A fenced code block. `code` is trimmed, not escaped.
    CodeBlock { lang: &'a str, code: &'a str },
}

/// Parse message content into blocks with a single left-to-right scan.
///
/// A fence opens only at the start of a line and closes at the next triple
/// backtick anywhere. An unclosed fence runs to the end of the content.
/// Lines that are neither list items nor fences collect into one paragraph,
/// so inline spans may cross their newlines.
pub(crate) fn parse_blocks(content: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut paragraph: Option<usize> = None;
    let mut pos = 0;
    // False right after a closing fence: the rest of that line is not a line start.
    let mut at_line_start = true;
    while pos < content.len() {
        let rest = &content[pos..];
        if at_line_start && rest.starts_with(FENCE) {
            flush_paragraph(content, paragraph.take(), pos, &mut blocks);
            let (block, consumed) = code_block(&rest[FENCE.len()..]);
            blocks.push(block);
            pos += FENCE.len() + consumed;
            at_line_start = false;
            continue;
        }

        let (line, line_len) = match rest.find('\n') {
            Some(idx) => (&rest[..idx], idx + 1),
            None => (rest, rest.len()),
        };
        let item = if at_line_start { list_item(line) } else { None };
        match item {
            Some(item) => {
                flush_paragraph(content, paragraph.take(), pos, &mut blocks);
                blocks.push(item);
                if line_len > line.len() {
                    blocks.push(Block::Break);
                }
            }
            None => {
                paragraph.get_or_insert(pos);
            }
        }
        pos += line_len;
        at_line_start = true;
    }
    flush_paragraph(content, paragraph, content.len(), &mut blocks);
    blocks
}

/// Body and language tag after an opening fence. Returns the block and the bytes consumed.
fn code_block(after: &str) -> (Block<'_>, usize) {
    let lang_end = after
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(after.len());
    let lang = &after[..lang_end];
    let body = &after[lang_end..];
    match body.find(FENCE) {
        Some(end) => (
            Block::CodeBlock {
                lang,
                code: body[..end].trim(),
            },
            lang_end + end + FENCE.len(),
        ),
        None => (
            Block::CodeBlock {
                lang,
                code: body.trim(),
            },
            after.len(),
        ),
    }
}

/// Emit the paragraph `content[start..end]`. Its terminating newline becomes a break.
fn flush_paragraph<'a>(
    content: &'a str,
    start: Option<usize>,
    end: usize,
    blocks: &mut Vec<Block<'a>>,
) {
    let Some(start) = start else {
        return;
    };
    let text = &content[start..end];
    let (text, newline) = match text.strip_suffix('\n') {
        Some(t) => (t, true),
        None => (text, false),
    };
    if !text.is_empty() {
        blocks.push(Block::Paragraph(parse_spans(text)));
    }
    if newline {
        blocks.push(Block::Break);
    }
}

fn list_item(line: &str) -> Option<Block<'_>> {
    if let Some(item) = line.strip_prefix("- ") {
        return Some(Block::Item {
            marker: ListMarker::Bullet,
            spans: parse_spans(item),
        });
    }
    parse_numbered_list_prefix(line).map(|item| Block::Item {
        marker: ListMarker::Numbered,
        spans: parse_spans(item),
    })
}

/// Parse "N. " at the start of a line. Returns the rest after the marker.
fn parse_numbered_list_prefix(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}
