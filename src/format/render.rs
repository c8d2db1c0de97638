//! HTML rendering of parsed blocks and spans.

use super::escape::escape_html;
use super::markdown::Span;
use super::segments::{Block, ListMarker};

/// Render blocks to an HTML fragment.
pub(crate) fn render_blocks(blocks: &[Block<'_>]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < blocks.len() {
        match &blocks[i] {
            Block::Paragraph(spans) => render_spans(spans, &mut out),
            Block::Break => out.push_str("<br>"),
            Block::CodeBlock { lang, code } => render_code_block(lang, code, &mut out),
            Block::Item { .. } => {
                i = render_list(blocks, i, &mut out);
                continue;
            }
        }
        i += 1;
    }
    out
}

/// Render the run of list items starting at `start`. Returns the index after the run.
///
/// Items separated by exactly one break form one run. A run holding any
/// numbered item is an ordered list.
fn render_list(blocks: &[Block<'_>], start: usize, out: &mut String) -> usize {
    let mut items = Vec::new();
    let mut ordered = false;
    let mut i = start;
    while let Some(Block::Item { marker, spans }) = blocks.get(i) {
        ordered |= *marker == ListMarker::Numbered;
        items.push(spans);
        let continues = matches!(blocks.get(i + 1), Some(Block::Break))
            && matches!(blocks.get(i + 2), Some(Block::Item { .. }));
        if !continues {
            i += 1;
            break;
        }
        i += 2;
    }

    let tag = if ordered { "ol" } else { "ul" };
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for spans in items {
        out.push_str("<li>");
        render_spans(spans, out);
        out.push_str("</li>");
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    i
}

fn render_code_block(lang: &str, code: &str, out: &mut String) {
    out.push_str(r#"<div class="code-block"><pre><code class="language-"#);
    out.push_str(lang);
    out.push_str(r#"">"#);
    out.push_str(&escape_html(code));
    out.push_str("</code></pre></div>");
}

fn render_spans(spans: &[Span<'_>], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(text) => push_lines(text, out),
            Span::Strong(inner) => {
                out.push_str("<strong>");
                render_spans(inner, out);
                out.push_str("</strong>");
            }
            Span::Emphasis(inner) => {
                out.push_str("<em>");
                render_spans(inner, out);
                out.push_str("</em>");
            }
            Span::Code(code) => {
                out.push_str("<code>");
                push_lines(code, out);
                out.push_str("</code>");
            }
        }
    }
}

/// Append span text, turning newlines into `<br>`.
fn push_lines(text: &str, out: &mut String) {
    let mut lines = text.split('\n');
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push_str("<br>");
        out.push_str(line);
    }
}
