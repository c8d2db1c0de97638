//! Inline markup parsing: **bold**, *italic* and `code` spans within a paragraph
//! or list item.

/// Nesting depth past which delimiters are kept as literal text.
const MAX_NESTING: usize = 32;

/// Inline span. Text may contain newlines when it comes from a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Span<'a> {
    Text(&'a str),
    Strong(Vec<Span<'a>>),
    Emphasis(Vec<Span<'a>>),
    /// Verbatim content; never re-parsed and never escaped.
    Code(&'a str),
}

/// Parse **bold**, *italic* and `code` in a paragraph or list item.
///
/// Scans left to right. A delimiter opens a span only when a matching closer
/// with non-empty content follows; otherwise it stays literal text.
pub(crate) fn parse_spans(s: &str) -> Vec<Span<'_>> {
    parse_nested(s, 0)
}

fn parse_nested(s: &str, depth: usize) -> Vec<Span<'_>> {
    if depth >= MAX_NESTING {
        return vec![Span::Text(s)];
    }
    let bytes = s.as_bytes();
    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let found = match bytes[i] {
            b'*' if s[i..].starts_with("***") => strong_emphasis(s, i, depth)
                .or_else(|| emphasis(s, i, depth))
                .or_else(|| strong(s, i, depth)),
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                strong(s, i, depth).or_else(|| emphasis(s, i, depth))
            }
            b'*' => emphasis(s, i, depth),
            b'`' => code(s, i),
            _ => None,
        };
        match found {
            Some((span, end)) => {
                if plain_start < i {
                    spans.push(Span::Text(&s[plain_start..i]));
                }
                spans.push(span);
                i = end;
                plain_start = end;
            }
            None => i += 1,
        }
    }
    if plain_start < bytes.len() {
        spans.push(Span::Text(&s[plain_start..]));
    }
    spans
}

/// `**inner**` starting at `open`. Returns the span and the index after the closer.
fn strong(s: &str, open: usize, depth: usize) -> Option<(Span<'_>, usize)> {
    let start = open + 2;
    let end = start + s[start..].find("**")?;
    if end == start {
        return None;
    }
    Some((
        Span::Strong(parse_nested(&s[start..end], depth + 1)),
        end + 2,
    ))
}

/// `***inner***` starting at `open`: emphasis inside strong.
fn strong_emphasis(s: &str, open: usize, depth: usize) -> Option<(Span<'_>, usize)> {
    let start = open + 3;
    let end = start + s[start..].find("***")?;
    if end == start {
        return None;
    }
    let inner = Span::Emphasis(parse_nested(&s[start..end], depth + 2));
    Some((Span::Strong(vec![inner]), end + 3))
}

/// `*inner*` starting at `open`. The closer is the nearest `*` that is not part of `**`.
fn emphasis(s: &str, open: usize, depth: usize) -> Option<(Span<'_>, usize)> {
    let bytes = s.as_bytes();
    let start = open + 1;
    let mut j = start;
    while j < bytes.len() {
        if bytes[j] == b'*' {
            if bytes.get(j + 1) == Some(&b'*') {
                j += 2;
                continue;
            }
            if j == start {
                return None;
            }
            return Some((
                Span::Emphasis(parse_nested(&s[start..j], depth + 1)),
                j + 1,
            ));
        }
        j += 1;
    }
    None
}

/// `` `inner` `` starting at `open`.
fn code(s: &str, open: usize) -> Option<(Span<'_>, usize)> {
    let start = open + 1;
    let end = start + s[start..].find('`')?;
    if end == start {
        return None;
    }
    Some((Span::Code(&s[start..end]), end + 1))
}
