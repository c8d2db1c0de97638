//! HTML entity escaping for text embedded in generated markup.

use std::borrow::Cow;

/// Replace `&`, `<`, `>`, `"` and `'` with their HTML entities.
///
/// Every other character is copied unchanged. Returns the input borrowed when
/// it contains nothing to escape.
pub(crate) fn escape_html(text: &str) -> Cow<'_, str> {
    let Some(first) = text.find(['&', '<', '>', '"', '\'']) else {
        return Cow::Borrowed(text);
    };
    let mut out = String::with_capacity(text.len() + text.len() / 8 + 8);
    out.push_str(&text[..first]);
    for c in text[first..].chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_empty() {
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn escape_plain_text_is_borrowed() {
        let out = escape_html("plain text, no markup");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "plain text, no markup");
    }

    #[test]
    fn escape_markup() {
        assert_eq!(escape_html("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn escape_ampersand_first_in_output_order() {
        assert_eq!(escape_html("a && b < c"), "a &amp;&amp; b &lt; c");
    }

    #[test]
    fn escape_quotes() {
        assert_eq!(
            escape_html(r#"x = "it's""#),
            "x = &quot;it&#39;s&quot;"
        );
    }

    #[test]
    fn escape_keeps_unicode() {
        assert_eq!(escape_html("héllo → <ü>"), "héllo → &lt;ü&gt;");
    }

    #[test]
    fn escape_existing_entity_is_escaped_again() {
        // Callers escape raw text exactly once; entities in the input are literal text.
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
