//! HTML entity escaping over byte strings.
//!
//! Both functions are total over arbitrary bytes: invalid UTF-8 sequences
//! are replaced with U+FFFD rather than rejected, since author names and
//! commit messages come straight out of repository metadata.

use bstr::{BStr, ByteSlice};

/// Escape text for placement inside an HTML element body.
///
/// Replaces `<`, `>`, and `&`.
pub fn escape_text(input: &BStr) -> String {
    escape(input, false)
}

/// Escape text for placement inside a quoted HTML attribute value.
///
/// Replaces `<`, `>`, `&`, `"`, and `'`.
pub fn escape_attr(input: &BStr) -> String {
    escape(input, true)
}

fn escape(input: &BStr, attr: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' if attr => out.push_str("&quot;"),
            '\'' if attr => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bstr::BStr;

    #[test]
    fn text_escapes_markup() {
        assert_eq!(
            escape_text(BStr::new("<script>&x</script>")),
            "&lt;script&gt;&amp;x&lt;/script&gt;"
        );
    }

    #[test]
    fn text_leaves_quotes_alone() {
        assert_eq!(escape_text(BStr::new(r#"a "b" 'c'"#)), r#"a "b" 'c'"#);
    }

    #[test]
    fn attr_escapes_quotes() {
        assert_eq!(
            escape_attr(BStr::new(r#"a "b" 'c'"#)),
            "a &quot;b&quot; &#39;c&#39;"
        );
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let escaped = escape_text(BStr::new(b"caf\xe9 <x>"));
        assert!(escaped.starts_with("caf\u{fffd}"));
        assert!(escaped.ends_with("&lt;x&gt;"));
    }

    #[test]
    fn empty_input() {
        assert_eq!(escape_text(BStr::new("")), "");
    }
}
