//! Relative URLs and query strings for page links.

use std::fmt;

/// Percent-encode a string for use as a path segment or query argument.
///
/// Unreserved characters plus `/` pass through; everything else (including
/// `&`, `=`, `?`, `#`, and spaces) is encoded so the result can be embedded
/// in a link without further quoting.
pub fn url_arg(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(b as char)
            }
            _ => {
                out.push('%');
                out.push(char::from_digit((b >> 4) as u32, 16).unwrap_or('0').to_ascii_uppercase());
                out.push(char::from_digit((b & 0xf) as u32, 16).unwrap_or('0').to_ascii_uppercase());
            }
        }
    }
    out
}

/// An ordered query-string builder.
///
/// Arguments render in insertion order; the first one is prefixed with `?`,
/// the rest with `&`. An empty builder renders as nothing, so a path with an
/// appended `QueryString` is always a valid relative URL.
#[derive(Debug, Clone, Default)]
pub struct QueryString {
    args: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one argument. The value is url-encoded; the name is expected
    /// to be a plain identifier and passes through untouched.
    pub fn arg(&mut self, name: &str, value: &str) -> &mut Self {
        self.args.push((name.to_string(), url_arg(value)));
        self
    }

    /// Append an argument only when a value is present.
    pub fn arg_opt(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.arg(name, value);
        }
        self
    }

    /// Append a numeric argument, omitting it when zero.
    pub fn arg_nonzero(&mut self, name: &str, value: usize) -> &mut Self {
        if value > 0 {
            self.arg(name, &value.to_string());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.args.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_arg_passes_unreserved() {
        assert_eq!(url_arg("refs/heads/main-1.2_x~"), "refs/heads/main-1.2_x~");
    }

    #[test]
    fn url_arg_encodes_delimiters() {
        assert_eq!(url_arg("a b&c=d?e#f"), "a%20b%26c%3Dd%3Fe%23f");
    }

    #[test]
    fn empty_query_renders_nothing() {
        assert_eq!(QueryString::new().to_string(), "");
    }

    #[test]
    fn args_render_in_order() {
        let mut q = QueryString::new();
        q.arg("h", "main").arg("ofs", "50");
        assert_eq!(q.to_string(), "?h=main&ofs=50");
    }

    #[test]
    fn optional_and_zero_args_are_skipped() {
        let mut q = QueryString::new();
        q.arg_opt("q", None).arg_nonzero("ofs", 0).arg("h", "dev");
        assert_eq!(q.to_string(), "?h=dev");
    }
}
