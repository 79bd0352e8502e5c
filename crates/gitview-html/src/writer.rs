//! Streaming HTML writer.

use std::io::{self, Write};

use bstr::BStr;

use crate::escape::{escape_attr, escape_text};

/// A thin writer that streams HTML to an underlying `io::Write` sink.
///
/// The split between `raw` and `text`/`attr` keeps every call site explicit
/// about whether its argument has already been rendered (markup, pre-built
/// graph segments) or is untrusted metadata that must be escaped.
pub struct Html<W> {
    out: W,
}

impl<W: Write> Html<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write pre-rendered markup verbatim.
    pub fn raw(&mut self, markup: &str) -> io::Result<()> {
        self.out.write_all(markup.as_bytes())
    }

    /// Write untrusted bytes as element text, escaped.
    pub fn text(&mut self, text: &BStr) -> io::Result<()> {
        self.out.write_all(escape_text(text).as_bytes())
    }

    /// Write untrusted bytes as an attribute value, escaped.
    pub fn attr(&mut self, value: &BStr) -> io::Result<()> {
        self.out.write_all(escape_attr(value).as_bytes())
    }

    /// Open a link: `<a href='..'>` with an optional class.
    ///
    /// The href is attribute-escaped; callers build it from url-encoded
    /// parts so the two layers of quoting compose.
    pub fn link_open(&mut self, href: &str, css: Option<&str>) -> io::Result<()> {
        self.raw("<a")?;
        if let Some(css) = css {
            self.raw(" class='")?;
            self.attr(BStr::new(css))?;
            self.raw("'")?;
        }
        self.raw(" href='")?;
        self.attr(BStr::new(href))?;
        self.raw("'>")
    }

    pub fn link_close(&mut self) -> io::Result<()> {
        self.raw("</a>")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
