use std::io::{self, Write};

use bstr::BStr;
use gitview_history::HistoryError;
use gitview_html::Html;

/// Request-terminal failures.
///
/// Both page variants abort the current request before any partial table
/// has been written; there is no retry path.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The requested ref or object does not resolve (404-equivalent).
    #[error("not found: {0}")]
    NotFound(String),

    /// An object resolved but its metadata is unusable (500-equivalent).
    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl PageError {
    /// HTTP-equivalent status for the error page.
    pub fn status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Internal(_) | Self::Io(_) => 500,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Not found",
            Self::Internal(_) | Self::Io(_) => "Internal server error",
        }
    }
}

impl From<HistoryError> for PageError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::UnknownRevision(rev) => Self::NotFound(format!("bad revision: {}", rev)),
            HistoryError::Io(err) => Self::Io(err),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Write the user-visible error fragment for a failed request.
pub fn render_error_page<W: Write>(out: &mut Html<W>, err: &PageError) -> io::Result<()> {
    out.raw(&format!("<div class='error'><h2>{}</h2>", err.title()))?;
    out.text(BStr::new(&err.to_string()))?;
    out.raw("</div>\n")
}
