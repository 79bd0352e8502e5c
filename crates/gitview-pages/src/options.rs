//! Per-request configuration, fixed for the duration of one render call.

/// The output window and the column-producing feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderWindow {
    /// Commits to skip before rendering begins.
    pub offset: usize,
    /// Maximum commits to render.
    pub count: usize,
    pub has_graph: bool,
    pub has_filecount: bool,
    /// Only meaningful when `has_filecount` is on.
    pub has_linecount: bool,
    pub show_message: bool,
}

impl RenderWindow {
    /// Total table columns: age, subject, author, plus one per enabled
    /// feature. Computed once per render call and used for the header row
    /// and every colspan, so rows can never drift out of alignment.
    pub fn columns(&self) -> usize {
        3 + usize::from(self.has_graph)
            + usize::from(self.has_filecount)
            + usize::from(self.has_linecount)
    }

    /// Columns spanned by the message cell (and by filler-row padding):
    /// everything after the age cell and the optional graph cell.
    pub fn message_span(&self) -> usize {
        self.columns() - 1 - usize::from(self.has_graph)
    }
}

impl Default for RenderWindow {
    fn default() -> Self {
        Self {
            offset: 0,
            count: 50,
            has_graph: false,
            has_filecount: false,
            has_linecount: false,
            show_message: false,
        }
    }
}

/// Display settings of the repository being rendered.
#[derive(Debug, Clone, Default)]
pub struct RepoSettings {
    /// Short name; first path segment of every link.
    pub name: String,
    /// Snapshot archive suffixes offered on the tag page.
    pub snapshots: Vec<String>,
    /// Hide tagger email addresses.
    pub suppress_email: bool,
}

/// Request-independent context shared by all pages of one render call.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub repo: RepoSettings,
    /// Default branch used when a request names no tip.
    pub head: String,
    /// Render-time clock, for age cells.
    pub now: i64,
}
