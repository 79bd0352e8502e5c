//! Stateless link building.
//!
//! Every link reproduces the full parameter set of the view it targets, so
//! navigation needs no server-side cursor: head (`h`), revision (`id`),
//! window offset (`ofs`) and size (`n`), grep kind and pattern (`grep`,
//! `q`), and the message-expand toggle (`showmsg`).

use gitview_history::{CommitId, GrepKind};
use gitview_html::{url_arg, QueryString};

use crate::options::PageContext;

/// Parameters of a log-view link.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLink<'a> {
    pub head: Option<&'a str>,
    /// Fallback revision when no head applies (remote decorations).
    pub rev: Option<&'a str>,
    pub path: Option<&'a str>,
    pub offset: usize,
    pub count: usize,
    pub grep: Option<(GrepKind, &'a str)>,
    pub show_message: bool,
}

impl LogLink<'_> {
    pub fn href(&self, ctx: &PageContext) -> String {
        let mut query = QueryString::new();
        query
            .arg_opt("h", self.head)
            .arg_opt("id", self.rev)
            .arg_nonzero("ofs", self.offset)
            .arg_nonzero("n", self.count);
        if let Some((kind, pattern)) = self.grep {
            query.arg("grep", kind.as_str()).arg("q", pattern);
        }
        if self.show_message {
            query.arg("showmsg", "1");
        }
        format!("{}{}", page_path(ctx, "log", self.path), query)
    }
}

/// Link to a commit's detail page.
pub fn commit_href(ctx: &PageContext, id: &CommitId, path: Option<&str>) -> String {
    let mut query = QueryString::new();
    query.arg("id", id.as_str());
    format!("{}{}", page_path(ctx, "commit", path), query)
}

/// Link to the single-tag page.
pub fn tag_href(ctx: &PageContext, name: &str) -> String {
    let mut query = QueryString::new();
    query.arg("id", name);
    format!("{}{}", page_path(ctx, "tag", None), query)
}

/// Link to the raw object page (non-commit tag targets).
pub fn object_href(ctx: &PageContext, id: &CommitId) -> String {
    let mut query = QueryString::new();
    query.arg("id", id.as_str());
    format!("{}{}", page_path(ctx, "object", None), query)
}

/// Link to a snapshot archive download.
pub fn snapshot_href(ctx: &PageContext, filename: &str) -> String {
    format!("/{}/snapshot/{}", url_arg(&ctx.repo.name), url_arg(filename))
}

fn page_path(ctx: &PageContext, page: &str, path: Option<&str>) -> String {
    match path {
        Some(path) => format!("/{}/{}/{}", url_arg(&ctx.repo.name), page, url_arg(path)),
        None => format!("/{}/{}", url_arg(&ctx.repo.name), page),
    }
}
