//! The paginated, graph-annotated log table.

use std::io::Write;

use bstr::ByteSlice;
use gitview_history::{
    Commit, DiffEngine, GraphLayout, GrepKind, RevisionQuery, RevisionSource,
};
use gitview_html::Html;

use crate::age;
use crate::deco::render_decorations;
use crate::diffstat::DiffStat;
use crate::error::PageError;
use crate::graphsync::GraphSync;
use crate::links::{commit_href, LogLink};
use crate::options::{PageContext, RenderWindow};

/// One log-view request.
#[derive(Debug, Clone, Default)]
pub struct LogRequest {
    /// Starting revision; the configured head when absent.
    pub tip: Option<String>,
    /// Path scope for the walk and the Files/Lines columns.
    pub path: Option<String>,
    /// Grep kind and pattern.
    pub grep: Option<(GrepKind, String)>,
    pub window: RenderWindow,
    /// Paged rendering: surrounding table element plus prev/next controls.
    /// Off when the table is embedded in a larger page, where a lookahead
    /// hit renders a generic more-results row instead.
    pub paged: bool,
}

impl LogRequest {
    /// Link parameters reproducing this request at a different offset.
    fn link_at(&self, offset: usize, show_message: bool) -> LogLink<'_> {
        LogLink {
            head: self.tip.as_deref(),
            rev: None,
            path: self.path.as_deref(),
            offset,
            count: self.window.count,
            grep: self.grep.as_ref().map(|(k, p)| (*k, p.as_str())),
            show_message,
        }
    }
}

/// Turn a request into the walk query.
///
/// A `Range` grep is not a grep: its pattern is split on whitespace into
/// revision tokens which replace the tip. A token with a leading `-` is
/// rejected with a diagnostic and token parsing stops there; tokens already
/// accepted are kept.
pub fn build_query(req: &LogRequest) -> RevisionQuery {
    let mut query = RevisionQuery {
        path: req.path.clone(),
        ..Default::default()
    };
    match &req.grep {
        Some((GrepKind::Range, pattern)) => {
            for token in pattern.split_whitespace() {
                if token.starts_with('-') {
                    query
                        .warnings
                        .push(format!("bad range expression: {}", token));
                    break;
                }
                query.tips.push(token.to_string());
            }
        }
        other => {
            if let Some(tip) = &req.tip {
                query.tips.push(tip.clone());
            }
            query.grep = other.clone();
        }
    }
    query
}

/// Render the log table for one request.
///
/// `source` must already reflect the query from [`build_query`]; `layout`
/// is present iff the window has the graph column enabled. Pulls at most
/// `offset + count + 1` commits and holds one at a time.
pub fn render_log<W: Write>(
    out: &mut Html<W>,
    ctx: &PageContext,
    req: &LogRequest,
    source: &mut dyn RevisionSource,
    mut layout: Option<&mut dyn GraphLayout>,
    diffs: &dyn DiffEngine,
) -> Result<(), PageError> {
    let window = &req.window;
    debug_assert_eq!(window.has_graph, layout.is_some());

    if req.paged {
        out.raw("<table class='list nowrap'>")?;
    }
    render_header(out, ctx, req)?;

    // Skip the window offset. Skipped commits still advance the layout
    // engine so lane state stays in lockstep with the walk; their buffers
    // are dropped at the end of each iteration.
    for _ in 0..window.offset {
        match source.next_commit()? {
            Some(commit) => {
                if let Some(layout) = layout.as_deref_mut() {
                    layout.begin_commit(&commit);
                }
            }
            None => break,
        }
    }

    let mut sync = GraphSync::new();
    let mut rendered = 0;
    while rendered < window.count {
        let Some(commit) = source.next_commit()? else {
            break;
        };
        // Explicit reborrow rather than `layout.as_deref_mut()`: the latter
        // ties the returned reference to the parameter lifetime, which the
        // borrow checker rejects across loop iterations.
        let layout_ref: Option<&mut dyn GraphLayout> = match layout {
            Some(ref mut l) => Some(&mut **l),
            None => None,
        };
        render_commit(out, ctx, req, &commit, layout_ref, diffs, &mut sync)?;
        rendered += 1;
    }

    // One-commit lookahead; the extra commit is dropped unrendered.
    let more = source.next_commit()?.is_some();

    if req.paged {
        out.raw("</table><div class='pager'>")?;
        if window.offset > 0 {
            let prev = req.link_at(
                window.offset.saturating_sub(window.count),
                window.show_message,
            );
            out.link_open(&prev.href(ctx), None)?;
            out.raw("[prev]")?;
            out.link_close()?;
            out.raw("&nbsp;")?;
        }
        if more {
            let next = req.link_at(window.offset + window.count, window.show_message);
            out.link_open(&next.href(ctx), None)?;
            out.raw("[next]")?;
            out.link_close()?;
        }
        out.raw("</div>\n")?;
    } else if more {
        out.raw(&format!(
            "<tr class='nohover'><td colspan='{}'>",
            window.columns()
        ))?;
        out.link_open(&req.link_at(0, window.show_message).href(ctx), None)?;
        out.raw("[...]")?;
        out.link_close()?;
        out.raw("</td></tr>\n")?;
    }
    Ok(())
}

fn render_header<W: Write>(
    out: &mut Html<W>,
    ctx: &PageContext,
    req: &LogRequest,
) -> Result<(), PageError> {
    let window = &req.window;
    out.raw("<tr class='nohover'><th class='left'>Age</th>")?;
    if window.has_graph {
        out.raw("<th></th>")?;
    }
    out.raw("<th class='left'>Commit message")?;
    if req.paged {
        // Toggle between collapsed and expanded message display, keeping
        // the rest of the request intact.
        out.raw(" (")?;
        let toggle = req.link_at(window.offset, !window.show_message);
        out.link_open(&toggle.href(ctx), None)?;
        out.raw(if window.show_message { "Collapse" } else { "Expand" })?;
        out.link_close()?;
        out.raw(")")?;
    }
    out.raw("</th><th class='left'>Author</th>")?;
    if window.has_filecount {
        out.raw("<th class='left'>Files</th>")?;
        if window.has_linecount {
            out.raw("<th class='left'>Lines</th>")?;
        }
    }
    out.raw("</tr>\n")?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn render_commit<W: Write>(
    out: &mut Html<W>,
    ctx: &PageContext,
    req: &LogRequest,
    commit: &Commit,
    mut layout: Option<&mut dyn GraphLayout>,
    diffs: &dyn DiffEngine,
    sync: &mut GraphSync,
) -> Result<(), PageError> {
    let window = &req.window;
    let span = window.message_span();

    // Filler rows keep parallel lanes visually continuous between commits:
    // graph cell only, everything else empty.
    if let Some(layout) = layout.as_deref_mut() {
        layout.begin_commit(commit);
        sync.fill_to_primary(layout, |line| {
            out.raw("<tr class='nohover'><td/><td class='commitgraph'>")?;
            out.raw(line)?;
            out.raw(&format!("</td><td colspan='{}'/></tr>\n", span))?;
            Ok(())
        })?;
    }

    let commit_url = commit_href(ctx, &commit.id, req.path.as_deref());

    out.raw(if window.show_message {
        "<tr class='logheader'><td>"
    } else {
        "<tr><td>"
    })?;
    out.link_open(&commit_url, None)?;
    out.raw(&age::format_age(ctx.now, commit.committer.when, age::TWO_WEEKS))?;
    out.link_close()?;
    out.raw("</td>")?;

    if layout.is_some() {
        out.raw("<td class='commitgraph'>")?;
        out.raw(sync.primary())?;
        out.raw("</td>")?;
    }

    out.raw(if window.show_message {
        "<td class='logsubject'>"
    } else {
        "<td>"
    })?;
    out.link_open(&commit_url, None)?;
    out.text(commit.subject())?;
    out.link_close()?;
    render_decorations(out, ctx, req, commit)?;
    out.raw("</td><td>")?;
    out.text(commit.author.name.as_bstr())?;

    if window.has_filecount {
        let stat = DiffStat::collect(diffs, commit, req.path.as_deref(), window.has_linecount)?;
        out.raw("</td><td>")?;
        out.raw(&stat.files.to_string())?;
        if window.has_linecount {
            out.raw("</td><td>")?;
            out.raw(&format!("-{}/+{}", stat.removed, stat.added))?;
        }
    }
    out.raw("</td></tr>\n")?;

    // Second row: the expanded message and/or graph padding.
    let needs_row = match layout.as_deref_mut() {
        Some(layout) => sync.needs_padding_row(layout, window.show_message),
        None => window.show_message,
    };
    if !needs_row {
        if layout.is_some() {
            sync.skip_padding();
        }
        return Ok(());
    }

    out.raw("<tr class='nohover'><td/>")?;
    if let Some(layout) = layout.as_deref_mut() {
        let lines = if window.show_message {
            commit.message_lines()
        } else {
            0
        };
        out.raw("<td class='commitgraph'>")?;
        let mut first = true;
        sync.pad(layout, lines, |line| {
            if !first {
                out.raw("\n")?;
            }
            first = false;
            out.raw(line)?;
            Ok(())
        })?;
        out.raw("</td>")?;
    }
    out.raw(&format!(
        "<td colspan='{}'{}>",
        span,
        if window.show_message {
            " class='logmsg'"
        } else {
            ""
        }
    ))?;
    if window.show_message {
        out.text(commit.display_message())?;
    }
    out.raw("</td></tr>\n")?;
    Ok(())
}
