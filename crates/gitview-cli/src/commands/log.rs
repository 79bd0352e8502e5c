use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use gitview_history::{GraphLayout, GrepKind, MemoryGraph};
use gitview_html::Html;
use gitview_pages::{
    build_query, render_error_page, render_log, LogRequest, PageError, RenderWindow,
};

#[derive(Args)]
pub struct LogArgs {
    /// History fixture file (JSON)
    #[arg(long, value_name = "file")]
    pub fixture: PathBuf,

    /// Starting revision (branch, full ref, or id); defaults to the
    /// fixture's head
    #[arg(short = 'r', long)]
    pub revision: Option<String>,

    /// Skip <n> commits before rendering
    #[arg(long, default_value_t = 0)]
    pub ofs: usize,

    /// Render at most <n> commits
    #[arg(short = 'n', long, default_value_t = 50)]
    pub count: usize,

    /// Draw the commit graph column
    #[arg(long)]
    pub graph: bool,

    /// Show the Files column
    #[arg(long)]
    pub filecount: bool,

    /// Show the Lines column (implies per-commit diff line counting)
    #[arg(long)]
    pub linecount: bool,

    /// Expand commit messages into a second row
    #[arg(long)]
    pub showmsg: bool,

    /// Grep kind: grep, author, committer, or range
    #[arg(long, value_name = "kind", requires = "pattern")]
    pub grep: Option<String>,

    /// Pattern for --grep
    #[arg(short = 'q', long)]
    pub pattern: Option<String>,

    /// Limit to commits touching this path prefix
    #[arg(long)]
    pub path: Option<String>,

    /// Render an embeddable fragment without pager controls
    #[arg(long)]
    pub no_pager: bool,
}

pub fn run(args: &LogArgs) -> Result<i32> {
    let (history, ctx, flags) = super::load_fixture(&args.fixture)?;

    let grep = match &args.grep {
        Some(kind) => {
            let kind = GrepKind::parse(kind)
                .ok_or_else(|| anyhow::anyhow!("unknown grep kind: {}", kind))?;
            let pattern = args.pattern.clone().unwrap_or_default();
            Some((kind, pattern))
        }
        None => None,
    };

    let req = LogRequest {
        tip: args.revision.clone(),
        path: args.path.clone(),
        grep,
        window: RenderWindow {
            offset: args.ofs,
            count: args.count,
            has_graph: args.graph || flags.enable_commit_graph,
            has_filecount: args.filecount || flags.enable_log_filecount,
            has_linecount: args.linecount || flags.enable_log_linecount,
            show_message: args.showmsg,
        },
        paged: !args.no_pager,
    };

    let query = build_query(&req);
    for warning in &query.warnings {
        eprintln!("warning: {}", warning);
    }

    let stdout = io::stdout();
    let mut out = Html::new(stdout.lock());

    let mut walk = match history.walk(&query) {
        Ok(walk) => walk,
        Err(err) => return fail(&mut out, err.into()),
    };
    let mut graph = req.window.has_graph.then(MemoryGraph::new);
    let layout = graph.as_mut().map(|g| g as &mut dyn GraphLayout);

    match render_log(&mut out, &ctx, &req, &mut walk, layout, &history) {
        Ok(()) => Ok(0),
        Err(err) => fail(&mut out, err),
    }
}

/// Emit the error page for a failed request and map it to an exit code.
pub(super) fn fail<W: Write>(out: &mut Html<W>, err: PageError) -> Result<i32> {
    match err {
        PageError::Io(err) => Err(err.into()),
        err => {
            render_error_page(out, &err)?;
            Ok(if err.status() == 404 { 4 } else { 5 })
        }
    }
}
