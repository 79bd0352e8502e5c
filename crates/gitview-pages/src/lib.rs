//! Page renderers: the paginated, graph-annotated log table and the
//! single-tag detail view.
//!
//! Rendering is streamed: one render call pulls commits, graph lines, and
//! diff pairs from its collaborators and writes rows as it goes, holding at
//! most one commit's worth of state. Pagination bounds what is written, not
//! what is walked.

pub mod age;
pub mod deco;
pub mod diffstat;
pub mod error;
pub mod graphsync;
pub mod links;
pub mod log;
pub mod options;
pub mod tag;

pub use deco::{classify, Decoration, DecorationKind};
pub use diffstat::DiffStat;
pub use error::{render_error_page, PageError};
pub use graphsync::{GraphSync, SyncState};
pub use log::{build_query, render_log, LogRequest};
pub use options::{PageContext, RenderWindow, RepoSettings};
pub use tag::render_tag;
