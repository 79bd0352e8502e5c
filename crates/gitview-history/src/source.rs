//! The collaborator contracts the page renderers pull from.
//!
//! All four traits are synchronous and forward-only: one render call drives
//! them to completion, and nothing is buffered beyond a single commit, a
//! single graph line, or a single commit's file pairs.

use bstr::BString;

use crate::commit::Commit;
use crate::id::CommitId;
use crate::tag::ResolvedTag;
use crate::HistoryError;

/// A lazy, possibly unbounded stream of commits in walk order.
pub trait RevisionSource {
    /// Pull the next commit, or `None` when the walk is exhausted.
    fn next_commit(&mut self) -> Result<Option<Commit>, HistoryError>;
}

/// A lane-drawing engine advancing in lockstep with a revision walk.
///
/// The caller announces each commit with `begin_commit` before pulling that
/// commit's lines. `advance` writes exactly one pre-rendered line into
/// `buf` per call and returns `true` while the line is a filler line;
/// `false` means `buf` now holds the commit's primary lane line. After the
/// primary line, further `advance` calls yield padding; `is_commit_finished`
/// reports whether the current commit's mandatory segment lines have all
/// been pulled. Lines are trusted markup (palette spans around lane glyphs)
/// and are embedded without escaping.
pub trait GraphLayout {
    fn begin_commit(&mut self, commit: &Commit);
    fn advance(&mut self, buf: &mut String) -> bool;
    fn is_commit_finished(&self) -> bool;
}

/// First-parent diff access, one commit at a time.
pub trait DiffEngine {
    /// Changed file pairs between `commit` and its first parent, filtered
    /// to paths under `path` when given. A root commit diffs against the
    /// empty tree.
    fn changed_files(
        &self,
        commit: &Commit,
        path: Option<&str>,
    ) -> Result<Vec<FilePair>, HistoryError>;

    /// Stream the raw diff body lines of one pair (no hunk headers).
    fn each_line(
        &self,
        commit: &Commit,
        pair: &FilePair,
        sink: &mut dyn FnMut(&[u8]),
    ) -> Result<(), HistoryError>;
}

/// Tag name resolution for the single-tag page.
pub trait TagIndex {
    /// `Ok(None)` when the name does not resolve under `refs/tags/`.
    fn resolve_tag(&self, name: &str) -> Result<Option<ResolvedTag>, HistoryError>;
}

/// One changed file between a commit and its first parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub path: BString,
    pub status: ChangeStatus,
    /// Blob ids when the engine knows them; display-only.
    pub old_id: Option<CommitId>,
    pub new_id: Option<CommitId>,
}

/// File-level change status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Deleted,
    Modified,
    Renamed,
}

impl ChangeStatus {
    pub fn as_char(&self) -> char {
        match self {
            Self::Added => 'A',
            Self::Deleted => 'D',
            Self::Modified => 'M',
            Self::Renamed => 'R',
        }
    }
}

/// What a log request greps on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrepKind {
    /// Commit message body.
    Message,
    Author,
    Committer,
    /// The pattern is a whitespace-separated list of revision tokens, not
    /// a grep at all; it replaces the tip list.
    Range,
}

impl GrepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "grep",
            Self::Author => "author",
            Self::Committer => "committer",
            Self::Range => "range",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "grep" => Some(Self::Message),
            "author" => Some(Self::Author),
            "committer" => Some(Self::Committer),
            "range" => Some(Self::Range),
            _ => None,
        }
    }
}

/// A fully-assembled walk request.
///
/// `warnings` collects diagnostics produced while the query was built
/// (malformed range tokens); they do not fail the walk.
#[derive(Debug, Clone, Default)]
pub struct RevisionQuery {
    /// Starting points; resolved against heads, then full refs, then raw
    /// ids. Empty means the configured head.
    pub tips: Vec<String>,
    /// Pattern filter, except `Range` which is consumed into `tips`.
    pub grep: Option<(GrepKind, String)>,
    /// Path scope: only commits touching this prefix.
    pub path: Option<String>,
    pub warnings: Vec<String>,
}
