//! Lane-drawing engine for the in-memory history.
//!
//! Tracks one column per in-flight branch and renders each line as HTML,
//! wrapping every glyph in a palette span so lanes keep a stable color.
//! Lines are handed out through the [`GraphLayout`] pull contract: filler
//! lines first, then the commit's primary `*` line, then any merge edges,
//! then unlimited plain continuation padding.

use std::collections::VecDeque;

use crate::commit::Commit;
use crate::id::CommitId;
use crate::source::GraphLayout;

/// Number of distinct lane color classes (`column1` … `column6`).
pub const LANE_PALETTE: usize = 6;

/// In-memory implementation of [`GraphLayout`].
#[derive(Debug, Default)]
pub struct MemoryGraph {
    /// Active columns: each holds the id the lane is waiting for.
    columns: Vec<Option<CommitId>>,
    /// Filler lines to emit before the current commit's primary line.
    pending: VecDeque<String>,
    /// The current commit's lane line, until taken.
    primary: Option<String>,
    /// Mandatory lines after the primary line (merge fan-out).
    post: VecDeque<String>,
    /// Continuation line repeated for padding once `post` is drained.
    padding: String,
    /// Continuation filler owed to the next commit.
    carry: Vec<String>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_or_create_column(&mut self, id: &CommitId) -> usize {
        for (i, slot) in self.columns.iter().enumerate() {
            if slot.as_ref() == Some(id) {
                return i;
            }
        }
        for (i, slot) in self.columns.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(id.clone());
                return i;
            }
        }
        self.columns.push(Some(id.clone()));
        self.columns.len() - 1
    }

    fn compact_columns(&mut self) {
        while self.columns.last() == Some(&None) {
            self.columns.pop();
        }
    }

    fn active_lanes(&self) -> usize {
        self.columns.iter().filter(|s| s.is_some()).count()
    }

    /// Render one glyph in its lane color. Spaces stay bare.
    fn paint(glyph: char, lane: usize) -> String {
        if glyph == ' ' {
            " ".to_string()
        } else {
            format!(
                "<span class='column{}'>{}</span>",
                lane % LANE_PALETTE + 1,
                glyph
            )
        }
    }

    /// The commit line: `*` in the commit's column, `|` in occupied lanes.
    fn commit_line(&self, col: usize) -> String {
        let mut line = String::new();
        for (i, slot) in self.columns.iter().enumerate() {
            if i == col {
                line.push_str(&Self::paint('*', i));
            } else if slot.is_some() {
                line.push_str(&Self::paint('|', i));
            } else {
                line.push(' ');
            }
            if i + 1 < self.columns.len() {
                line.push(' ');
            }
        }
        line
    }

    /// Plain continuation of the occupied lanes.
    fn continuation_line(&self) -> String {
        let mut line = String::new();
        for (i, slot) in self.columns.iter().enumerate() {
            if slot.is_some() {
                line.push_str(&Self::paint('|', i));
            } else {
                line.push(' ');
            }
            if i + 1 < self.columns.len() {
                line.push(' ');
            }
        }
        line
    }

    /// Edge line connecting a merge commit's column to its extra parents'
    /// columns; lanes crossed by an edge render as `-`.
    fn merge_line(&self, source: usize, targets: &[usize]) -> String {
        let crossed = |i: usize, include_self: bool| {
            targets.iter().any(|&t| {
                let lo = source.min(t);
                let hi = source.max(t);
                if include_self {
                    i >= lo && i < hi
                } else {
                    i > lo && i < hi
                }
            })
        };
        let mut line = String::new();
        for (i, slot) in self.columns.iter().enumerate() {
            if i == source || targets.contains(&i) || slot.is_some() {
                line.push_str(&Self::paint('|', i));
            } else if crossed(i, false) {
                line.push_str(&Self::paint('-', i));
            } else {
                line.push(' ');
            }
            if i + 1 < self.columns.len() {
                if crossed(i, true) {
                    line.push_str(&Self::paint('-', i));
                } else {
                    line.push(' ');
                }
            }
        }
        line
    }
}

impl GraphLayout for MemoryGraph {
    fn begin_commit(&mut self, commit: &Commit) {
        self.pending = self.carry.drain(..).collect();
        self.post.clear();

        let col = self.find_or_create_column(&commit.id);
        self.primary = Some(self.commit_line(col));

        match commit.parents.len() {
            0 => {
                self.columns[col] = None;
                self.compact_columns();
            }
            1 => {
                self.columns[col] = Some(commit.parents[0].clone());
            }
            _ => {
                self.columns[col] = Some(commit.parents[0].clone());
                let mut targets = Vec::new();
                for parent in commit.parents.iter().skip(1) {
                    targets.push(self.find_or_create_column(parent));
                }
                let edges = self.merge_line(col, &targets);
                self.post.push_back(edges);
            }
        }

        // Lanes stay visually continuous between commits only while more
        // than one is active; linear history gets no filler at all.
        self.padding = self.continuation_line();
        self.carry = if self.active_lanes() > 1 {
            vec![self.continuation_line()]
        } else {
            Vec::new()
        };
    }

    fn advance(&mut self, buf: &mut String) -> bool {
        buf.clear();
        if let Some(line) = self.pending.pop_front() {
            buf.push_str(&line);
            return true;
        }
        if let Some(line) = self.primary.take() {
            buf.push_str(&line);
            return false;
        }
        if let Some(line) = self.post.pop_front() {
            buf.push_str(&line);
            return true;
        }
        buf.push_str(&self.padding);
        true
    }

    fn is_commit_finished(&self) -> bool {
        self.pending.is_empty() && self.primary.is_none() && self.post.is_empty()
    }
}
