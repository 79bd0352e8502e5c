//! Lockstep driver between the commit stream and the graph layout engine.
//!
//! Each commit's rows consume a run of layout lines: zero or more filler
//! lines, the primary lane line (inline with the metadata row), then
//! padding until both the message height and the engine's own segment are
//! satisfied. The dual termination condition exists because a merge's lane
//! segment can outlast a one-line message and a long message can outlast
//! the segment; padding stops only when neither has anything left.

use gitview_history::GraphLayout;

use crate::error::PageError;

/// Where the synchronizer is within one commit's line run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Pulling filler lines; the primary line is not buffered yet.
    Filling,
    /// The buffer holds the current commit's primary lane line.
    PrimaryReady,
    /// The primary line was emitted; padding may still be owed.
    PaddingInProgress,
    /// This commit's rows are complete; ready for the next commit.
    RowComplete,
}

/// The single-line buffer and state for one walk's graph column.
#[derive(Debug)]
pub struct GraphSync {
    buf: String,
    state: SyncState,
}

impl GraphSync {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            state: SyncState::RowComplete,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Pull lines until the current commit's primary line is buffered,
    /// handing each preceding filler line to `on_filler`.
    pub fn fill_to_primary(
        &mut self,
        layout: &mut dyn GraphLayout,
        mut on_filler: impl FnMut(&str) -> Result<(), PageError>,
    ) -> Result<(), PageError> {
        self.state = SyncState::Filling;
        while layout.advance(&mut self.buf) {
            on_filler(&self.buf)?;
        }
        self.state = SyncState::PrimaryReady;
        Ok(())
    }

    /// The buffered primary line, emitted inline with the metadata row.
    pub fn primary(&mut self) -> &str {
        debug_assert_eq!(self.state, SyncState::PrimaryReady);
        self.state = SyncState::PaddingInProgress;
        &self.buf
    }

    /// Whether a second table row is needed at all: either the message is
    /// shown, or the engine still owes lane lines for this commit. With
    /// messages off and no parallel lanes pending, the padding row is
    /// suppressed entirely.
    pub fn needs_padding_row(&self, layout: &dyn GraphLayout, show_message: bool) -> bool {
        show_message || !layout.is_commit_finished()
    }

    /// Emit padding lines until both the message height (`message_lines`)
    /// and the engine's segment are exhausted. The finished predicate is
    /// re-checked after every pulled line, so exactly
    /// `max(message_lines, segment_remainder)` lines come out.
    pub fn pad(
        &mut self,
        layout: &mut dyn GraphLayout,
        message_lines: usize,
        mut on_line: impl FnMut(&str) -> Result<(), PageError>,
    ) -> Result<(), PageError> {
        debug_assert_eq!(self.state, SyncState::PaddingInProgress);
        let mut remaining = message_lines;
        while remaining > 0 || !layout.is_commit_finished() {
            layout.advance(&mut self.buf);
            on_line(&self.buf)?;
            remaining = remaining.saturating_sub(1);
        }
        self.state = SyncState::RowComplete;
        Ok(())
    }

    /// Close out the commit without a padding row.
    pub fn skip_padding(&mut self) {
        debug_assert_eq!(self.state, SyncState::PaddingInProgress);
        self.state = SyncState::RowComplete;
    }
}

impl Default for GraphSync {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitview_history::Commit;

    /// Scripted engine: `fillers` lines before the primary, then a segment
    /// that finishes after `segment` further lines; padding afterwards is
    /// unlimited.
    struct ScriptedLayout {
        fillers: usize,
        segment: usize,
        pulled: usize,
    }

    impl ScriptedLayout {
        fn new(fillers: usize, segment: usize) -> Self {
            Self {
                fillers,
                segment,
                pulled: 0,
            }
        }
    }

    impl GraphLayout for ScriptedLayout {
        fn begin_commit(&mut self, _commit: &Commit) {
            self.pulled = 0;
        }

        fn advance(&mut self, buf: &mut String) -> bool {
            buf.clear();
            buf.push_str(&format!("line{}", self.pulled));
            self.pulled += 1;
            // Pull n: lines 0..fillers are filler, line `fillers` is the
            // primary, everything after is segment/padding.
            self.pulled != self.fillers + 1
        }

        fn is_commit_finished(&self) -> bool {
            self.pulled >= self.fillers + 1 + self.segment
        }
    }

    fn run(fillers: usize, segment: usize, message_lines: usize) -> (usize, usize) {
        let mut layout = ScriptedLayout::new(fillers, segment);
        let mut sync = GraphSync::new();

        let mut filler_count = 0;
        sync.fill_to_primary(&mut layout, |_| {
            filler_count += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(sync.state(), SyncState::PrimaryReady);

        let _ = sync.primary();
        assert_eq!(sync.state(), SyncState::PaddingInProgress);

        let mut pad_count = 0;
        sync.pad(&mut layout, message_lines, |_| {
            pad_count += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(sync.state(), SyncState::RowComplete);

        (filler_count, pad_count)
    }

    #[test]
    fn padding_is_max_of_segment_and_message() {
        // Segment longer than message, and the reverse, and equal.
        assert_eq!(run(0, 4, 1), (0, 4));
        assert_eq!(run(0, 1, 5), (0, 5));
        assert_eq!(run(0, 3, 3), (0, 3));
    }

    #[test]
    fn finished_segment_with_no_message_pads_nothing() {
        assert_eq!(run(0, 0, 0), (0, 0));
    }

    #[test]
    fn filler_lines_all_surface_before_the_primary() {
        assert_eq!(run(3, 0, 0), (3, 0));
        assert_eq!(run(2, 1, 4), (2, 4));
    }

    #[test]
    fn padding_row_suppression() {
        let mut layout = ScriptedLayout::new(0, 0);
        let mut sync = GraphSync::new();
        sync.fill_to_primary(&mut layout, |_| Ok(())).unwrap();
        let _ = sync.primary();
        // Message off, segment finished: no second row.
        assert!(!sync.needs_padding_row(&layout, false));
        // Message on always forces the row.
        assert!(sync.needs_padding_row(&layout, true));
        sync.skip_padding();
        assert_eq!(sync.state(), SyncState::RowComplete);

        // An unfinished segment forces the row even with messages off.
        let mut layout = ScriptedLayout::new(0, 2);
        let mut sync = GraphSync::new();
        sync.fill_to_primary(&mut layout, |_| Ok(())).unwrap();
        let _ = sync.primary();
        assert!(sync.needs_padding_row(&layout, false));
    }

    #[test]
    fn primary_line_content_is_buffered() {
        let mut layout = ScriptedLayout::new(2, 0);
        let mut sync = GraphSync::new();
        let mut fillers = Vec::new();
        sync.fill_to_primary(&mut layout, |line| {
            fillers.push(line.to_string());
            Ok(())
        })
        .unwrap();
        assert_eq!(fillers, vec!["line0", "line1"]);
        assert_eq!(sync.primary(), "line2");
    }
}
