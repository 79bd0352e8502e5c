//! First-parent diff statistics for the Files/Lines columns.

use gitview_history::{Commit, DiffEngine};

use crate::error::PageError;

/// Call-scoped accumulator for one commit's diff summary.
///
/// Reset lives in construction: every commit gets a fresh value, so two
/// render calls (or two commits) can never bleed counts into each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStat {
    pub files: usize,
    pub added: usize,
    pub removed: usize,
}

impl DiffStat {
    /// Classify one raw diff body line by its leading byte. Anything that
    /// is not an addition or removal (context, no-newline markers) is
    /// ignored.
    pub fn count_line(&mut self, line: &[u8]) {
        match line.first() {
            Some(b'+') => self.added += 1,
            Some(b'-') => self.removed += 1,
            _ => {}
        }
    }

    /// Aggregate the first-parent diff of `commit`, filtered by `path`.
    /// Line counting is the dominant per-row cost and only runs when the
    /// Lines column is enabled.
    pub fn collect(
        engine: &dyn DiffEngine,
        commit: &Commit,
        path: Option<&str>,
        count_lines: bool,
    ) -> Result<Self, PageError> {
        let mut stat = Self::default();
        for pair in engine.changed_files(commit, path)? {
            stat.files += 1;
            if count_lines {
                engine.each_line(commit, &pair, &mut |line| stat.count_line(line))?;
            }
        }
        Ok(stat)
    }
}
