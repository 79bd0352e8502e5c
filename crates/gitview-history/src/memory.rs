//! In-memory history: commits, refs, and tags held in maps, walked in
//! committer-date order.
//!
//! This is the implementation behind the CLI and the test suites. It keeps
//! the same pull discipline as a real walk: commits are yielded one at a
//! time, newest first, parents enqueued as their children are emitted.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

use bstr::{BString, ByteSlice};
use regex::Regex;

use crate::commit::Commit;
use crate::id::CommitId;
use crate::source::{
    ChangeStatus, DiffEngine, FilePair, GrepKind, RevisionQuery, RevisionSource, TagIndex,
};
use crate::tag::{AnnotatedTag, ObjectKind, ResolvedTag, TagTarget};
use crate::HistoryError;

/// One changed file recorded for a commit, with synthetic line counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: BString,
    pub status: ChangeStatus,
    pub added: usize,
    pub removed: usize,
}

/// A complete repository held in memory.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    commits: HashMap<CommitId, Commit>,
    changes: HashMap<CommitId, Vec<FileChange>>,
    /// Full ref name → target object id.
    refs: BTreeMap<String, CommitId>,
    /// Annotated tag objects by tag name.
    tags: BTreeMap<String, AnnotatedTag>,
    /// Tag object id → target id, for peeling refs that point at tag objects.
    peel: HashMap<CommitId, CommitId>,
    head: String,
}

impl MemoryHistory {
    /// Create an empty history whose default branch is `head` (short name).
    pub fn new(head: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            ..Self::default()
        }
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    /// Insert a commit and its first-parent file changes.
    pub fn add_commit(&mut self, commit: Commit, changes: Vec<FileChange>) {
        self.changes.insert(commit.id.clone(), changes);
        self.commits.insert(commit.id.clone(), commit);
    }

    /// Register a ref (full name, e.g. `refs/heads/main`).
    pub fn add_ref(&mut self, name: impl Into<String>, target: CommitId) {
        self.refs.insert(name.into(), target);
    }

    /// Register an annotated tag object and its `refs/tags/` ref.
    pub fn add_tag(&mut self, tag: AnnotatedTag) {
        self.refs
            .insert(format!("refs/tags/{}", tag.name), tag.id.clone());
        self.peel.insert(tag.id.clone(), tag.target.id.clone());
        self.tags.insert(tag.name.to_string(), tag);
    }

    pub fn get_commit(&self, id: &CommitId) -> Option<&Commit> {
        self.commits.get(id)
    }

    /// Resolve a revision token to a commit id.
    ///
    /// A bare name is first tried as a branch, then as a full ref name,
    /// then as a raw id. Refs pointing at tag objects are peeled.
    pub fn resolve_revision(&self, name: &str) -> Result<CommitId, HistoryError> {
        let target = self
            .refs
            .get(&format!("refs/heads/{}", name))
            .or_else(|| self.refs.get(name))
            .cloned()
            .or_else(|| {
                CommitId::parse(name)
                    .ok()
                    .filter(|id| self.commits.contains_key(id) || self.peel.contains_key(id))
            })
            .ok_or_else(|| HistoryError::UnknownRevision(name.to_string()))?;
        Ok(self.peel.get(&target).cloned().unwrap_or(target))
    }

    /// Start a walk over this history.
    pub fn walk(&self, query: &RevisionQuery) -> Result<MemoryWalk<'_>, HistoryError> {
        let filter = match &query.grep {
            Some((GrepKind::Range, _)) | None => None,
            Some((kind, pattern)) => Some((
                *kind,
                regex::RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()?,
            )),
        };

        let mut walk = MemoryWalk {
            history: self,
            queue: BinaryHeap::new(),
            seen: HashSet::new(),
            decorations: self.decoration_map(),
            filter,
            path: query.path.clone(),
            insertion_ctr: 0,
        };

        if query.tips.is_empty() {
            walk.push(self.resolve_revision(&self.head)?)?;
        } else {
            for tip in &query.tips {
                walk.push(self.resolve_revision(tip)?)?;
            }
        }
        Ok(walk)
    }

    /// Attached ref names per commit: branches, tags, remotes, then any
    /// other refs, each group in name order. Annotated tags decorate their
    /// peeled target with the `tag: ` marker prefix.
    fn decoration_map(&self) -> HashMap<CommitId, Vec<BString>> {
        let mut map: HashMap<CommitId, Vec<BString>> = HashMap::new();
        let mut group = |map: &mut HashMap<CommitId, Vec<BString>>, prefix: &str, marker: bool| {
            for (name, target) in self.refs.range(prefix.to_string()..) {
                if !name.starts_with(prefix) {
                    break;
                }
                let (deco, commit_id) = if marker && self.peel.contains_key(target) {
                    (
                        BString::from(format!("tag: {}", name)),
                        self.peel[target].clone(),
                    )
                } else {
                    (BString::from(name.as_str()), target.clone())
                };
                map.entry(commit_id).or_default().push(deco);
            }
        };
        group(&mut map, "refs/heads/", false);
        group(&mut map, "refs/tags/", true);
        group(&mut map, "refs/remotes/", false);
        for (name, target) in &self.refs {
            if name.starts_with("refs/heads/")
                || name.starts_with("refs/tags/")
                || name.starts_with("refs/remotes/")
            {
                continue;
            }
            map.entry(target.clone())
                .or_default()
                .push(BString::from(name.as_str()));
        }
        map
    }

    fn changes_for(&self, id: &CommitId, path: Option<&str>) -> Vec<&FileChange> {
        self.changes
            .get(id)
            .map(|list| {
                list.iter()
                    .filter(|c| match path {
                        Some(prefix) => c.path.starts_with(prefix.as_bytes()),
                        None => true,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl DiffEngine for MemoryHistory {
    fn changed_files(
        &self,
        commit: &Commit,
        path: Option<&str>,
    ) -> Result<Vec<FilePair>, HistoryError> {
        Ok(self
            .changes_for(&commit.id, path)
            .into_iter()
            .map(|c| FilePair {
                path: c.path.clone(),
                status: c.status,
                old_id: None,
                new_id: None,
            })
            .collect())
    }

    fn each_line(
        &self,
        commit: &Commit,
        pair: &FilePair,
        sink: &mut dyn FnMut(&[u8]),
    ) -> Result<(), HistoryError> {
        let change = self
            .changes_for(&commit.id, None)
            .into_iter()
            .find(|c| c.path == pair.path)
            .ok_or_else(|| {
                HistoryError::Corrupt(format!(
                    "no change entry for {} in {}",
                    pair.path, commit.id
                ))
            })?;
        for n in 0..change.removed {
            sink(format!("-{}:{}", change.path, n).as_bytes());
        }
        for n in 0..change.added {
            sink(format!("+{}:{}", change.path, n).as_bytes());
        }
        Ok(())
    }
}

impl TagIndex for MemoryHistory {
    fn resolve_tag(&self, name: &str) -> Result<Option<ResolvedTag>, HistoryError> {
        if let Some(tag) = self.tags.get(name) {
            return Ok(Some(ResolvedTag::Annotated(tag.clone())));
        }
        let Some(target) = self.refs.get(&format!("refs/tags/{}", name)) else {
            return Ok(None);
        };
        if self.commits.contains_key(target) {
            Ok(Some(ResolvedTag::Lightweight(TagTarget {
                id: target.clone(),
                kind: ObjectKind::Commit,
            })))
        } else {
            Err(HistoryError::Corrupt(format!(
                "tag ref {} points at unknown object {}",
                name, target
            )))
        }
    }
}

/// A date-ordered walk over a [`MemoryHistory`].
pub struct MemoryWalk<'a> {
    history: &'a MemoryHistory,
    queue: BinaryHeap<WalkEntry>,
    seen: HashSet<CommitId>,
    decorations: HashMap<CommitId, Vec<BString>>,
    filter: Option<(GrepKind, Regex)>,
    path: Option<String>,
    insertion_ctr: u64,
}

impl MemoryWalk<'_> {
    fn push(&mut self, id: CommitId) -> Result<(), HistoryError> {
        if !self.seen.insert(id.clone()) {
            return Ok(());
        }
        let commit = self
            .history
            .commits
            .get(&id)
            .ok_or_else(|| HistoryError::Corrupt(format!("missing commit object {}", id)))?;
        self.queue.push(WalkEntry {
            date: commit.committer.when.secs,
            insertion_ctr: self.insertion_ctr,
            id,
        });
        self.insertion_ctr += 1;
        Ok(())
    }

    fn passes_filter(&self, commit: &Commit) -> bool {
        let Some((kind, regex)) = &self.filter else {
            return true;
        };
        let haystack = match kind {
            GrepKind::Message => commit.message.to_str_lossy().into_owned(),
            GrepKind::Author => format!(
                "{} <{}>",
                commit.author.name.to_str_lossy(),
                commit.author.email.to_str_lossy()
            ),
            GrepKind::Committer => format!(
                "{} <{}>",
                commit.committer.name.to_str_lossy(),
                commit.committer.email.to_str_lossy()
            ),
            GrepKind::Range => return true,
        };
        regex.is_match(&haystack)
    }

    fn touches_path(&self, commit: &Commit) -> bool {
        match &self.path {
            Some(path) => !self.history.changes_for(&commit.id, Some(path)).is_empty(),
            None => true,
        }
    }
}

impl RevisionSource for MemoryWalk<'_> {
    fn next_commit(&mut self) -> Result<Option<Commit>, HistoryError> {
        while let Some(entry) = self.queue.pop() {
            let commit = self
                .history
                .commits
                .get(&entry.id)
                .ok_or_else(|| HistoryError::Corrupt(format!("missing commit object {}", entry.id)))?
                .clone();

            for parent in &commit.parents {
                self.push(parent.clone())?;
            }

            if !self.passes_filter(&commit) || !self.touches_path(&commit) {
                continue;
            }

            let mut commit = commit;
            if let Some(decos) = self.decorations.get(&commit.id) {
                commit.decorations = decos.clone();
            }
            return Ok(Some(commit));
        }
        Ok(None)
    }
}

/// Priority-queue entry: newest committer date first, insertion order as
/// the tie-break.
struct WalkEntry {
    date: i64,
    insertion_ctr: u64,
    id: CommitId,
}

impl PartialEq for WalkEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WalkEntry {}

impl PartialOrd for WalkEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WalkEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| other.insertion_ctr.cmp(&self.insertion_ctr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::{Signature, Timestamp};

    fn id(n: u8) -> CommitId {
        CommitId::parse(&format!("{:02x}", n).repeat(20)).unwrap()
    }

    fn sig(name: &str, secs: i64) -> Signature {
        Signature {
            name: BString::from(name),
            email: BString::from(format!("{}@example.com", name.to_lowercase())),
            when: Timestamp::new(secs, 0),
        }
    }

    fn commit(n: u8, parents: Vec<CommitId>, secs: i64, message: &str) -> Commit {
        Commit {
            id: id(n),
            parents,
            author: sig("Alice", secs),
            committer: sig("Carol", secs),
            message: BString::from(message),
            decorations: Vec::new(),
        }
    }

    fn linear_history() -> MemoryHistory {
        // c3 -> c2 -> c1
        let mut h = MemoryHistory::new("main");
        h.add_commit(commit(1, vec![], 100, "one"), vec![]);
        h.add_commit(commit(2, vec![id(1)], 200, "two"), vec![]);
        h.add_commit(commit(3, vec![id(2)], 300, "three"), vec![]);
        h.add_ref("refs/heads/main", id(3));
        h
    }

    fn drain(walk: &mut MemoryWalk<'_>) -> Vec<CommitId> {
        let mut out = Vec::new();
        while let Some(c) = walk.next_commit().unwrap() {
            out.push(c.id);
        }
        out
    }

    #[test]
    fn walk_is_newest_first() {
        let h = linear_history();
        let mut walk = h.walk(&RevisionQuery::default()).unwrap();
        assert_eq!(drain(&mut walk), vec![id(3), id(2), id(1)]);
    }

    #[test]
    fn bare_branch_name_resolves_before_raw_id() {
        let h = linear_history();
        assert_eq!(h.resolve_revision("main").unwrap(), id(3));
        assert_eq!(h.resolve_revision("refs/heads/main").unwrap(), id(3));
        assert_eq!(h.resolve_revision(id(2).as_str()).unwrap(), id(2));
        assert!(h.resolve_revision("nope").is_err());
    }

    #[test]
    fn merge_walk_visits_both_sides_once() {
        // m(400) -> b(250), c3(300); both reach back to shared history
        let mut h = linear_history();
        h.add_commit(commit(4, vec![id(1)], 250, "side"), vec![]);
        h.add_commit(commit(5, vec![id(3), id(4)], 400, "merge"), vec![]);
        h.add_ref("refs/heads/main", id(5));
        let mut walk = h.walk(&RevisionQuery::default()).unwrap();
        assert_eq!(drain(&mut walk), vec![id(5), id(3), id(4), id(2), id(1)]);
    }

    #[test]
    fn author_filter_is_case_insensitive() {
        let h = linear_history();
        let query = RevisionQuery {
            grep: Some((GrepKind::Author, "ALICE".to_string())),
            ..Default::default()
        };
        let mut walk = h.walk(&query).unwrap();
        assert_eq!(drain(&mut walk).len(), 3);

        let query = RevisionQuery {
            grep: Some((GrepKind::Author, "bob".to_string())),
            ..Default::default()
        };
        let mut walk = h.walk(&query).unwrap();
        assert!(drain(&mut walk).is_empty());
    }

    #[test]
    fn message_grep_filters_commits() {
        let h = linear_history();
        let query = RevisionQuery {
            grep: Some((GrepKind::Message, "^tw".to_string())),
            ..Default::default()
        };
        let mut walk = h.walk(&query).unwrap();
        assert_eq!(drain(&mut walk), vec![id(2)]);
    }

    #[test]
    fn bad_pattern_is_an_error() {
        let h = linear_history();
        let query = RevisionQuery {
            grep: Some((GrepKind::Message, "(".to_string())),
            ..Default::default()
        };
        assert!(matches!(h.walk(&query), Err(HistoryError::Pattern(_))));
    }

    #[test]
    fn path_scope_keeps_touching_commits_only() {
        let mut h = MemoryHistory::new("main");
        h.add_commit(
            commit(1, vec![], 100, "docs"),
            vec![FileChange {
                path: BString::from("docs/book.md"),
                status: ChangeStatus::Added,
                added: 3,
                removed: 0,
            }],
        );
        h.add_commit(
            commit(2, vec![id(1)], 200, "code"),
            vec![FileChange {
                path: BString::from("src/main.rs"),
                status: ChangeStatus::Modified,
                added: 1,
                removed: 1,
            }],
        );
        h.add_ref("refs/heads/main", id(2));
        let query = RevisionQuery {
            path: Some("docs".to_string()),
            ..Default::default()
        };
        let mut walk = h.walk(&query).unwrap();
        assert_eq!(drain(&mut walk), vec![id(1)]);
    }

    #[test]
    fn decorations_attach_in_group_order() {
        let mut h = linear_history();
        h.add_ref("refs/remotes/origin/main", id(3));
        h.add_ref("refs/tags/v0.9", id(3));
        let mut walk = h.walk(&RevisionQuery::default()).unwrap();
        let top = walk.next_commit().unwrap().unwrap();
        assert_eq!(
            top.decorations,
            vec![
                BString::from("refs/heads/main"),
                BString::from("refs/tags/v0.9"),
                BString::from("refs/remotes/origin/main"),
            ]
        );
    }

    #[test]
    fn annotated_tag_decorates_peeled_target() {
        use crate::tag::{AnnotatedTag, ObjectKind, TagTarget};
        let mut h = linear_history();
        h.add_tag(AnnotatedTag {
            id: id(9),
            name: BString::from("v1.0"),
            target: TagTarget {
                id: id(3),
                kind: ObjectKind::Commit,
            },
            tagger: Some(sig("Alice", 350)),
            message: BString::from("release"),
        });
        let mut walk = h.walk(&RevisionQuery::default()).unwrap();
        let top = walk.next_commit().unwrap().unwrap();
        assert!(top
            .decorations
            .contains(&BString::from("tag: refs/tags/v1.0")));
        // The tag name also resolves as a revision, peeled to the commit.
        assert_eq!(h.resolve_revision("refs/tags/v1.0").unwrap(), id(3));
    }

    #[test]
    fn resolve_tag_variants() {
        use crate::tag::ResolvedTag;
        let mut h = linear_history();
        h.add_ref("refs/tags/light", id(2));
        assert!(h.resolve_tag("light").unwrap().is_some());
        assert!(h.resolve_tag("absent").unwrap().is_none());
        match h.resolve_tag("light").unwrap() {
            Some(ResolvedTag::Lightweight(t)) => assert_eq!(t.id, id(2)),
            other => panic!("unexpected resolution: {:?}", other),
        }
        // A tag ref pointing at a missing object is corrupt, not absent.
        h.add_ref("refs/tags/broken", id(42));
        assert!(matches!(
            h.resolve_tag("broken"),
            Err(HistoryError::Corrupt(_))
        ));
    }
}
