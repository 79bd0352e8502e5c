//! JSON history fixtures.
//!
//! A fixture is a serialized repository snapshot: display settings, refs,
//! annotated tags, and commits with per-file change counts. The CLI and the
//! integration tests load one and convert it into a [`MemoryHistory`].
//!
//! ```json
//! {
//!   "head": "main",
//!   "repo": { "name": "widgets", "snapshots": ["tar.gz"] },
//!   "refs": { "refs/heads/main": "11…11" },
//!   "tags": [ { "name": "v1.0", "id": "99…99", "target": "11…11",
//!               "tagger": { "name": "A", "email": "a@b", "time": 1 },
//!               "message": "release" } ],
//!   "commits": [ { "id": "11…11", "parents": [], "message": "init",
//!                  "author": { "name": "A", "email": "a@b", "time": 1 },
//!                  "files": [ { "path": "src/lib.rs", "status": "A",
//!                               "added": 10, "removed": 0 } ] } ]
//! }
//! ```

use std::collections::BTreeMap;

use bstr::BString;
use serde::Deserialize;

use crate::commit::{Commit, Signature, Timestamp};
use crate::id::CommitId;
use crate::memory::{FileChange, MemoryHistory};
use crate::source::ChangeStatus;
use crate::tag::{AnnotatedTag, ObjectKind, TagTarget};
use crate::HistoryError;

/// Root of the fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub repo: FixtureRepo,
    #[serde(default = "default_head")]
    pub head: String,
    #[serde(default)]
    pub refs: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<FixtureTag>,
    #[serde(default)]
    pub commits: Vec<FixtureCommit>,
}

fn default_head() -> String {
    "main".to_string()
}

/// Per-repository display settings carried in the fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureRepo {
    #[serde(default = "default_repo_name")]
    pub name: String,
    /// Snapshot archive suffixes offered on the tag page ("tar.gz", "zip").
    #[serde(default)]
    pub snapshots: Vec<String>,
    #[serde(default)]
    pub suppress_email: bool,
    #[serde(default)]
    pub enable_commit_graph: bool,
    #[serde(default)]
    pub enable_log_filecount: bool,
    #[serde(default)]
    pub enable_log_linecount: bool,
}

fn default_repo_name() -> String {
    "repo".to_string()
}

impl Default for FixtureRepo {
    fn default() -> Self {
        Self {
            name: default_repo_name(),
            snapshots: Vec::new(),
            suppress_email: false,
            enable_commit_graph: false,
            enable_log_filecount: false,
            enable_log_linecount: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureIdent {
    pub name: String,
    pub email: String,
    /// Seconds since the epoch.
    pub time: i64,
    /// Timezone offset in minutes from UTC.
    #[serde(default)]
    pub tz: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureCommit {
    pub id: String,
    #[serde(default)]
    pub parents: Vec<String>,
    pub author: FixtureIdent,
    /// Defaults to the author when absent.
    pub committer: Option<FixtureIdent>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub files: Vec<FixtureChange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureChange {
    pub path: String,
    /// One of `A`, `D`, `M`, `R`; defaults to `M`.
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub added: usize,
    #[serde(default)]
    pub removed: usize,
}

fn default_status() -> String {
    "M".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureTag {
    pub name: String,
    /// Id of the tag object itself.
    pub id: String,
    /// Id of the tagged object.
    pub target: String,
    #[serde(default = "default_target_kind")]
    pub target_kind: String,
    pub tagger: Option<FixtureIdent>,
    #[serde(default)]
    pub message: String,
}

fn default_target_kind() -> String {
    "commit".to_string()
}

impl Fixture {
    /// Parse a fixture from JSON text.
    pub fn from_json(text: &str) -> Result<Self, HistoryError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate ids and build the in-memory history.
    pub fn into_history(self) -> Result<MemoryHistory, HistoryError> {
        let mut history = MemoryHistory::new(self.head);

        for fc in self.commits {
            let commit = Commit {
                id: CommitId::parse(&fc.id)?,
                parents: fc
                    .parents
                    .iter()
                    .map(|p| CommitId::parse(p))
                    .collect::<Result<_, _>>()?,
                committer: match &fc.committer {
                    Some(ident) => ident.to_signature(),
                    None => fc.author.to_signature(),
                },
                author: fc.author.to_signature(),
                message: BString::from(fc.message),
                decorations: Vec::new(),
            };
            let changes = fc
                .files
                .into_iter()
                .map(FixtureChange::into_change)
                .collect::<Result<_, _>>()?;
            history.add_commit(commit, changes);
        }

        for (name, target) in self.refs {
            history.add_ref(name, CommitId::parse(&target)?);
        }

        for tag in self.tags {
            history.add_tag(AnnotatedTag {
                id: CommitId::parse(&tag.id)?,
                name: BString::from(tag.name),
                target: TagTarget {
                    id: CommitId::parse(&tag.target)?,
                    kind: parse_kind(&tag.target_kind)?,
                },
                tagger: tag.tagger.as_ref().map(FixtureIdent::to_signature),
                message: BString::from(tag.message),
            });
        }

        Ok(history)
    }
}

impl FixtureIdent {
    fn to_signature(&self) -> Signature {
        Signature {
            name: BString::from(self.name.as_str()),
            email: BString::from(self.email.as_str()),
            when: Timestamp::new(self.time, self.tz),
        }
    }
}

impl FixtureChange {
    fn into_change(self) -> Result<FileChange, HistoryError> {
        let status = match self.status.as_str() {
            "A" => ChangeStatus::Added,
            "D" => ChangeStatus::Deleted,
            "M" => ChangeStatus::Modified,
            "R" => ChangeStatus::Renamed,
            other => {
                return Err(HistoryError::Corrupt(format!(
                    "unknown change status: {}",
                    other
                )))
            }
        };
        Ok(FileChange {
            path: BString::from(self.path),
            status,
            added: self.added,
            removed: self.removed,
        })
    }
}

fn parse_kind(kind: &str) -> Result<ObjectKind, HistoryError> {
    match kind {
        "commit" => Ok(ObjectKind::Commit),
        "tree" => Ok(ObjectKind::Tree),
        "blob" => Ok(ObjectKind::Blob),
        "tag" => Ok(ObjectKind::Tag),
        other => Err(HistoryError::Corrupt(format!(
            "unknown object kind: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RevisionQuery, RevisionSource};

    fn hex(n: u8) -> String {
        format!("{:02x}", n).repeat(20)
    }

    fn sample() -> String {
        format!(
            r#"{{
                "head": "main",
                "repo": {{ "name": "widgets", "enable_commit_graph": true }},
                "refs": {{ "refs/heads/main": "{c2}" }},
                "tags": [
                    {{ "name": "v1.0", "id": "{t}", "target": "{c1}",
                       "tagger": {{ "name": "Alice", "email": "alice@example.com", "time": 150 }},
                       "message": "first release\nnotes here" }}
                ],
                "commits": [
                    {{ "id": "{c1}", "message": "init",
                       "author": {{ "name": "Alice", "email": "alice@example.com", "time": 100 }},
                       "files": [ {{ "path": "src/lib.rs", "status": "A", "added": 10 }} ] }},
                    {{ "id": "{c2}", "parents": ["{c1}"], "message": "more",
                       "author": {{ "name": "Bob", "email": "bob@example.com", "time": 200, "tz": 120 }} }}
                ]
            }}"#,
            c1 = hex(1),
            c2 = hex(2),
            t = hex(9),
        )
    }

    #[test]
    fn round_trips_into_history() {
        let fixture = Fixture::from_json(&sample()).unwrap();
        assert_eq!(fixture.repo.name, "widgets");
        assert!(fixture.repo.enable_commit_graph);

        let history = fixture.into_history().unwrap();
        let mut walk = history.walk(&RevisionQuery::default()).unwrap();
        let top = walk.next_commit().unwrap().unwrap();
        assert_eq!(top.id.as_str(), hex(2));
        // Committer defaults to the author.
        assert_eq!(top.committer, top.author);
        assert_eq!(top.author.when.tz_minutes, 120);
    }

    #[test]
    fn malformed_id_is_rejected() {
        let text = r#"{ "commits": [ { "id": "xyz",
            "author": { "name": "A", "email": "a@b", "time": 1 } } ] }"#;
        let fixture = Fixture::from_json(text).unwrap();
        assert!(matches!(
            fixture.into_history(),
            Err(HistoryError::InvalidId(_))
        ));
    }

    #[test]
    fn invalid_json_is_a_fixture_error() {
        assert!(matches!(
            Fixture::from_json("{ nope"),
            Err(HistoryError::Fixture(_))
        ));
    }

    #[test]
    fn defaults_apply() {
        let fixture = Fixture::from_json("{}").unwrap();
        assert_eq!(fixture.head, "main");
        assert_eq!(fixture.repo.name, "repo");
        assert!(fixture.commits.is_empty());
    }
}
