//! History access for the gitview page renderers.
//!
//! This crate owns the data model (commits, signatures, tags, file pairs)
//! and the pull-based contracts the renderers consume: a revision source, a
//! graph layout engine, a diff engine, and a tag index. It also ships a
//! complete in-memory implementation of all four, fed from a JSON fixture,
//! which backs the CLI and the test suites. Nothing here touches an actual
//! object database; identifiers arrive pre-hashed.

pub mod commit;
pub mod fixture;
pub mod graph;
pub mod id;
pub mod memory;
pub mod source;
pub mod tag;

pub use commit::{Commit, Signature, Timestamp};
pub use fixture::Fixture;
pub use graph::MemoryGraph;
pub use id::CommitId;
pub use memory::{FileChange, MemoryHistory, MemoryWalk};
pub use source::{
    ChangeStatus, DiffEngine, FilePair, GraphLayout, GrepKind, RevisionQuery, RevisionSource,
    TagIndex,
};
pub use tag::{AnnotatedTag, ObjectKind, ResolvedTag, TagTarget};

/// Errors produced while resolving or walking history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("invalid commit id: {0}")]
    InvalidId(String),

    #[error("unknown revision: {0}")]
    UnknownRevision(String),

    #[error("corrupt history entry: {0}")]
    Corrupt(String),

    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid fixture: {0}")]
    Fixture(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
