use bstr::BString;

use crate::commit::Signature;
use crate::id::CommitId;

/// Kind of object a tag points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Commit,
    Tree,
    Blob,
    Tag,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Tree => "tree",
            Self::Blob => "blob",
            Self::Tag => "tag",
        }
    }
}

/// The object a tag resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTarget {
    pub id: CommitId,
    pub kind: ObjectKind,
}

/// An annotated tag object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedTag {
    /// Id of the tag object itself.
    pub id: CommitId,
    /// Tag name (without the `refs/tags/` prefix).
    pub name: BString,
    pub target: TagTarget,
    /// Optional for very old tags.
    pub tagger: Option<Signature>,
    pub message: BString,
}

/// Result of resolving a tag name.
///
/// A lightweight tag is just a ref; there is no tag object, so only the
/// target survives resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTag {
    Annotated(AnnotatedTag),
    Lightweight(TagTarget),
}
