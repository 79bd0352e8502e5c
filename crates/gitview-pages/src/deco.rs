//! Ref decorations: classification and badge rendering.

use std::io::Write;

use bstr::{BStr, ByteSlice};
use gitview_history::Commit;
use gitview_html::Html;

use crate::error::PageError;
use crate::links::{commit_href, tag_href, LogLink};
use crate::log::LogRequest;
use crate::options::PageContext;

/// What namespace a decorating ref name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    Branch,
    AnnotatedTag,
    LightweightTag,
    Remote,
    /// Anything else; the full name is kept verbatim and treated as an
    /// alias for the commit itself.
    Other,
}

impl DecorationKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Branch => "branch-deco",
            Self::AnnotatedTag | Self::LightweightTag => "tag-deco",
            Self::Remote => "remote-deco",
            Self::Other => "deco",
        }
    }
}

/// One classified decoration: an owned display label plus its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub label: String,
    pub kind: DecorationKind,
}

/// Classify a raw ref name. Total: every input maps to exactly one kind,
/// with the most specific namespace prefix winning; anything unrecognized
/// degrades to `Other` with the raw name as its label.
pub fn classify(name: &BStr) -> Decoration {
    let rules: [(&[u8], DecorationKind); 4] = [
        (b"refs/heads/", DecorationKind::Branch),
        (b"tag: refs/tags/", DecorationKind::AnnotatedTag),
        (b"refs/tags/", DecorationKind::LightweightTag),
        (b"refs/remotes/", DecorationKind::Remote),
    ];
    for (prefix, kind) in rules {
        if let Some(rest) = name.strip_prefix(prefix) {
            return Decoration {
                label: rest.to_str_lossy().into_owned(),
                kind,
            };
        }
    }
    Decoration {
        label: name.to_str_lossy().into_owned(),
        kind: DecorationKind::Other,
    }
}

/// Render a commit's decorations as inline linked badges, in input order.
pub fn render_decorations<W: Write>(
    out: &mut Html<W>,
    ctx: &PageContext,
    req: &LogRequest,
    commit: &Commit,
) -> Result<(), PageError> {
    for name in &commit.decorations {
        let deco = classify(name.as_bstr());
        let href = match deco.kind {
            DecorationKind::Branch => LogLink {
                head: Some(&deco.label),
                path: req.path.as_deref(),
                count: req.window.count,
                show_message: req.window.show_message,
                ..Default::default()
            }
            .href(ctx),
            DecorationKind::AnnotatedTag | DecorationKind::LightweightTag => {
                tag_href(ctx, &deco.label)
            }
            DecorationKind::Remote => LogLink {
                rev: Some(commit.id.as_str()),
                path: req.path.as_deref(),
                count: req.window.count,
                show_message: req.window.show_message,
                ..Default::default()
            }
            .href(ctx),
            DecorationKind::Other => commit_href(ctx, &commit.id, req.path.as_deref()),
        };
        out.link_open(&href, Some(deco.kind.css_class()))?;
        out.text(BStr::new(&deco.label))?;
        out.link_close()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kind_of(name: &str) -> DecorationKind {
        classify(BStr::new(name)).kind
    }

    #[test]
    fn namespace_prefixes_classify() {
        assert_eq!(kind_of("refs/heads/main"), DecorationKind::Branch);
        assert_eq!(kind_of("tag: refs/tags/v1.0"), DecorationKind::AnnotatedTag);
        assert_eq!(kind_of("refs/tags/v1.0"), DecorationKind::LightweightTag);
        assert_eq!(kind_of("refs/remotes/origin/main"), DecorationKind::Remote);
        assert_eq!(kind_of("refs/stash"), DecorationKind::Other);
        assert_eq!(kind_of("HEAD"), DecorationKind::Other);
    }

    #[test]
    fn labels_strip_the_matched_prefix_only() {
        let deco = classify(BStr::new("tag: refs/tags/v1.0"));
        assert_eq!(deco.label, "v1.0");
        let deco = classify(BStr::new("refs/remotes/origin/feature/x"));
        assert_eq!(deco.label, "origin/feature/x");
        let deco = classify(BStr::new("refs/notes/commits"));
        assert_eq!(deco.label, "refs/notes/commits");
    }

    #[test]
    fn most_specific_prefix_wins() {
        // The annotated marker must not fall through to the remote or
        // lightweight rules even though their prefixes occur inside it.
        assert_eq!(kind_of("tag: refs/tags/x"), DecorationKind::AnnotatedTag);
        // A branch that embeds "refs/tags/" in its own name stays a branch.
        assert_eq!(kind_of("refs/heads/refs/tags/x"), DecorationKind::Branch);
    }

    #[test]
    fn labels_are_owned_and_untruncated() {
        let long = format!("refs/heads/{}", "x".repeat(4096));
        let deco = classify(BStr::new(&long));
        assert_eq!(deco.label.len(), 4096);
    }

    proptest! {
        /// Classification is total and deterministic over arbitrary bytes.
        #[test]
        fn classification_is_total(bytes in proptest::collection::vec(any::<u8>(), 0..100)) {
            let a = classify(BStr::new(&bytes));
            let b = classify(BStr::new(&bytes));
            prop_assert_eq!(a, b);
        }

        /// Unprefixed names keep their full text as the label.
        #[test]
        fn other_keeps_raw_label(s in "[a-zA-Z0-9_]{1,40}") {
            let deco = classify(BStr::new(&s));
            prop_assert_eq!(deco.kind, DecorationKind::Other);
            prop_assert_eq!(deco.label, s);
        }
    }
}
