use bstr::{BStr, BString, ByteSlice};

use crate::id::CommitId;

/// A timestamp with the timezone it was recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    /// Seconds since the Unix epoch.
    pub secs: i64,
    /// Timezone offset in minutes from UTC (e.g., -300 for EST).
    pub tz_minutes: i32,
}

impl Timestamp {
    pub fn new(secs: i64, tz_minutes: i32) -> Self {
        Self { secs, tz_minutes }
    }
}

/// An identity plus the time it acted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: BString,
    pub email: BString,
    pub when: Timestamp,
}

/// One commit as delivered by a revision source.
///
/// Owned for the duration of a single render iteration and dropped once its
/// rows are emitted; the renderers never retain more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: CommitId,
    /// Parent ids, first parent first (empty for a root commit).
    pub parents: Vec<CommitId>,
    pub author: Signature,
    pub committer: Signature,
    /// Full message body; may span multiple lines, may be empty.
    pub message: BString,
    /// Raw ref names attached to this commit, in index order.
    pub decorations: Vec<BString>,
}

impl Commit {
    /// First line of the message (the whole message if single-line).
    pub fn subject(&self) -> &BStr {
        match self.message.find_byte(b'\n') {
            Some(pos) => self.message[..pos].as_bstr(),
            None => self.message.as_bstr(),
        }
    }

    /// Message with trailing blank space removed, as shown in the
    /// expanded-message row.
    pub fn display_message(&self) -> &BStr {
        self.message.trim_end().as_bstr()
    }

    /// Number of lines the expanded message occupies. An empty message
    /// still occupies its one (blank) display line.
    pub fn message_lines(&self) -> usize {
        let trimmed = self.message.trim_end();
        if trimmed.is_empty() {
            1
        } else {
            trimmed.iter().filter(|&&b| b == b'\n').count() + 1
        }
    }

    pub fn first_parent(&self) -> Option<&CommitId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(message: &str) -> Commit {
        let sig = Signature {
            name: BString::from("A"),
            email: BString::from("a@example.com"),
            when: Timestamp::new(1_700_000_000, 0),
        };
        Commit {
            id: CommitId::parse(&"1".repeat(40)).unwrap(),
            parents: Vec::new(),
            author: sig.clone(),
            committer: sig,
            message: BString::from(message),
            decorations: Vec::new(),
        }
    }

    #[test]
    fn subject_is_first_line() {
        assert_eq!(commit("fix bug\n\ndetails").subject(), "fix bug");
        assert_eq!(commit("oneline").subject(), "oneline");
        assert_eq!(commit("").subject(), "");
    }

    #[test]
    fn message_lines_ignores_trailing_newlines() {
        assert_eq!(commit("a\nb\n\n").message_lines(), 2);
        assert_eq!(commit("a").message_lines(), 1);
        assert_eq!(commit("a\n\nb").message_lines(), 3);
    }

    #[test]
    fn empty_message_occupies_one_line() {
        assert_eq!(commit("").message_lines(), 1);
        assert_eq!(commit("\n\n").message_lines(), 1);
    }
}
