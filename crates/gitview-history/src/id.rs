use std::fmt;
use std::str::FromStr;

use crate::HistoryError;

/// A commit identifier: a fixed-width lowercase hex content hash.
///
/// Ids are opaque display tokens here — they are produced by whatever
/// engine walked the repository and are never recomputed. Parsing only
/// enforces the shape so links and abbreviations are always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    /// Hex length of a full id.
    pub const HEX_LEN: usize = 40;

    /// Default abbreviation length for display.
    pub const SHORT_LEN: usize = 7;

    /// Parse and normalize a full-length hex id.
    pub fn parse(input: &str) -> Result<Self, HistoryError> {
        if input.len() != Self::HEX_LEN || !input.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HistoryError::InvalidId(input.to_string()));
        }
        Ok(Self(input.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated prefix of `len` hex chars (clamped to the full length).
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(Self::HEX_LEN)]
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CommitId {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
