//! Strongly-typed point identifiers.

use std::fmt;

/// Index of a record within a point table.
///
/// Point IDs are dense: a table with `n` live records addresses them as
/// `PointId(0)..PointId(n)`. The ID carries no provenance, so an ID taken
/// from one table is meaningless in another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub usize);

impl PointId {
    /// The raw index, for slicing into a record buffer.
    pub fn index(self) -> usize {
        self.0
    }

    /// The ID immediately after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for PointId {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

impl From<PointId> for usize {
    fn from(id: PointId) -> Self {
        id.0
    }
}
