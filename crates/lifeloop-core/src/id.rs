//! Strongly-typed generation identifier.

use std::fmt;

/// Sequence number of a [`Generation`](crate::Generation).
///
/// `GenerationId(0)` is the blank grid produced at construction or reset.
/// Each completed tick advances the id by exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenerationId(pub u64);

impl GenerationId {
    /// The generation following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GenerationId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
