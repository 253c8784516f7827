//! Post identifiers.
//!
//! Posts use sequential integer ids assigned by the owning collection
//! (max existing + 1, or 1 when empty), so the id type is a plain integer
//! newtype rather than a UUID.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a post within the post collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(u64);

impl PostId {
    /// The id assigned to the first post in an empty collection.
    pub const FIRST: PostId = PostId(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// The id that follows this one in assignment order.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PostId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<PostId> for u64 {
    fn from(value: PostId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_increments() {
        assert_eq!(PostId::new(5).next(), PostId::new(6));
        assert_eq!(PostId::FIRST.value(), 1);
    }

    #[test]
    fn test_serde_transparent() {
        let id = PostId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: PostId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
