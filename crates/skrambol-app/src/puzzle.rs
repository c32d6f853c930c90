//! Puzzle identity and metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifies the image a session is played on.
///
/// Snapshots and game records are keyed by this id.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct PuzzleId(String);

impl PuzzleId {
    /// Creates an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PuzzleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PuzzleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Metadata for the puzzle being played.
///
/// The session only needs [`id`](Self::id); the rest is carried for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleInfo {
    /// Puzzle identifier.
    pub id: PuzzleId,
    /// Location of the reference image.
    pub image_url: String,
    /// Human-readable title.
    pub title: String,
    /// Credits for the image, such as `author` or `source`.
    pub attribution: BTreeMap<String, String>,
}

impl PuzzleInfo {
    /// Creates puzzle metadata with no attribution.
    #[must_use]
    pub fn new(
        id: impl Into<PuzzleId>,
        image_url: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            image_url: image_url.into(),
            title: title.into(),
            attribution: BTreeMap::new(),
        }
    }

    /// Adds an attribution entry.
    #[must_use]
    pub fn with_attribution(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribution.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_puzzle_info_builder() {
        let info = PuzzleInfo::new("p-1", "https://example.com/p.jpg", "Harbour")
            .with_attribution("author", "A. Photographer")
            .with_attribution("source", "unsplash");

        assert_eq!(info.id.as_str(), "p-1");
        assert_eq!(info.attribution.len(), 2);
        assert_eq!(info.attribution["author"], "A. Photographer");
    }

    #[test]
    fn test_puzzle_id_serializes_as_string() {
        let id = PuzzleId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        assert_eq!(id.to_string(), "abc");
        assert!(PuzzleId::new("").is_empty());
    }
}
