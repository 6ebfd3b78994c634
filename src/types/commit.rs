use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hash::Hash;

/// an immutable snapshot node in the commit graph
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// commit message
    pub message: String,
    /// unix timestamp (seconds since epoch)
    pub timestamp: i64,
    /// parent commit hashes (empty for the root, 1 for linear, 2 for merge)
    pub parents: Vec<Hash>,
    /// complete file name -> blob hash snapshot (BTreeMap for deterministic serialization)
    pub files: BTreeMap<String, Hash>,
}

impl Commit {
    /// create a new commit with explicit timestamp
    pub fn with_timestamp(
        message: impl Into<String>,
        parents: Vec<Hash>,
        files: BTreeMap<String, Hash>,
        timestamp: i64,
    ) -> Self {
        Self {
            message: message.into(),
            timestamp,
            parents,
            files,
        }
    }

    /// the commit every repository starts from
    pub fn root() -> Self {
        Self::with_timestamp("initial commit", vec![], BTreeMap::new(), 0)
    }

    /// is this an initial commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// is this a merge commit (multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// first parent, followed by linear history
    pub fn first_parent(&self) -> Option<Hash> {
        self.parents.first().copied()
    }

    /// blob tracked under `name`, if any
    pub fn blob(&self, name: &str) -> Option<Hash> {
        self.files.get(name).copied()
    }
}
