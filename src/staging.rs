use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::fs::atomic_write;
use crate::hash::Hash;
use crate::repo::Repo;

/// pending add/remove intent applied by the next commit
///
/// a name is never both added and removed: each mutation clears the
/// opposite entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingArea {
    /// file name -> blob already written to the store
    #[serde(default)]
    added: BTreeMap<String, Hash>,
    /// file names to untrack
    #[serde(default)]
    removed: BTreeSet<String>,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// load the staging area persisted in the repository
    ///
    /// a missing file means nothing is staged.
    pub fn load(repo: &Repo) -> Result<Self> {
        let path = repo.staging_path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(Error::Io { path, source }),
        };

        let staging: StagingArea = ciborium::from_reader(&bytes[..])?;
        Ok(staging)
    }

    /// persist to the repository atomically
    pub fn save(&self, repo: &Repo) -> Result<()> {
        let mut bytes = Vec::new();
        ciborium::into_writer(self, &mut bytes)?;
        atomic_write(&repo.tmp_path(), &repo.staging_path(), &bytes)?;
        debug!(added = self.added.len(), removed = self.removed.len(), "saved staging area");
        Ok(())
    }

    /// stage `name` with content `blob`, cancelling any pending removal
    pub fn stage_add(&mut self, name: impl Into<String>, blob: Hash) {
        let name = name.into();
        self.removed.remove(&name);
        self.added.insert(name, blob);
    }

    /// stage `name` for removal, cancelling any pending add
    pub fn stage_remove(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.added.remove(&name);
        self.removed.insert(name);
    }

    /// drop a pending add; returns whether one existed
    pub fn unstage_add(&mut self, name: &str) -> bool {
        self.added.remove(name).is_some()
    }

    /// drop a pending removal; returns whether one existed
    pub fn unstage_remove(&mut self, name: &str) -> bool {
        self.removed.remove(name)
    }

    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn added(&self) -> &BTreeMap<String, Hash> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn staged_blob(&self, name: &str) -> Option<Hash> {
        self.added.get(name).copied()
    }

    pub fn is_removed(&self, name: &str) -> bool {
        self.removed.contains(name)
    }

    /// the snapshot a commit on top of `files` would record
    pub fn apply_to(&self, files: &BTreeMap<String, Hash>) -> BTreeMap<String, Hash> {
        let mut result = files.clone();
        for (name, blob) in &self.added {
            result.insert(name.clone(), *blob);
        }
        for name in &self.removed {
            result.remove(name);
        }
        result
    }
}
