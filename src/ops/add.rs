use tracing::info;

use crate::error::{Error, Result};
use crate::hash::{compute_blob_hash, Hash};
use crate::object::write_blob;
use crate::ops::head;
use crate::repo::Repo;
use crate::staging::StagingArea;
use crate::worktree::{read_working_file, validate_file_name};

/// what `add` did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// content differs from HEAD and is now staged
    Staged(Hash),
    /// content matches HEAD; any stale staged entry was dropped
    Unchanged,
}

/// stage a working file for the next commit
pub fn add(repo: &Repo, name: &str) -> Result<AddOutcome> {
    validate_file_name(name)?;

    let content =
        read_working_file(repo, name)?.ok_or_else(|| Error::FileNotFound(name.to_string()))?;
    let hash = compute_blob_hash(&content);

    let (_, head_commit) = head(repo)?;
    let mut staging = StagingArea::load(repo)?;

    let outcome = if head_commit.blob(name) == Some(hash) {
        staging.unstage_add(name);
        staging.unstage_remove(name);
        AddOutcome::Unchanged
    } else {
        write_blob(repo, &content)?;
        staging.stage_add(name, hash);
        AddOutcome::Staged(hash)
    };

    staging.save(repo)?;
    info!(file = name, ?outcome, "add");

    Ok(outcome)
}
