//! synchronizes the working directory with stored snapshots
//!
//! the working tree is flat: only regular files directly inside the
//! working directory take part.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::fs::{read_file_if_exists, remove_file_if_exists, write_file};
use crate::hash::{compute_blob_hash, Hash};
use crate::object::read_blob;
use crate::repo::{Repo, SPRIG_DIR};
use crate::staging::StagingArea;

/// reject names that are not plain file names in the working directory
pub fn validate_file_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name == SPRIG_DIR
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(Error::InvalidFileName(name.to_string()));
    }
    Ok(())
}

/// names of the files currently in the working directory
pub fn list_working_files(repo: &Repo) -> Result<BTreeSet<String>> {
    crate::fs::list_plain_files(repo.work_dir())
}

/// content of a working-directory file, None if it is absent
pub fn read_working_file(repo: &Repo, name: &str) -> Result<Option<Vec<u8>>> {
    read_file_if_exists(&repo.work_dir().join(name))
}

/// blob hash of a working-directory file, None if it is absent
pub fn working_file_hash(repo: &Repo, name: &str) -> Result<Option<Hash>> {
    Ok(read_working_file(repo, name)?.map(|content| compute_blob_hash(&content)))
}

/// write one stored blob over the working-directory file `name`
pub fn restore_file(repo: &Repo, name: &str, blob: &Hash) -> Result<()> {
    let content = read_blob(repo, blob)?;
    write_file(&repo.work_dir().join(name), &content)
}

/// delete a working-directory file if present
pub fn delete_working_file(repo: &Repo, name: &str) -> Result<()> {
    if remove_file_if_exists(&repo.work_dir().join(name))? {
        debug!(file = name, "deleted working file");
    }
    Ok(())
}

/// write every tracked blob into the working directory
///
/// existing files are overwritten without backup.
pub fn materialize(repo: &Repo, files: &BTreeMap<String, Hash>) -> Result<()> {
    for (name, blob) in files {
        restore_file(repo, name, blob)?;
    }
    debug!(files = files.len(), "materialized snapshot");
    Ok(())
}

/// delete files tracked by `current` that `target` does not track
pub fn remove_untracked_by_target(
    repo: &Repo,
    current: &BTreeMap<String, Hash>,
    target: &BTreeMap<String, Hash>,
) -> Result<()> {
    for name in current.keys() {
        if !target.contains_key(name) {
            delete_working_file(repo, name)?;
        }
    }
    Ok(())
}

/// would writing `incoming` over `name` clobber an untracked file
///
/// true when the file exists, `current` does not track it, and its
/// content differs from what would be written.
pub fn blocks_overwrite(
    repo: &Repo,
    current: &BTreeMap<String, Hash>,
    name: &str,
    incoming: &Hash,
) -> Result<bool> {
    if current.contains_key(name) {
        return Ok(false);
    }
    Ok(matches!(working_file_hash(repo, name)?, Some(live) if live != *incoming))
}

/// fail before an operation that would replace `current` with `target`
/// overwrites an untracked working file
pub fn check_untracked_overwrite(
    repo: &Repo,
    current: &BTreeMap<String, Hash>,
    target: &BTreeMap<String, Hash>,
) -> Result<()> {
    for (name, blob) in target {
        if blocks_overwrite(repo, current, name, blob)? {
            return Err(Error::UntrackedFileConflict(name.clone()));
        }
    }
    Ok(())
}

/// working-tree side of a status report
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkTreeStatus {
    /// "<name> (modified)" / "<name> (deleted)" entries, sorted
    pub modified_not_staged: Vec<String>,
    /// files on disk that are neither tracked nor staged, sorted
    pub untracked: Vec<String>,
}

/// how a tracked or staged file differs from its baseline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modification {
    Modified,
    Deleted,
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modification::Modified => f.write_str("modified"),
            Modification::Deleted => f.write_str("deleted"),
        }
    }
}

/// compare tracked and staged files against the working directory
///
/// the baseline of a name is its staged blob if any, else its committed
/// blob. a file missing from disk counts as deleted unless a pending
/// removal covers it.
pub fn classify_status(
    repo: &Repo,
    tracked: &BTreeMap<String, Hash>,
    staging: &StagingArea,
    cwd_listing: &BTreeSet<String>,
) -> Result<WorkTreeStatus> {
    let mut status = WorkTreeStatus::default();

    let names: BTreeSet<&String> = tracked.keys().chain(staging.added().keys()).collect();

    for name in names {
        let staged = staging.staged_blob(name);
        let baseline = staged.or_else(|| tracked.get(name.as_str()).copied());

        let change = if cwd_listing.contains(name.as_str()) {
            let live = working_file_hash(repo, name)?;
            match (baseline, live) {
                (Some(expected), Some(actual)) if expected != actual => Some(Modification::Modified),
                _ => None,
            }
        } else if staged.is_some() || (baseline.is_some() && !staging.is_removed(name)) {
            Some(Modification::Deleted)
        } else {
            None
        };

        if let Some(change) = change {
            status.modified_not_staged.push(format!("{} ({})", name, change));
        }
    }

    for name in cwd_listing {
        if !tracked.contains_key(name) && staging.staged_blob(name).is_none() {
            status.untracked.push(name.clone());
        }
    }

    status.modified_not_staged.sort();
    Ok(status)
}
