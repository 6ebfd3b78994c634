use tracing::info;

use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::object::read_commit;
use crate::ops::head;
use crate::refs::{current_branch, read_branch, resolve_commit, set_head_branch};
use crate::repo::Repo;
use crate::staging::StagingArea;
use crate::types::Commit;
use crate::worktree::{
    blocks_overwrite, check_untracked_overwrite, materialize, remove_untracked_by_target,
    restore_file, validate_file_name,
};

/// restore `name` in the working directory from HEAD
///
/// the staging area is not touched.
pub fn checkout_file(repo: &Repo, name: &str) -> Result<()> {
    let (hash, commit) = head(repo)?;
    restore_from(repo, &commit, &hash, &commit, name)
}

/// restore `name` in the working directory from the commit `id`
///
/// `id` may be abbreviated.
pub fn checkout_file_from_commit(repo: &Repo, id: &str, name: &str) -> Result<()> {
    let hash = resolve_commit(repo, id)?;
    let commit = read_commit(repo, &hash)?;
    let (_, current) = head(repo)?;
    restore_from(repo, &current, &hash, &commit, name)
}

fn restore_from(
    repo: &Repo,
    current: &Commit,
    hash: &Hash,
    commit: &Commit,
    name: &str,
) -> Result<()> {
    validate_file_name(name)?;
    let blob = commit
        .blob(name)
        .ok_or_else(|| Error::FileNotInCommit(name.to_string()))?;
    if blocks_overwrite(repo, &current.files, name, &blob)? {
        return Err(Error::UntrackedFileConflict(name.to_string()));
    }
    restore_file(repo, name, &blob)?;
    info!(file = name, commit = %hash, "checkout file");
    Ok(())
}

/// switch to another branch, replacing the working tree with its snapshot
pub fn checkout_branch(repo: &Repo, name: &str) -> Result<()> {
    let target_hash = read_branch(repo, name)?;
    if current_branch(repo)? == name {
        return Err(Error::AlreadyOnBranch(name.to_string()));
    }

    let (_, current) = head(repo)?;
    let target = read_commit(repo, &target_hash)?;

    switch_snapshot(repo, &current, &target)?;
    set_head_branch(repo, name)?;
    clear_staging(repo)?;

    info!(branch = name, commit = %target_hash, "checkout branch");
    Ok(())
}

/// replace the working tree of `current` with that of `target`
///
/// fails without touching anything if an untracked file is in the way.
pub(crate) fn switch_snapshot(repo: &Repo, current: &Commit, target: &Commit) -> Result<()> {
    check_untracked_overwrite(repo, &current.files, &target.files)?;
    materialize(repo, &target.files)?;
    remove_untracked_by_target(repo, &current.files, &target.files)
}

pub(crate) fn clear_staging(repo: &Repo) -> Result<()> {
    let mut staging = StagingArea::load(repo)?;
    staging.clear();
    staging.save(repo)
}
