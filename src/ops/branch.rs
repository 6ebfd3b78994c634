use tracing::info;

use crate::error::{Error, Result};
use crate::refs::{branch_exists, current_branch, delete_branch, head_commit, write_branch};
use crate::repo::Repo;

/// create a branch pointing at HEAD's commit; HEAD does not move
pub fn branch(repo: &Repo, name: &str) -> Result<()> {
    if branch_exists(repo, name) {
        return Err(Error::BranchExists(name.to_string()));
    }

    let hash = head_commit(repo)?;
    write_branch(repo, name, &hash)?;

    info!(branch = name, %hash, "branch");
    Ok(())
}

/// delete a branch pointer; its commits stay in the store
pub fn rm_branch(repo: &Repo, name: &str) -> Result<()> {
    if !branch_exists(repo, name) {
        return Err(Error::NoSuchBranch(name.to_string()));
    }
    if current_branch(repo)? == name {
        return Err(Error::CannotRemoveCurrentBranch(name.to_string()));
    }

    delete_branch(repo, name)?;

    info!(branch = name, "rm-branch");
    Ok(())
}
