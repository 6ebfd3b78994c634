use tracing::info;

use crate::error::{Error, Result};
use crate::graph::create_commit;
use crate::hash::Hash;
use crate::ops::{head, now};
use crate::refs::{current_branch, write_branch};
use crate::repo::Repo;
use crate::staging::StagingArea;

/// record the staged changes as a new commit on the current branch
pub fn commit(repo: &Repo, message: &str) -> Result<Hash> {
    if message.is_empty() {
        return Err(Error::EmptyMessage);
    }

    let mut staging = StagingArea::load(repo)?;
    if staging.is_empty() {
        return Err(Error::NothingToCommit);
    }

    let branch = current_branch(repo)?;
    let (parent, parent_commit) = head(repo)?;
    let files = staging.apply_to(&parent_commit.files);

    let hash = create_commit(repo, message, vec![parent], files, now())?;
    write_branch(repo, &branch, &hash)?;

    staging.clear();
    staging.save(repo)?;

    info!(%hash, %branch, "commit");
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::compute_blob_hash;
    use crate::object::read_commit;
    use crate::ops::testutil::{commit_file, test_repo, write};
    use crate::ops::{add, rm};
    use crate::refs::head_commit;

    #[test]
    fn test_commit_tracks_staged_file() {
        let (_dir, repo) = test_repo();
        let root = head_commit(&repo).unwrap();

        let hash = commit_file(&repo, "a", "x", "c1");

        assert_eq!(head_commit(&repo).unwrap(), hash);
        let c = read_commit(&repo, &hash).unwrap();
        assert_eq!(c.message, "c1");
        assert_eq!(c.parents, vec![root]);
        assert_eq!(c.files.len(), 1);
        assert_eq!(c.blob("a"), Some(compute_blob_hash(b"x")));
        assert!(StagingArea::load(&repo).unwrap().is_empty());
    }

    #[test]
    fn test_commit_carries_parent_files() {
        let (_dir, repo) = test_repo();
        commit_file(&repo, "a", "1", "c1");
        let hash = commit_file(&repo, "b", "2", "c2");

        let c = read_commit(&repo, &hash).unwrap();
        assert_eq!(c.blob("a"), Some(compute_blob_hash(b"1")));
        assert_eq!(c.blob("b"), Some(compute_blob_hash(b"2")));
    }

    #[test]
    fn test_commit_applies_removal() {
        let (_dir, repo) = test_repo();
        commit_file(&repo, "a", "1", "c1");

        rm(&repo, "a").unwrap();
        let hash = commit(&repo, "remove a").unwrap();

        assert!(read_commit(&repo, &hash).unwrap().files.is_empty());
    }

    #[test]
    fn test_commit_empty_message() {
        let (_dir, repo) = test_repo();
        write(&repo, "a", "x");
        add(&repo, "a").unwrap();

        assert!(matches!(commit(&repo, ""), Err(Error::EmptyMessage)));
    }

    #[test]
    fn test_commit_nothing_staged() {
        let (_dir, repo) = test_repo();

        assert!(matches!(commit(&repo, "msg"), Err(Error::NothingToCommit)));
    }
}
