use tracing::info;

use crate::error::Result;
use crate::hash::Hash;
use crate::object::read_commit;
use crate::ops::checkout::{clear_staging, switch_snapshot};
use crate::ops::head;
use crate::refs::{current_branch, resolve_commit, write_branch};
use crate::repo::Repo;

/// move the current branch to commit `id` and check out its snapshot
///
/// `id` may be abbreviated. returns the resolved commit hash.
pub fn reset(repo: &Repo, id: &str) -> Result<Hash> {
    let target_hash = resolve_commit(repo, id)?;
    let target = read_commit(repo, &target_hash)?;
    let branch = current_branch(repo)?;
    let (_, current) = head(repo)?;

    switch_snapshot(repo, &current, &target)?;
    write_branch(repo, &branch, &target_hash)?;
    clear_staging(repo)?;

    info!(%branch, commit = %target_hash, "reset");
    Ok(target_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testutil::{commit_file, exists, read, test_repo, write};
    use crate::ops::{add, log};
    use crate::refs::head_commit;
    use crate::staging::StagingArea;
    use crate::Error;

    #[test]
    fn test_reset_moves_branch_and_tree() {
        let (_dir, repo) = test_repo();
        let c1 = commit_file(&repo, "a", "v1", "c1");
        commit_file(&repo, "a", "v2", "c2");
        commit_file(&repo, "b", "new", "c3");

        let resolved = reset(&repo, &c1.to_hex()).unwrap();

        assert_eq!(resolved, c1);
        assert_eq!(head_commit(&repo).unwrap(), c1);
        assert_eq!(current_branch(&repo).unwrap(), "master");
        assert_eq!(read(&repo, "a"), "v1");
        assert!(!exists(&repo, "b"));
        assert_eq!(log(&repo).unwrap().len(), 2);
    }

    #[test]
    fn test_reset_clears_staging() {
        let (_dir, repo) = test_repo();
        let c1 = commit_file(&repo, "a", "v1", "c1");
        write(&repo, "b", "staged");
        add(&repo, "b").unwrap();

        reset(&repo, &c1.to_hex()[..10]).unwrap();

        assert!(StagingArea::load(&repo).unwrap().is_empty());
    }

    #[test]
    fn test_reset_unknown_commit() {
        let (_dir, repo) = test_repo();

        assert!(matches!(
            reset(&repo, "0123456789"),
            Err(Error::NoSuchCommit(_))
        ));
    }

    #[test]
    fn test_reset_untracked_in_way() {
        let (_dir, repo) = test_repo();
        let c1 = commit_file(&repo, "a", "v1", "c1");
        commit_file(&repo, "a", "v2", "c2");
        crate::ops::rm(&repo, "a").unwrap();
        let c3 = commit_file(&repo, "other", "x", "c3");
        write(&repo, "a", "local untracked");

        let result = reset(&repo, &c1.to_hex());

        assert!(matches!(result, Err(Error::UntrackedFileConflict(_))));
        assert_eq!(head_commit(&repo).unwrap(), c3);
        assert_eq!(read(&repo, "a"), "local untracked");
    }
}
