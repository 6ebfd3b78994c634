use tracing::info;

use crate::error::{Error, Result};
use crate::ops::head;
use crate::repo::Repo;
use crate::staging::StagingArea;
use crate::worktree::{delete_working_file, validate_file_name};

/// unstage a file, and if HEAD tracks it, stage its removal and delete it
/// from the working directory
pub fn rm(repo: &Repo, name: &str) -> Result<()> {
    validate_file_name(name)?;

    let (_, head_commit) = head(repo)?;
    let mut staging = StagingArea::load(repo)?;

    let staged = staging.staged_blob(name).is_some();
    let tracked = head_commit.files.contains_key(name);
    if !staged && !tracked {
        return Err(Error::NoReasonToRemove(name.to_string()));
    }

    if tracked {
        staging.stage_remove(name);
        delete_working_file(repo, name)?;
    } else {
        staging.unstage_add(name);
    }

    staging.save(repo)?;
    info!(file = name, tracked, "rm");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::add;
    use crate::ops::testutil::{commit_file, exists, test_repo, write};

    #[test]
    fn test_rm_staged_only_keeps_file() {
        let (_dir, repo) = test_repo();
        write(&repo, "a", "x");
        add(&repo, "a").unwrap();

        rm(&repo, "a").unwrap();

        let staging = StagingArea::load(&repo).unwrap();
        assert!(staging.is_empty());
        assert!(exists(&repo, "a"));
    }

    #[test]
    fn test_rm_tracked_deletes_file() {
        let (_dir, repo) = test_repo();
        commit_file(&repo, "a", "x", "c1");

        rm(&repo, "a").unwrap();

        let staging = StagingArea::load(&repo).unwrap();
        assert!(staging.is_removed("a"));
        assert!(!exists(&repo, "a"));
    }

    #[test]
    fn test_rm_tracked_already_deleted() {
        let (_dir, repo) = test_repo();
        commit_file(&repo, "a", "x", "c1");
        std::fs::remove_file(repo.work_dir().join("a")).unwrap();

        rm(&repo, "a").unwrap();
        assert!(StagingArea::load(&repo).unwrap().is_removed("a"));
    }

    #[test]
    fn test_rm_tracked_and_restaged_drops_add() {
        let (_dir, repo) = test_repo();
        commit_file(&repo, "a", "x", "c1");
        write(&repo, "a", "y");
        add(&repo, "a").unwrap();

        rm(&repo, "a").unwrap();

        let staging = StagingArea::load(&repo).unwrap();
        assert_eq!(staging.staged_blob("a"), None);
        assert!(staging.is_removed("a"));
    }

    #[test]
    fn test_rm_unknown_file() {
        let (_dir, repo) = test_repo();
        write(&repo, "stray", "x");

        let result = rm(&repo, "stray");
        assert!(matches!(result, Err(Error::NoReasonToRemove(_))));
        assert!(exists(&repo, "stray"));
    }
}
