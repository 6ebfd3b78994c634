use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::object::write_commit;
use crate::refs::{set_head_branch, write_branch};
use crate::repo::Repo;
use crate::staging::StagingArea;
use crate::types::Commit;

/// initialize a repository in `work_dir` with default configuration
pub fn init(work_dir: &Path) -> Result<Repo> {
    init_with_config(work_dir, Config::default())
}

/// initialize a repository: layout, root commit, default branch, HEAD
/// and an empty staging area
pub fn init_with_config(work_dir: &Path, config: Config) -> Result<Repo> {
    let repo = Repo::init_with_config(work_dir, config)?;

    let root = write_commit(&repo, &Commit::root())?;
    let branch = repo.config().default_branch.clone();
    write_branch(&repo, &branch, &root)?;
    set_head_branch(&repo, &branch)?;
    StagingArea::new().save(&repo)?;

    info!(path = %work_dir.display(), %branch, %root, "initialized repository");
    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::read_commit;
    use crate::refs::{current_branch, head_commit, list_branches};
    use crate::Error;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_root_commit() {
        let dir = tempdir().unwrap();
        let repo = init(dir.path()).unwrap();

        assert_eq!(current_branch(&repo).unwrap(), "master");
        assert_eq!(list_branches(&repo).unwrap(), vec!["master".to_string()]);

        let root = read_commit(&repo, &head_commit(&repo).unwrap()).unwrap();
        assert_eq!(root, Commit::root());
        assert!(root.files.is_empty());
        assert!(StagingArea::load(&repo).unwrap().is_empty());
    }

    #[test]
    fn test_root_commit_is_shared() {
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();

        let ra = init(a.path()).unwrap();
        let rb = init(b.path()).unwrap();

        assert_eq!(head_commit(&ra).unwrap(), head_commit(&rb).unwrap());
    }

    #[test]
    fn test_init_with_custom_branch() {
        let dir = tempdir().unwrap();
        let config = Config {
            default_branch: "main".to_string(),
            ..Config::default()
        };
        let repo = init_with_config(dir.path(), config).unwrap();

        assert_eq!(current_branch(&repo).unwrap(), "main");
    }

    #[test]
    fn test_init_twice_fails() {
        let dir = tempdir().unwrap();
        init(dir.path()).unwrap();

        assert!(matches!(init(dir.path()), Err(Error::RepoExists(_))));
    }
}
