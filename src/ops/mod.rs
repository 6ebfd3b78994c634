//! high-level operations on sprig repositories

mod add;
mod branch;
mod checkout;
mod commit;
mod fsck;
mod init;
mod log;
mod merge;
mod reset;
mod rm;
mod status;

pub use add::{add, AddOutcome};
pub use branch::{branch, rm_branch};
pub use checkout::{checkout_branch, checkout_file, checkout_file_from_commit};
pub use commit::commit;
pub use fsck::{fsck, CorruptObject, FsckReport, MissingObject};
pub use init::{init, init_with_config};
pub use log::{find, global_log, log, LogEntry};
pub use merge::{merge, MergeOutcome};
pub use reset::reset;
pub use rm::rm;
pub use status::{status, Status};

use crate::error::Result;
use crate::hash::Hash;
use crate::object::read_commit;
use crate::refs::head_commit;
use crate::repo::Repo;
use crate::types::Commit;

/// the commit HEAD resolves to, with its hash
pub(crate) fn head(repo: &Repo) -> Result<(Hash, Commit)> {
    let hash = head_commit(repo)?;
    let commit = read_commit(repo, &hash)?;
    Ok((hash, commit))
}

/// current unix time in seconds
pub(crate) fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::fs;

    use tempfile::TempDir;

    use crate::repo::Repo;

    /// fresh repository with a root commit on master
    pub fn test_repo() -> (TempDir, Repo) {
        let dir = tempfile::tempdir().unwrap();
        let repo = super::init(dir.path()).unwrap();
        (dir, repo)
    }

    /// write a working file
    pub fn write(repo: &Repo, name: &str, content: &str) {
        fs::write(repo.work_dir().join(name), content).unwrap();
    }

    /// read a working file
    pub fn read(repo: &Repo, name: &str) -> String {
        fs::read_to_string(repo.work_dir().join(name)).unwrap()
    }

    /// does a working file exist
    pub fn exists(repo: &Repo, name: &str) -> bool {
        repo.work_dir().join(name).exists()
    }

    /// write, stage and commit one file
    pub fn commit_file(repo: &Repo, name: &str, content: &str, message: &str) -> crate::Hash {
        write(repo, name, content);
        super::add(repo, name).unwrap();
        super::commit(repo, message).unwrap()
    }
}
