use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::hash::{Hash, ObjectKind};
use crate::object::{list_objects, read_commit, store};
use crate::refs::{list_branches, read_branch};
use crate::repo::Repo;

/// fsck report
#[derive(Debug, Default)]
pub struct FsckReport {
    /// objects checked
    pub objects_checked: usize,
    /// corrupt objects (hash mismatch or undecodable)
    pub corrupt_objects: Vec<CorruptObject>,
    /// missing objects referenced by branches or commits
    pub missing_objects: Vec<MissingObject>,
    /// dangling objects (not reachable from any branch)
    pub dangling_objects: Vec<Hash>,
}

impl FsckReport {
    pub fn is_ok(&self) -> bool {
        self.corrupt_objects.is_empty() && self.missing_objects.is_empty()
    }
}

#[derive(Debug)]
pub struct CorruptObject {
    pub hash: Hash,
    pub message: String,
}

#[derive(Debug)]
pub struct MissingObject {
    pub hash: Hash,
    pub object_type: ObjectKind,
    pub referenced_by: String,
}

/// verify repository integrity
pub fn fsck(repo: &Repo) -> Result<FsckReport> {
    let mut report = FsckReport::default();
    let mut reachable = HashSet::new();

    // walk everything reachable from a branch
    for branch in list_branches(repo)? {
        let commit_hash = read_branch(repo, &branch)?;
        check_commit(
            repo,
            &commit_hash,
            &format!("branch {}", branch),
            &mut reachable,
            &mut report,
        )?;
    }

    // re-hash every stored object
    for hash in list_objects(repo)? {
        report.objects_checked += 1;

        match store::get(repo, &hash) {
            Ok(_) => {}
            Err(Error::CorruptObject(_)) => {
                report.corrupt_objects.push(CorruptObject {
                    hash,
                    message: "hash mismatch".to_string(),
                });
            }
            Err(Error::CorruptObjectMessage(message)) => {
                report.corrupt_objects.push(CorruptObject { hash, message });
            }
            Err(e) => return Err(e),
        }

        if !reachable.contains(&hash) {
            report.dangling_objects.push(hash);
        }
    }

    Ok(report)
}

fn check_commit(
    repo: &Repo,
    commit_hash: &Hash,
    referenced_by: &str,
    reachable: &mut HashSet<Hash>,
    report: &mut FsckReport,
) -> Result<()> {
    if !reachable.insert(*commit_hash) {
        return Ok(());
    }

    match read_commit(repo, commit_hash) {
        Ok(commit) => {
            for (name, blob) in &commit.files {
                if !reachable.insert(*blob) {
                    continue;
                }
                if !store::exists(repo, blob) {
                    report.missing_objects.push(MissingObject {
                        hash: *blob,
                        object_type: ObjectKind::Blob,
                        referenced_by: format!("commit {} file {}", commit_hash, name),
                    });
                }
            }

            for parent in &commit.parents {
                check_commit(
                    repo,
                    parent,
                    &format!("commit {}", commit_hash),
                    reachable,
                    report,
                )?;
            }
        }
        Err(Error::ObjectNotFound(_)) => {
            report.missing_objects.push(MissingObject {
                hash: *commit_hash,
                object_type: ObjectKind::Commit,
                referenced_by: referenced_by.to_string(),
            });
        }
        // reported by the per-object pass
        Err(Error::CorruptObject(_))
        | Err(Error::CorruptObjectMessage(_))
        | Err(Error::InvalidObjectType { .. })
        | Err(Error::CborDecode(_)) => {}
        Err(e) => return Err(e),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{object_path, write_blob};
    use crate::ops::testutil::{commit_file, test_repo};
    use crate::ops::{branch, rm_branch};
    use std::fs;

    #[test]
    fn test_fsck_healthy_repo() {
        let (_dir, repo) = test_repo();
        commit_file(&repo, "file.txt", "content", "test");

        let report = fsck(&repo).unwrap();

        assert!(report.is_ok());
        assert!(report.corrupt_objects.is_empty());
        assert!(report.missing_objects.is_empty());
        assert!(report.dangling_objects.is_empty());
        // root commit, one commit, one blob
        assert_eq!(report.objects_checked, 3);
    }

    #[test]
    fn test_fsck_with_dangling() {
        let (_dir, repo) = test_repo();
        branch(&repo, "feature").unwrap();
        crate::ops::checkout_branch(&repo, "feature").unwrap();
        let side = commit_file(&repo, "file.txt", "content", "test");
        crate::ops::checkout_branch(&repo, "master").unwrap();

        rm_branch(&repo, "feature").unwrap();
        let stray = write_blob(&repo, b"never committed").unwrap();

        let report = fsck(&repo).unwrap();

        assert!(report.is_ok());
        assert!(report.dangling_objects.contains(&side));
        assert!(report.dangling_objects.contains(&stray));
    }

    #[test]
    fn test_fsck_missing_blob() {
        let (_dir, repo) = test_repo();
        commit_file(&repo, "file.txt", "content", "test");
        let blob = crate::hash::compute_blob_hash(b"content");
        fs::remove_file(object_path(&repo, &blob)).unwrap();

        let report = fsck(&repo).unwrap();

        assert!(!report.is_ok());
        assert_eq!(report.missing_objects.len(), 1);
        assert_eq!(report.missing_objects[0].hash, blob);
        assert_eq!(report.missing_objects[0].object_type, ObjectKind::Blob);
    }

    #[test]
    fn test_fsck_reports_undecodable_object() {
        let (_dir, repo) = test_repo();
        let blob = write_blob(&repo, b"payload").unwrap();
        fs::write(object_path(&repo, &blob), b"garbage, not zstd").unwrap();

        let report = fsck(&repo).unwrap();

        assert!(!report.is_ok());
        assert_eq!(report.corrupt_objects.len(), 1);
        assert_eq!(report.corrupt_objects[0].hash, blob);
        assert!(report.corrupt_objects[0].message.contains("undecodable"));
    }

    #[test]
    fn test_fsck_corrupt_object() {
        let (_dir, repo) = test_repo();
        let blob = write_blob(&repo, b"payload").unwrap();
        let other = write_blob(&repo, b"something else").unwrap();

        // swap in another object's bytes so decoding succeeds but the hash is wrong
        let bytes = fs::read(object_path(&repo, &other)).unwrap();
        fs::write(object_path(&repo, &blob), bytes).unwrap();

        let report = fsck(&repo).unwrap();

        assert!(!report.is_ok());
        assert_eq!(report.corrupt_objects.len(), 1);
        assert_eq!(report.corrupt_objects[0].hash, blob);
    }
}
