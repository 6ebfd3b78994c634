use crate::error::{Error, Result};
use crate::hash::{Hash, ObjectKind};
use crate::object::store;
use crate::repo::Repo;
use crate::types::Commit;

/// write a commit to the object store
///
/// commits are serialized as CBOR and hashed over that encoding, so the
/// same (message, timestamp, parents, files) always yields the same hash.
pub fn write_commit(repo: &Repo, commit: &Commit) -> Result<Hash> {
    let mut cbor_bytes = Vec::new();
    ciborium::into_writer(commit, &mut cbor_bytes)?;

    store::put(repo, ObjectKind::Commit, &cbor_bytes)
}

/// read a commit from the object store
pub fn read_commit(repo: &Repo, hash: &Hash) -> Result<Commit> {
    let object = store::get(repo, hash)?;
    if object.kind != ObjectKind::Commit {
        return Err(Error::InvalidObjectType {
            hash: *hash,
            expected: ObjectKind::Commit.type_name(),
            found: object.kind.type_name(),
        });
    }

    let commit: Commit = ciborium::from_reader(&object.payload[..])?;
    Ok(commit)
}

/// check if a commit exists in the object store
///
/// unlike `store::exists`, this reads the object to confirm its kind.
pub fn commit_exists(repo: &Repo, hash: &Hash) -> Result<bool> {
    match store::get(repo, hash) {
        Ok(object) => Ok(object.kind == ObjectKind::Commit),
        Err(Error::ObjectNotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::write_blob;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_write_and_read_commit() {
        let (_dir, repo) = test_repo();

        let blob = write_blob(&repo, b"x").unwrap();
        let mut files = BTreeMap::new();
        files.insert("a".to_string(), blob);
        let commit = Commit::with_timestamp("test commit", vec![], files, 1234567890);

        let hash = write_commit(&repo, &commit).unwrap();
        assert!(commit_exists(&repo, &hash).unwrap());

        let read = read_commit(&repo, &hash).unwrap();
        assert_eq!(commit, read);
    }

    #[test]
    fn test_commit_hash_is_deterministic() {
        let (_dir, repo) = test_repo();

        let commit = Commit::with_timestamp("test", vec![], BTreeMap::new(), 1234567890);

        let h1 = write_commit(&repo, &commit).unwrap();
        let h2 = write_commit(&repo, &commit.clone()).unwrap();
        assert_eq!(h1, h2);

        let later = Commit::with_timestamp("test", vec![], BTreeMap::new(), 1234567891);
        assert_ne!(write_commit(&repo, &later).unwrap(), h1);
    }

    #[test]
    fn test_merge_commit() {
        let (_dir, repo) = test_repo();

        let p1 = write_commit(&repo, &Commit::with_timestamp("a", vec![], BTreeMap::new(), 1)).unwrap();
        let p2 = write_commit(&repo, &Commit::with_timestamp("b", vec![], BTreeMap::new(), 2)).unwrap();

        let commit = Commit::with_timestamp("merge commit", vec![p1, p2], BTreeMap::new(), 3);
        let hash = write_commit(&repo, &commit).unwrap();
        let read = read_commit(&repo, &hash).unwrap();

        assert!(read.is_merge());
        assert_eq!(read.parents, vec![p1, p2]);
    }

    #[test]
    fn test_read_nonexistent_commit() {
        let (_dir, repo) = test_repo();

        let result = read_commit(&repo, &Hash::ZERO);
        assert!(matches!(result, Err(Error::ObjectNotFound(_))));
        assert!(!commit_exists(&repo, &Hash::ZERO).unwrap());
    }

    #[test]
    fn test_blob_is_not_a_commit() {
        let (_dir, repo) = test_repo();

        let blob = write_blob(&repo, b"plain content").unwrap();

        assert!(!commit_exists(&repo, &blob).unwrap());
        assert!(matches!(
            read_commit(&repo, &blob),
            Err(Error::InvalidObjectType { expected: "commit", .. })
        ));
    }
}
