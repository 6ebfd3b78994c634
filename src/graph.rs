//! commit graph queries over the object store
//!
//! commits form a DAG through their parent lists. ancestry walks follow
//! every parent; linear history follows only the first one.

use std::collections::{BTreeMap, HashSet, VecDeque};

use tracing::debug;

use crate::error::{Error, Result};
use crate::hash::{Hash, ObjectKind};
use crate::object::{list_objects, read_commit, store, write_commit};
use crate::repo::Repo;
use crate::types::Commit;

/// build and store a new immutable commit
pub fn create_commit(
    repo: &Repo,
    message: &str,
    parents: Vec<Hash>,
    files: BTreeMap<String, Hash>,
    timestamp: i64,
) -> Result<Hash> {
    if message.is_empty() {
        return Err(Error::EmptyMessage);
    }

    let commit = Commit::with_timestamp(message, parents, files, timestamp);
    let hash = write_commit(repo, &commit)?;
    debug!(%hash, parents = commit.parents.len(), "created commit");

    Ok(hash)
}

/// every commit reachable from `start` through any parent edge,
/// including `start` itself
pub fn ancestors_bfs(repo: &Repo, start: &Hash) -> Result<HashSet<Hash>> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([*start]);

    while let Some(hash) = queue.pop_front() {
        if !visited.insert(hash) {
            continue;
        }
        let commit = read_commit(repo, &hash)?;
        queue.extend(commit.parents.iter().copied());
    }

    Ok(visited)
}

/// merge base of `a` and `b`
///
/// collects the ancestors of `a`, then walks breadth-first from `b` and
/// returns the first commit already in that set. ties go to whichever
/// common ancestor the walk from `b` reaches first, so the result is not
/// symmetric in `a` and `b` and with several merge bases it may not be
/// the lowest one.
pub fn find_split_point(repo: &Repo, a: &Hash, b: &Hash) -> Result<Hash> {
    let a_ancestors = ancestors_bfs(repo, a)?;

    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([*b]);

    while let Some(hash) = queue.pop_front() {
        if a_ancestors.contains(&hash) {
            return Ok(hash);
        }
        if !visited.insert(hash) {
            continue;
        }
        let commit = read_commit(repo, &hash)?;
        queue.extend(commit.parents.iter().copied());
    }

    // every commit descends from a root; only disjoint histories get here
    Err(Error::CorruptObjectMessage(format!(
        "commits {} and {} share no ancestor",
        a, b
    )))
}

/// lazy first-parent history starting at `start`
pub fn linear_history(repo: &Repo, start: Hash) -> LinearHistory<'_> {
    LinearHistory {
        repo,
        next: Some(start),
    }
}

/// iterator returned by `linear_history`
///
/// yields (hash, commit) pairs newest first and ends after the commit
/// with no parents. a read error is yielded once and ends the walk.
pub struct LinearHistory<'a> {
    repo: &'a Repo,
    next: Option<Hash>,
}

impl Iterator for LinearHistory<'_> {
    type Item = Result<(Hash, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let hash = self.next.take()?;
        match read_commit(self.repo, &hash) {
            Ok(commit) => {
                self.next = commit.first_parent();
                Some(Ok((hash, commit)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// every commit in the store, in hash order
///
/// objects that cannot be read as commits are skipped.
pub fn all_commits(repo: &Repo) -> Result<Vec<(Hash, Commit)>> {
    let mut commits = Vec::new();

    for hash in list_objects(repo)? {
        let object = match store::get(repo, &hash) {
            Ok(object) => object,
            Err(e) => {
                debug!(%hash, error = %e, "skipping unreadable object");
                continue;
            }
        };
        if object.kind != ObjectKind::Commit {
            continue;
        }
        match ciborium::from_reader::<Commit, _>(&object.payload[..]) {
            Ok(commit) => commits.push((hash, commit)),
            Err(e) => debug!(%hash, error = %e, "skipping undecodable commit"),
        }
    }

    Ok(commits)
}
