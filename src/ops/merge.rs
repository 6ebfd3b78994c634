//! three-way merge of another branch into the current one

use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::fs::write_file;
use crate::graph::{create_commit, find_split_point};
use crate::hash::{compute_blob_hash, Hash};
use crate::object::{read_blob, read_commit, write_blob};
use crate::ops::checkout::{clear_staging, switch_snapshot};
use crate::ops::{head, now};
use crate::refs::{current_branch, read_branch, write_branch};
use crate::repo::Repo;
use crate::staging::StagingArea;
use crate::worktree::{blocks_overwrite, delete_working_file, restore_file};

/// result of a merge
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// the given branch is already contained in the current one
    AlreadyAncestor,
    /// the current branch was moved forward to this commit
    FastForward(Hash),
    /// a merge commit was created
    Merged(Hash),
    /// these files hold conflict markers; nothing was committed
    Conflict { files: Vec<String> },
}

/// what to do with one file name
#[derive(Debug)]
enum Resolution {
    /// write the given branch's blob
    TakeGiven(Hash),
    /// the given branch deleted the file
    Delete,
    /// both sides changed it differently; holds the marker file body
    Conflict(Vec<u8>),
}

/// merge branch `given` into the current branch
pub fn merge(repo: &Repo, given: &str) -> Result<MergeOutcome> {
    if !StagingArea::load(repo)?.is_empty() {
        return Err(Error::DirtyStagingArea);
    }
    let given_hash = read_branch(repo, given)?;
    let current_name = current_branch(repo)?;
    if current_name == given {
        return Err(Error::SelfMerge(given.to_string()));
    }

    let (current_hash, current) = head(repo)?;
    let split_hash = find_split_point(repo, &current_hash, &given_hash)?;

    if split_hash == given_hash {
        info!(branch = given, "merge: given branch is an ancestor");
        return Ok(MergeOutcome::AlreadyAncestor);
    }

    let given_commit = read_commit(repo, &given_hash)?;

    if split_hash == current_hash {
        switch_snapshot(repo, &current, &given_commit)?;
        write_branch(repo, &current_name, &given_hash)?;
        clear_staging(repo)?;
        info!(branch = %current_name, commit = %given_hash, "merge: fast-forward");
        return Ok(MergeOutcome::FastForward(given_hash));
    }

    let split = read_commit(repo, &split_hash)?;
    let plan = plan_merge(repo, &split.files, &current.files, &given_commit.files)?;

    // nothing is touched until every write is known to be safe
    for (name, resolution) in &plan {
        let incoming = match resolution {
            Resolution::TakeGiven(blob) => *blob,
            Resolution::Conflict(body) => compute_blob_hash(body),
            Resolution::Delete => continue,
        };
        if blocks_overwrite(repo, &current.files, name, &incoming)? {
            return Err(Error::UntrackedFileConflict(name.clone()));
        }
    }

    let mut staging = StagingArea::new();
    let mut conflicts = Vec::new();

    for (name, resolution) in plan {
        match resolution {
            Resolution::TakeGiven(blob) => {
                restore_file(repo, &name, &blob)?;
                staging.stage_add(name, blob);
            }
            Resolution::Delete => {
                delete_working_file(repo, &name)?;
                staging.stage_remove(name);
            }
            Resolution::Conflict(body) => {
                write_file(&repo.work_dir().join(&name), &body)?;
                let blob = write_blob(repo, &body)?;
                staging.stage_add(name.clone(), blob);
                conflicts.push(name);
            }
        }
    }

    if !conflicts.is_empty() {
        staging.save(repo)?;
        warn!(branch = given, files = ?conflicts, "merge conflict");
        return Ok(MergeOutcome::Conflict { files: conflicts });
    }

    let message = format!("Merged {} into {}.", given, current_name);
    let files = staging.apply_to(&current.files);
    let hash = create_commit(repo, &message, vec![current_hash, given_hash], files, now())?;
    write_branch(repo, &current_name, &hash)?;
    staging.clear();
    staging.save(repo)?;

    info!(branch = given, commit = %hash, split = %split_hash, "merge");
    Ok(MergeOutcome::Merged(hash))
}

/// per-file three-way decisions, keyed by file name
///
/// names that need no change on the current side are left out.
fn plan_merge(
    repo: &Repo,
    split: &BTreeMap<String, Hash>,
    current: &BTreeMap<String, Hash>,
    given: &BTreeMap<String, Hash>,
) -> Result<BTreeMap<String, Resolution>> {
    let names: BTreeSet<&String> = split.keys().chain(current.keys()).chain(given.keys()).collect();
    let mut plan = BTreeMap::new();

    for name in names {
        let base = split.get(name);
        let ours = current.get(name);
        let theirs = given.get(name);

        let modified_current = base != ours;
        let modified_given = base != theirs;

        let resolution = match (modified_current, modified_given) {
            (false, true) => match theirs {
                Some(blob) => Resolution::TakeGiven(*blob),
                None => Resolution::Delete,
            },
            (true, true) if ours != theirs => {
                Resolution::Conflict(conflict_body(repo, ours, theirs)?)
            }
            _ => continue,
        };
        plan.insert(name.clone(), resolution);
    }

    Ok(plan)
}

fn conflict_body(repo: &Repo, ours: Option<&Hash>, theirs: Option<&Hash>) -> Result<Vec<u8>> {
    let mut body = b"<<<<<<< HEAD\n".to_vec();
    if let Some(blob) = ours {
        body.extend_from_slice(&read_blob(repo, blob)?);
    }
    body.extend_from_slice(b"=======\n");
    if let Some(blob) = theirs {
        body.extend_from_slice(&read_blob(repo, blob)?);
    }
    body.extend_from_slice(b">>>>>>>\n");
    Ok(body)
}
