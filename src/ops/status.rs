use std::fmt;

use crate::error::Result;
use crate::ops::head;
use crate::refs::{current_branch, list_branches};
use crate::repo::Repo;
use crate::staging::StagingArea;
use crate::worktree::{classify_status, list_working_files};

/// full repository status report
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub current_branch: String,
    pub branches: Vec<String>,
    pub staged: Vec<String>,
    pub removed: Vec<String>,
    pub modified_not_staged: Vec<String>,
    pub untracked: Vec<String>,
}

/// branches, staging area and working-tree differences
pub fn status(repo: &Repo) -> Result<Status> {
    let current_branch = current_branch(repo)?;
    let branches = list_branches(repo)?;
    let (_, head_commit) = head(repo)?;
    let staging = StagingArea::load(repo)?;

    let listing = list_working_files(repo)?;
    let work_tree = classify_status(repo, &head_commit.files, &staging, &listing)?;

    Ok(Status {
        current_branch,
        branches,
        staged: staging.added().keys().cloned().collect(),
        removed: staging.removed().iter().cloned().collect(),
        modified_not_staged: work_tree.modified_not_staged,
        untracked: work_tree.untracked,
    })
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Branches ===")?;
        for branch in &self.branches {
            if *branch == self.current_branch {
                writeln!(f, "*{}", branch)?;
            } else {
                writeln!(f, "{}", branch)?;
            }
        }
        writeln!(f)?;

        section(f, "Staged Files", &self.staged)?;
        section(f, "Removed Files", &self.removed)?;
        section(f, "Modifications Not Staged For Commit", &self.modified_not_staged)?;
        section(f, "Untracked Files", &self.untracked)
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str, lines: &[String]) -> fmt::Result {
    writeln!(f, "=== {} ===", title)?;
    for line in lines {
        writeln!(f, "{}", line)?;
    }
    writeln!(f)
}
