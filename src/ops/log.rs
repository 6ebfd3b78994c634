use crate::error::{Error, Result};
use crate::graph::{all_commits, linear_history};
use crate::hash::Hash;
use crate::refs::head_commit;
use crate::repo::Repo;
use crate::types::Commit;

/// commit with its hash for log output
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub hash: Hash,
    pub commit: Commit,
}

/// first-parent history from HEAD, newest first, ending at the root
pub fn log(repo: &Repo) -> Result<Vec<LogEntry>> {
    let start = head_commit(repo)?;
    linear_history(repo, start)
        .map(|entry| entry.map(|(hash, commit)| LogEntry { hash, commit }))
        .collect()
}

/// every commit ever made, in hash order
pub fn global_log(repo: &Repo) -> Result<Vec<LogEntry>> {
    Ok(all_commits(repo)?
        .into_iter()
        .map(|(hash, commit)| LogEntry { hash, commit })
        .collect())
}

/// hashes of all commits whose message is exactly `message`
pub fn find(repo: &Repo, message: &str) -> Result<Vec<Hash>> {
    let matches: Vec<Hash> = all_commits(repo)?
        .into_iter()
        .filter(|(_, commit)| commit.message == message)
        .map(|(hash, _)| hash)
        .collect();

    if matches.is_empty() {
        return Err(Error::NoCommitWithMessage(message.to_string()));
    }
    Ok(matches)
}

/// format a log entry for display
impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===")?;
        writeln!(f, "commit {}", self.hash)?;

        if self.commit.is_merge() {
            let parents: Vec<String> = self.commit.parents.iter().map(Hash::short).collect();
            writeln!(f, "Merge: {}", parents.join(" "))?;
        }

        writeln!(f, "Date: {}", format_timestamp(self.commit.timestamp))?;
        writeln!(f, "{}", self.commit.message)?;
        writeln!(f)
    }
}

/// local-time rendering like "Thu Jan 1 00:00:00 1970 +0000"
fn format_timestamp(timestamp: i64) -> String {
    match chrono::DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc
            .with_timezone(&chrono::Local)
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string(),
        None => timestamp.to_string(),
    }
}
