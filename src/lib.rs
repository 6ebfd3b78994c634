//! sprig - miniature version control
//!
//! a single-repository version-control engine: a content-addressed object
//! store, an immutable commit graph, a staging area and a three-way merge.
//!
//! # Core concepts
//!
//! - **Blob**: content of one tracked file at one point in time
//! - **Commit**: message, timestamp, parents and a full file-name -> blob snapshot
//! - **Staging area**: pending adds and removals applied by the next commit
//! - **Branch**: a named pointer to a commit; HEAD names the current branch
//!
//! # Hash format
//!
//! object hash = SHA256(kind | ' ' | payload_len | '\0' | payload)
//!
//! where kind is `blob` or `commit`. objects are stored zstd-compressed
//! under `.sprig/objects/<hex>`, prefixed by a one-byte kind tag.
//!
//! # Example usage
//!
//! ```no_run
//! use sprig::ops;
//! use std::path::Path;
//!
//! // initialize a repository in a working directory
//! let repo = ops::init(Path::new("/path/to/work")).unwrap();
//!
//! // stage and commit a file
//! ops::add(&repo, "notes.txt").unwrap();
//! let hash = ops::commit(&repo, "add notes").unwrap();
//!
//! // branch off and merge back
//! ops::branch(&repo, "feature").unwrap();
//! let outcome = ops::merge(&repo, "feature").unwrap();
//! ```

mod config;
mod error;
mod graph;
mod hash;
mod object;
mod refs;
mod repo;
mod staging;
mod worktree;

pub mod fs;
pub mod ops;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use graph::{
    all_commits, ancestors_bfs, create_commit, find_split_point, linear_history, LinearHistory,
};
pub use hash::{compute_blob_hash, compute_object_hash, Hash, ObjectKind};
pub use object::{
    blob_exists, commit_exists, list_objects, object_path, read_blob, read_commit, write_blob,
    write_commit,
};
pub use refs::{
    branch_exists, current_branch, head_commit, list_branches, read_branch, read_head,
    resolve_commit, Head,
};
pub use repo::{Repo, SPRIG_DIR};
pub use staging::StagingArea;
pub use types::{Commit, Object};
pub use worktree::{classify_status, materialize, remove_untracked_by_target, WorkTreeStatus};
