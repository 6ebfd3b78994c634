use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, IoResultExt, Result};
use crate::fs::atomic_write;
use crate::hash::Hash;
use crate::object::{commit_exists, list_objects};
use crate::repo::Repo;

/// prefix of a symbolic HEAD
const HEAD_REF_PREFIX: &str = "ref: refs/heads/";

/// shortest commit id prefix accepted by `resolve_commit`
pub const MIN_PREFIX_LEN: usize = 4;

/// where HEAD points
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Head {
    /// symbolic: the named branch is current
    Branch(String),
    /// direct commit hash
    Detached(Hash),
}

/// write a branch ref (create or update)
///
/// the hash must name a commit already in the store.
pub fn write_branch(repo: &Repo, name: &str, hash: &Hash) -> Result<()> {
    validate_ref_name(name)?;

    if !commit_exists(repo, hash)? {
        return Err(Error::ObjectNotFound(*hash));
    }

    let ref_path = branch_path(repo, name);

    // ensure parent directories exist
    if let Some(parent) = ref_path.parent() {
        fs::create_dir_all(parent).with_path(parent)?;
    }

    atomic_write(&repo.tmp_path(), &ref_path, format!("{}\n", hash.to_hex()).as_bytes())?;
    debug!(branch = name, %hash, "updated branch");

    Ok(())
}

/// read a branch ref
///
/// a name that is not a valid ref name counts as a missing branch.
pub fn read_branch(repo: &Repo, name: &str) -> Result<Hash> {
    if validate_ref_name(name).is_err() {
        return Err(Error::NoSuchBranch(name.to_string()));
    }
    let ref_path = branch_path(repo, name);

    let content = fs::read_to_string(&ref_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NoSuchBranch(name.to_string())
        } else {
            Error::Io {
                path: ref_path.clone(),
                source: e,
            }
        }
    })?;

    Hash::from_hex(content.trim())
}

/// delete a branch ref
pub fn delete_branch(repo: &Repo, name: &str) -> Result<()> {
    if validate_ref_name(name).is_err() {
        return Err(Error::NoSuchBranch(name.to_string()));
    }
    let ref_path = branch_path(repo, name);

    fs::remove_file(&ref_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NoSuchBranch(name.to_string())
        } else {
            Error::Io {
                path: ref_path,
                source: e,
            }
        }
    })?;
    debug!(branch = name, "deleted branch");

    Ok(())
}

/// check if a branch exists
pub fn branch_exists(repo: &Repo, name: &str) -> bool {
    validate_ref_name(name).is_ok() && branch_path(repo, name).is_file()
}

/// list all branches, sorted
pub fn list_branches(repo: &Repo) -> Result<Vec<String>> {
    let heads_dir = repo.heads_path();
    let mut branches = Vec::new();

    if heads_dir.exists() {
        collect_refs(&heads_dir, &heads_dir, &mut branches)?;
    }

    branches.sort();
    Ok(branches)
}

/// read HEAD
pub fn read_head(repo: &Repo) -> Result<Head> {
    let path = repo.head_path();
    let content = fs::read_to_string(&path).with_path(&path)?;
    let content = content.trim();

    if let Some(branch) = content.strip_prefix(HEAD_REF_PREFIX) {
        return Ok(Head::Branch(branch.to_string()));
    }

    Hash::from_hex(content)
        .map(Head::Detached)
        .map_err(|_| Error::InvalidRef(format!("malformed HEAD: {}", content)))
}

/// point HEAD at a branch
pub fn set_head_branch(repo: &Repo, name: &str) -> Result<()> {
    validate_ref_name(name)?;
    let content = format!("{}{}\n", HEAD_REF_PREFIX, name);
    atomic_write(&repo.tmp_path(), &repo.head_path(), content.as_bytes())?;
    debug!(branch = name, "moved HEAD");
    Ok(())
}

/// name of the branch HEAD points at
pub fn current_branch(repo: &Repo) -> Result<String> {
    match read_head(repo)? {
        Head::Branch(name) => Ok(name),
        Head::Detached(hash) => Err(Error::DetachedHead(hash)),
    }
}

/// commit hash HEAD resolves to
pub fn head_commit(repo: &Repo) -> Result<Hash> {
    match read_head(repo)? {
        Head::Branch(name) => read_branch(repo, &name),
        Head::Detached(hash) => Ok(hash),
    }
}

/// resolve a full or abbreviated commit id
///
/// any unique hex prefix of at least `MIN_PREFIX_LEN` characters is
/// accepted; only objects that are commits count as matches.
pub fn resolve_commit(repo: &Repo, id: &str) -> Result<Hash> {
    if id.len() < MIN_PREFIX_LEN
        || id.len() > Hash::HEX_LEN
        || !id.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(Error::NoSuchCommit(id.to_string()));
    }

    // full id: direct lookup
    if id.len() == Hash::HEX_LEN {
        let hash = Hash::from_hex(id)?;
        return if commit_exists(repo, &hash)? {
            Ok(hash)
        } else {
            Err(Error::NoSuchCommit(id.to_string()))
        };
    }

    let mut found = None;
    for hash in list_objects(repo)? {
        if !hash.matches_prefix(id) || !commit_exists(repo, &hash)? {
            continue;
        }
        if found.is_some() {
            return Err(Error::AmbiguousCommitId(id.to_string()));
        }
        found = Some(hash);
    }

    found.ok_or_else(|| Error::NoSuchCommit(id.to_string()))
}

/// get filesystem path for a branch
fn branch_path(repo: &Repo, name: &str) -> PathBuf {
    repo.heads_path().join(name)
}

/// recursively collect refs from directory
fn collect_refs(base: &Path, dir: &Path, refs: &mut Vec<String>) -> Result<()> {
    for entry in fs::read_dir(dir).with_path(dir)? {
        let entry = entry.with_path(dir)?;
        let path = entry.path();

        if path.is_dir() {
            collect_refs(base, &path, refs)?;
        } else if path.is_file() {
            // compute ref name relative to base
            if let Ok(rel) = path.strip_prefix(base) {
                refs.push(rel.to_string_lossy().to_string());
            }
        }
    }
    Ok(())
}

/// validate ref name
fn validate_ref_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidRef("empty ref name".to_string()));
    }

    if name.starts_with('/') || name.ends_with('/') {
        return Err(Error::InvalidRef(format!(
            "ref name cannot start or end with '/': {}",
            name
        )));
    }

    if name.contains("//") {
        return Err(Error::InvalidRef(format!(
            "ref name cannot contain '//': {}",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidRef(format!(
            "ref name cannot contain null byte: {}",
            name
        )));
    }

    // check for path traversal
    for component in name.split('/') {
        if component == "." || component == ".." {
            return Err(Error::InvalidRef(format!(
                "ref name cannot contain '.' or '..': {}",
                name
            )));
        }
    }

    Ok(())
}
