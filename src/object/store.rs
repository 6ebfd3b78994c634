use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{Error, IoResultExt, Result};
use crate::fs::atomic_write;
use crate::hash::{compute_object_hash, Hash, ObjectKind};
use crate::repo::Repo;
use crate::types::Object;

/// store a payload under its content hash
///
/// the body on disk is zstd(tag byte | payload). writing is a no-op when
/// an object with the same hash is already present.
pub fn put(repo: &Repo, kind: ObjectKind, payload: &[u8]) -> Result<Hash> {
    let hash = compute_object_hash(kind, payload);
    let path = object_path(repo, &hash);

    // dedup: identical content is never stored twice
    if path.exists() {
        return Ok(hash);
    }

    let body = Object::new(kind, payload).encode();
    let compressed =
        zstd::encode_all(&body[..], repo.config().compression_level).with_path("<zstd>")?;

    atomic_write(&repo.tmp_path(), &path, &compressed)?;
    debug!(%hash, %kind, size = payload.len(), "stored object");

    Ok(hash)
}

/// load and verify an object
pub fn get(repo: &Repo, hash: &Hash) -> Result<Object> {
    let path = object_path(repo, hash);

    let compressed = fs::read(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ObjectNotFound(*hash)
        } else {
            Error::Io {
                path: path.clone(),
                source: e,
            }
        }
    })?;

    let body = zstd::decode_all(&compressed[..])
        .map_err(|e| Error::CorruptObjectMessage(format!("undecodable object {}: {}", hash, e)))?;

    let object = Object::decode(&body)
        .ok_or_else(|| Error::CorruptObjectMessage(format!("unknown object tag in {}", hash)))?;

    // verify hash
    if compute_object_hash(object.kind, &object.payload) != *hash {
        return Err(Error::CorruptObject(*hash));
    }

    Ok(object)
}

/// check if an object exists in the store
pub fn exists(repo: &Repo, hash: &Hash) -> bool {
    object_path(repo, hash).exists()
}

/// get the filesystem path to an object
pub fn object_path(repo: &Repo, hash: &Hash) -> PathBuf {
    repo.objects_path().join(hash.to_hex())
}

/// every object hash in the store, sorted
///
/// file names that are not hashes are skipped.
pub fn list_objects(repo: &Repo) -> Result<Vec<Hash>> {
    let dir = repo.objects_path();
    let mut hashes = Vec::new();

    for entry in fs::read_dir(&dir).with_path(&dir)? {
        let entry = entry.with_path(&dir)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.len() != Hash::HEX_LEN {
            continue;
        }
        if let Ok(hash) = Hash::from_hex(name) {
            hashes.push(hash);
        }
    }

    hashes.sort();
    Ok(hashes)
}
