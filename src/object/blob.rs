use crate::error::{Error, Result};
use crate::hash::{Hash, ObjectKind};
use crate::object::store;
use crate::repo::Repo;

/// write file content to the object store as a blob
pub fn write_blob(repo: &Repo, content: &[u8]) -> Result<Hash> {
    store::put(repo, ObjectKind::Blob, content)
}

/// read blob content
pub fn read_blob(repo: &Repo, hash: &Hash) -> Result<Vec<u8>> {
    let object = store::get(repo, hash)?;
    if object.kind != ObjectKind::Blob {
        return Err(Error::InvalidObjectType {
            hash: *hash,
            expected: ObjectKind::Blob.type_name(),
            found: object.kind.type_name(),
        });
    }
    Ok(object.payload)
}

/// check if a blob exists in the object store
pub fn blob_exists(repo: &Repo, hash: &Hash) -> bool {
    store::exists(repo, hash)
}
