use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::error::{IoResultExt, Result};

/// write bytes to `path` atomically
///
/// temp file in `tmp_dir` -> fsync -> rename -> fsync parent directory.
/// `tmp_dir` must live on the same filesystem as `path`.
pub fn atomic_write(tmp_dir: &Path, path: &Path, content: &[u8]) -> Result<()> {
    let tmp_path = tmp_dir.join(uuid::Uuid::new_v4().to_string());
    {
        let mut tmp_file = File::create(&tmp_path).with_path(&tmp_path)?;
        tmp_file.write_all(content).with_path(&tmp_path)?;
        tmp_file.sync_all().with_path(&tmp_path)?;
    }

    fs::rename(&tmp_path, path).with_path(path)?;

    if let Some(parent) = path.parent() {
        fsync_dir(parent)?;
    }

    Ok(())
}

/// create or overwrite a working-directory file
pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content).with_path(path)
}

/// delete a file, treating an already-missing file as success
///
/// returns whether a file was actually removed
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_path(path),
    }
}

/// fsync a directory
pub fn fsync_dir(path: &Path) -> Result<()> {
    let dir = File::open(path).with_path(path)?;
    dir.sync_all().with_path(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_and_replaces() {
        let dir = tempdir().unwrap();
        let tmp = dir.path().join("tmp");
        fs::create_dir(&tmp).unwrap();
        let target = dir.path().join("target");

        atomic_write(&tmp, &target, b"first").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"first");

        atomic_write(&tmp, &target, b"second").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"second");

        // temp files are renamed away, never left behind
        assert_eq!(fs::read_dir(&tmp).unwrap().count(), 0);
    }

    #[test]
    fn test_remove_file_if_exists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file");

        assert!(!remove_file_if_exists(&path).unwrap());

        write_file(&path, b"x").unwrap();
        assert!(remove_file_if_exists(&path).unwrap());
        assert!(!path.exists());
    }
}
