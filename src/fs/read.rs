use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{IoResultExt, Result};

/// names of the regular files directly inside `dir`
///
/// subdirectories (including the repository marker) and symlinks are
/// skipped; names that are not valid UTF-8 are ignored.
pub fn list_plain_files(dir: &Path) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::new(ErrorKind::Other, "walk error"));
            crate::Error::Io { path, source }
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.insert(name.to_string());
        }
    }

    Ok(names)
}

/// read a file, returning None when it does not exist
pub fn read_file_if_exists(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_path(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_plain_files_skips_directories() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(dir.path().join(".sprig")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/nested.txt"), "n").unwrap();

        let names: Vec<_> = list_plain_files(dir.path()).unwrap().into_iter().collect();
        assert_eq!(names, vec!["a.txt".to_string(), "b.txt".to_string()]);
    }

    #[test]
    fn test_read_file_if_exists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f");

        assert_eq!(read_file_if_exists(&path).unwrap(), None);

        fs::write(&path, "content").unwrap();
        assert_eq!(read_file_if_exists(&path).unwrap(), Some(b"content".to_vec()));
    }
}
